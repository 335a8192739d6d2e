use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_server::config::{Config, StorageKind};
use todo_server::{store, Variant};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let variant = Variant::from(config.storage);

    if config.storage == StorageKind::Postgres {
        tracing::info!(database = %config.database.endpoint(), "connecting to database");
    }
    let store = store::open(&config).await.map_err(|err| {
        tracing::error!(error = %err, "storage unavailable");
        err
    })?;

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        variant = ?variant,
        environment = %config.app_env,
        "todo-server listening"
    );
    todo_server::run(listener, store, variant).await?;
    Ok(())
}
