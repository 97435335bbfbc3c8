use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contract_gateway::config::Config;
use contract_gateway::database::Database;
use contract_gateway::handlers::{create_router, AppState};
use contract_gateway::queue::NatsQueue;
use contract_gateway::store::{
    PgContractStore, PgEventDataStore, PgTransactionStore, PgWebhookStore,
};
use contract_gateway::webhook_probe::HttpWebhookProber;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    info!("Starting Contract Gateway");

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = Config::load_from_file(&config_path).await?;

    let database = Arc::new(Database::new(&config.database.url).await?);
    let queue = NatsQueue::connect(&config.queue.url, config.queue.subject.clone()).await?;

    let state = AppState {
        contracts: Arc::new(PgContractStore::new(database.clone())),
        event_data: Arc::new(PgEventDataStore::new(database.clone())),
        transactions: Arc::new(PgTransactionStore::new(database.clone())),
        webhooks: Arc::new(PgWebhookStore::new(database)),
        queue: Arc::new(queue),
        probe: Arc::new(HttpWebhookProber::new()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!("Server running on {}", config.server.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
