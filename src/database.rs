use anyhow::Result;
use tokio_postgres::{Client, NoTls};
use tracing::{error, info};

/// Explicitly constructed persistence handle, opened once at startup and
/// shared across the per-entity stores.
pub struct Database {
    client: Client,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("Database connection error: {}", e);
            }
        });

        let db = Database { client };
        db.init_tables().await?;
        info!("PostgreSQL ready");
        Ok(db)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn init_tables(&self) -> Result<()> {
        self.client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS contract (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    address TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS contractevent (
                    id BIGSERIAL PRIMARY KEY,
                    contractid BIGINT NOT NULL,
                    name TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS contractfunction (
                    id BIGSERIAL PRIMARY KEY,
                    contractid BIGINT NOT NULL,
                    name TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS transactiondata (
                    id BIGSERIAL PRIMARY KEY,
                    transactionhash TEXT NOT NULL UNIQUE,
                    contractfunctionid BIGINT NOT NULL,
                    data JSONB NOT NULL,
                    status TEXT NOT NULL,
                    createtimestamp TIMESTAMP WITH TIME ZONE DEFAULT NOW()
                );
                CREATE TABLE IF NOT EXISTS eventdata (
                    contracteventid BIGINT NOT NULL,
                    transactionhash TEXT NOT NULL,
                    event TEXT NOT NULL,
                    data TEXT NOT NULL,
                    blocknumber BIGINT NOT NULL,
                    blockhash TEXT NOT NULL,
                    address TEXT NOT NULL,
                    createtimestamp TIMESTAMP WITH TIME ZONE DEFAULT NOW()
                );
                CREATE TABLE IF NOT EXISTS webhookdata (
                    id BIGSERIAL PRIMARY KEY,
                    contractid BIGINT NOT NULL,
                    contractfunctionid BIGINT,
                    contracteventid BIGINT,
                    url TEXT NOT NULL
                );",
            )
            .await?;

        Ok(())
    }
}
