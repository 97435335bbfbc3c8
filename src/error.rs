use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Postgres database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Queue error: {0}")]
    Queue(String),

    #[error("Webhook probe error: {0}")]
    Probe(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;
