use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Job description handed to the asynchronous on-chain submitter. The handler
/// does not wait for the submission; it only guarantees the message left for
/// the queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMessage {
    pub tx_hash: String,
    pub contract_id: i64,
    pub contract_function_id: i64,
    pub data: serde_json::Value,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransactionQueue: Send + Sync {
    async fn publish(&self, message: &TransactionMessage) -> AppResult<()>;
}

pub struct NatsQueue {
    client: async_nats::Client,
    subject: String,
}

impl NatsQueue {
    pub async fn connect(url: &str, subject: String) -> anyhow::Result<Self> {
        let client = async_nats::connect(url).await?;
        info!("Connected to NATS at {}, publishing to {}", url, subject);
        Ok(Self { client, subject })
    }
}

#[async_trait]
impl TransactionQueue for NatsQueue {
    async fn publish(&self, message: &TransactionMessage) -> AppResult<()> {
        let payload = serde_json::to_vec(message)?;
        self.client
            .publish(self.subject.clone(), payload.into())
            .await
            .map_err(|e| AppError::Queue(e.to_string()))?;
        info!("Published transaction {} to {}", message.tx_hash, self.subject);
        Ok(())
    }
}
