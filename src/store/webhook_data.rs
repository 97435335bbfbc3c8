use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::database::Database;
use crate::error::AppResult;
use crate::models::WebhookData;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait WebhookStore: Send + Sync {
    /// Persists a verified subscription and returns its generated id.
    async fn create(&self, entity: &WebhookData) -> AppResult<i64>;
}

pub struct PgWebhookStore {
    db: Arc<Database>,
}

impl PgWebhookStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WebhookStore for PgWebhookStore {
    async fn create(&self, entity: &WebhookData) -> AppResult<i64> {
        let row = self
            .db
            .client()
            .query_one(
                "INSERT INTO webhookdata (contractid, contractfunctionid, contracteventid, url)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id",
                &[
                    &entity.contract_id,
                    &entity.contract_function_id,
                    &entity.contract_event_id,
                    &entity.url,
                ],
            )
            .await?;
        Ok(row.get(0))
    }
}
