use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::database::Database;
use crate::error::AppResult;
use crate::models::{EventData, STATUS_CONFIRMED};

const EVENT_COLUMNS: &str =
    "contracteventid, transactionhash, event, data, blocknumber, blockhash, address, createtimestamp";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventDataStore: Send + Sync {
    /// All stored event rows, unfiltered and unpaginated.
    async fn read_all(&self) -> AppResult<Vec<EventData>>;

    /// Event rows for a transaction hash, visible only once the transaction
    /// has reached CONFIRMED status.
    async fn read_by_tx_hash(&self, tx_hash: &str) -> AppResult<Vec<EventData>>;

    /// Inserts the row unless a row with the same seven natural-key fields
    /// already exists; a duplicate is a silent no-op. The chain listener may
    /// redeliver the same event, so duplicates are expected input.
    async fn create(&self, entity: &EventData) -> AppResult<()>;

    /// Declared for interface parity with the other stores; resolves without
    /// effect. Event rows are never updated.
    async fn update(&self) -> AppResult<()>;

    /// Declared for interface parity; resolves without effect.
    async fn delete(&self) -> AppResult<()>;
}

pub struct PgEventDataStore {
    db: Arc<Database>,
}

impl PgEventDataStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventDataStore for PgEventDataStore {
    async fn read_all(&self) -> AppResult<Vec<EventData>> {
        let rows = self
            .db
            .client()
            .query(&format!("SELECT {EVENT_COLUMNS} FROM eventdata"), &[])
            .await?;
        Ok(rows.iter().map(EventData::from_row).collect())
    }

    async fn read_by_tx_hash(&self, tx_hash: &str) -> AppResult<Vec<EventData>> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM eventdata
             WHERE transactionhash IN (
                 SELECT transactionhash FROM transactiondata
                 WHERE transactionhash = $1 AND status = $2
             )"
        );
        let rows = self
            .db
            .client()
            .query(&query, &[&tx_hash, &STATUS_CONFIRMED])
            .await?;
        Ok(rows.iter().map(EventData::from_row).collect())
    }

    async fn create(&self, entity: &EventData) -> AppResult<()> {
        // Conditional insert in place of a uniqueness constraint. Only
        // race-free under serializable isolation or a single writer.
        let query = "INSERT INTO eventdata
                (contracteventid, transactionhash, event, data, blocknumber, blockhash, address, createtimestamp)
             SELECT $1, $2, $3, $4, $5, $6, $7, NOW()
             WHERE NOT EXISTS (
                 SELECT 1 FROM eventdata
                 WHERE contracteventid = $1 AND transactionhash = $2 AND event = $3
                   AND data = $4 AND blocknumber = $5 AND blockhash = $6 AND address = $7
             )";
        self.db
            .client()
            .execute(
                query,
                &[
                    &entity.contract_event_id,
                    &entity.transaction_hash,
                    &entity.event,
                    &entity.data,
                    &entity.block_number,
                    &entity.block_hash,
                    &entity.address,
                ],
            )
            .await?;
        Ok(())
    }

    async fn update(&self) -> AppResult<()> {
        Ok(())
    }

    async fn delete(&self) -> AppResult<()> {
        Ok(())
    }
}
