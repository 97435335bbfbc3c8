use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::database::Database;
use crate::error::AppResult;
use crate::models::{TransactionData, STATUS_PENDING};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Creates a PENDING transaction record and returns its generated hash.
    /// Status transitions to CONFIRMED (or a failure status) happen in the
    /// external confirmation process, not here.
    async fn create(&self, contract_function_id: i64, data: &serde_json::Value)
        -> AppResult<String>;

    async fn read(&self, tx_hash: &str) -> AppResult<Option<TransactionData>>;
}

pub struct PgTransactionStore {
    db: Arc<Database>,
}

impl PgTransactionStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

pub(crate) fn generate_tx_hash() -> String {
    let digest = Sha256::digest(Uuid::new_v4().as_bytes());
    format!("0x{}", hex::encode(digest))
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn create(
        &self,
        contract_function_id: i64,
        data: &serde_json::Value,
    ) -> AppResult<String> {
        let tx_hash = generate_tx_hash();
        self.db
            .client()
            .execute(
                "INSERT INTO transactiondata
                     (transactionhash, contractfunctionid, data, status, createtimestamp)
                 VALUES ($1, $2, $3, $4, NOW())",
                &[&tx_hash, &contract_function_id, data, &STATUS_PENDING],
            )
            .await?;
        Ok(tx_hash)
    }

    async fn read(&self, tx_hash: &str) -> AppResult<Option<TransactionData>> {
        let row = self
            .db
            .client()
            .query_opt(
                "SELECT id, transactionhash, contractfunctionid, data, status, createtimestamp
                 FROM transactiondata WHERE transactionhash = $1",
                &[&tx_hash],
            )
            .await?;
        Ok(row.map(|r| TransactionData::from_row(&r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_hash_is_prefixed_hex() {
        let hash = generate_tx_hash();
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 66);
        assert!(hash[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tx_hashes_are_unique() {
        assert_ne!(generate_tx_hash(), generate_tx_hash());
    }
}
