use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::database::Database;
use crate::error::AppResult;
use crate::models::{Contract, ContractEvent, ContractFunction};

/// Read-only access to deployed contract metadata: the contract row itself,
/// its emitted event signatures and its callable functions.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContractStore: Send + Sync {
    async fn read_contract(&self, id: i64) -> AppResult<Option<Contract>>;
    async fn read_event(&self, id: i64) -> AppResult<Vec<ContractEvent>>;
    async fn read_function(&self, id: i64) -> AppResult<Vec<ContractFunction>>;
    async fn read_events_by_contract(&self, contract_id: i64) -> AppResult<Vec<ContractEvent>>;
    async fn read_functions_by_contract(&self, contract_id: i64)
        -> AppResult<Vec<ContractFunction>>;
}

pub struct PgContractStore {
    db: Arc<Database>,
}

impl PgContractStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContractStore for PgContractStore {
    async fn read_contract(&self, id: i64) -> AppResult<Option<Contract>> {
        let row = self
            .db
            .client()
            .query_opt("SELECT id, name, address FROM contract WHERE id = $1", &[&id])
            .await?;
        Ok(row.map(|r| Contract::from_row(&r)))
    }

    async fn read_event(&self, id: i64) -> AppResult<Vec<ContractEvent>> {
        let rows = self
            .db
            .client()
            .query("SELECT id, contractid, name FROM contractevent WHERE id = $1", &[&id])
            .await?;
        Ok(rows.iter().map(ContractEvent::from_row).collect())
    }

    async fn read_function(&self, id: i64) -> AppResult<Vec<ContractFunction>> {
        let rows = self
            .db
            .client()
            .query("SELECT id, contractid, name FROM contractfunction WHERE id = $1", &[&id])
            .await?;
        Ok(rows.iter().map(ContractFunction::from_row).collect())
    }

    async fn read_events_by_contract(&self, contract_id: i64) -> AppResult<Vec<ContractEvent>> {
        let rows = self
            .db
            .client()
            .query(
                "SELECT id, contractid, name FROM contractevent WHERE contractid = $1",
                &[&contract_id],
            )
            .await?;
        Ok(rows.iter().map(ContractEvent::from_row).collect())
    }

    async fn read_functions_by_contract(
        &self,
        contract_id: i64,
    ) -> AppResult<Vec<ContractFunction>> {
        let rows = self
            .db
            .client()
            .query(
                "SELECT id, contractid, name FROM contractfunction WHERE contractid = $1",
                &[&contract_id],
            )
            .await?;
        Ok(rows.iter().map(ContractFunction::from_row).collect())
    }
}
