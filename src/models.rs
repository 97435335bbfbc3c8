use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_CONFIRMED: &str = "CONFIRMED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    pub name: String,
    pub address: String,
}

impl Contract {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            name: row.get("name"),
            address: row.get("address"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractEvent {
    pub id: i64,
    pub contract_id: i64,
    pub name: String,
}

impl ContractEvent {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            contract_id: row.get("contractid"),
            name: row.get("name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractFunction {
    pub id: i64,
    pub contract_id: i64,
    pub name: String,
}

impl ContractFunction {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            contract_id: row.get("contractid"),
            name: row.get("name"),
        }
    }
}

/// One emitted contract event as ingested from the chain listener. The seven
/// non-timestamp fields form the natural key guarded by the conditional
/// insert; `create_timestamp` is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub contract_event_id: i64,
    pub transaction_hash: String,
    pub event: String,
    pub data: String,
    pub block_number: i64,
    pub block_hash: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<DateTime<Utc>>,
}

impl EventData {
    pub fn from_row(row: &Row) -> Self {
        Self {
            contract_event_id: row.get("contracteventid"),
            transaction_hash: row.get("transactionhash"),
            event: row.get("event"),
            data: row.get("data"),
            block_number: row.get("blocknumber"),
            block_hash: row.get("blockhash"),
            address: row.get("address"),
            create_timestamp: row.get("createtimestamp"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub id: i64,
    pub transaction_hash: String,
    pub contract_function_id: i64,
    pub data: serde_json::Value,
    pub status: String,
    pub create_timestamp: DateTime<Utc>,
}

impl TransactionData {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            transaction_hash: row.get("transactionhash"),
            contract_function_id: row.get("contractfunctionid"),
            data: row.get("data"),
            status: row.get("status"),
            create_timestamp: row.get("createtimestamp"),
        }
    }
}

/// A webhook subscription as submitted for persistence. Null event/function
/// ids subscribe at the contract level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookData {
    pub contract_id: i64,
    pub contract_function_id: Option<i64>,
    pub contract_event_id: Option<i64>,
    pub url: String,
}
