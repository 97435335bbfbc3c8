//! Live-database tests for the Postgres stores. They run only when
//! TEST_DATABASE_URL points at a disposable PostgreSQL instance and skip
//! silently otherwise.

use std::sync::Arc;

use uuid::Uuid;

use contract_gateway::database::Database;
use contract_gateway::models::{EventData, STATUS_CONFIRMED};
use contract_gateway::store::{
    EventDataStore, PgEventDataStore, PgTransactionStore, TransactionStore,
};

async fn test_db() -> Option<Arc<Database>> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    Some(Arc::new(
        Database::new(&url).await.expect("connect to test database"),
    ))
}

fn unique_event(tx_hash: &str) -> EventData {
    EventData {
        contract_event_id: 4,
        transaction_hash: tx_hash.to_string(),
        event: "Transfer".to_string(),
        data: format!("{{\"nonce\":\"{}\"}}", Uuid::new_v4()),
        block_number: 1042,
        block_hash: format!("0x{}", Uuid::new_v4().simple()),
        address: "0xcontract".to_string(),
        create_timestamp: None,
    }
}

fn unique_tx_hash() -> String {
    format!("0xtest{}", Uuid::new_v4().simple())
}

#[tokio::test]
async fn duplicate_create_stores_exactly_one_row() {
    let Some(db) = test_db().await else { return };
    let store = PgEventDataStore::new(db.clone());

    let entity = unique_event(&unique_tx_hash());
    store.create(&entity).await.unwrap();
    store.create(&entity).await.unwrap();

    let row = db
        .client()
        .query_one(
            "SELECT COUNT(*) FROM eventdata WHERE transactionhash = $1 AND data = $2",
            &[&entity.transaction_hash, &entity.data],
        )
        .await
        .unwrap();
    let count: i64 = row.get(0);
    assert_eq!(count, 1);
}

#[tokio::test]
async fn create_round_trips_natural_key_through_read_all() {
    let Some(db) = test_db().await else { return };
    let store = PgEventDataStore::new(db);

    let entity = unique_event(&unique_tx_hash());
    store.create(&entity).await.unwrap();

    let rows = store.read_all().await.unwrap();
    let stored = rows
        .iter()
        .find(|row| row.data == entity.data)
        .expect("created row is readable");

    assert_eq!(stored.contract_event_id, entity.contract_event_id);
    assert_eq!(stored.transaction_hash, entity.transaction_hash);
    assert_eq!(stored.event, entity.event);
    assert_eq!(stored.data, entity.data);
    assert_eq!(stored.block_number, entity.block_number);
    assert_eq!(stored.block_hash, entity.block_hash);
    assert_eq!(stored.address, entity.address);
    assert!(stored.create_timestamp.is_some());
}

#[tokio::test]
async fn read_by_tx_hash_sees_only_confirmed_transactions() {
    let Some(db) = test_db().await else { return };
    let events = PgEventDataStore::new(db.clone());
    let transactions = PgTransactionStore::new(db.clone());

    let tx_hash = transactions
        .create(2, &serde_json::json!({"amount": "100"}))
        .await
        .unwrap();
    events.create(&unique_event(&tx_hash)).await.unwrap();

    // Still PENDING: its events must stay invisible.
    let rows = events.read_by_tx_hash(&tx_hash).await.unwrap();
    assert!(rows.is_empty());

    db.client()
        .execute(
            "UPDATE transactiondata SET status = $1 WHERE transactionhash = $2",
            &[&STATUS_CONFIRMED, &tx_hash],
        )
        .await
        .unwrap();

    let rows = events.read_by_tx_hash(&tx_hash).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].transaction_hash, tx_hash);
}

#[tokio::test]
async fn transaction_create_persists_pending_row() {
    let Some(db) = test_db().await else { return };
    let transactions = PgTransactionStore::new(db);

    let data = serde_json::json!({"recipient": "0xabc", "amount": "5"});
    let tx_hash = transactions.create(9, &data).await.unwrap();

    let row = transactions.read(&tx_hash).await.unwrap().unwrap();
    assert_eq!(row.transaction_hash, tx_hash);
    assert_eq!(row.contract_function_id, 9);
    assert_eq!(row.status, "PENDING");
    assert_eq!(row.data, data);
}

#[tokio::test]
async fn update_and_delete_resolve_without_effect() {
    let Some(db) = test_db().await else { return };
    let store = PgEventDataStore::new(db.clone());

    let entity = unique_event(&unique_tx_hash());
    store.create(&entity).await.unwrap();
    store.update().await.unwrap();
    store.delete().await.unwrap();

    let row = db
        .client()
        .query_one(
            "SELECT COUNT(*) FROM eventdata WHERE data = $1",
            &[&entity.data],
        )
        .await
        .unwrap();
    let count: i64 = row.get(0);
    assert_eq!(count, 1);
}
