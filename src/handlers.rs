use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::models::WebhookData;
use crate::queue::{TransactionMessage, TransactionQueue};
use crate::store::{ContractStore, EventDataStore, TransactionStore, WebhookStore};
use crate::webhook_probe::WebhookProber;

#[derive(Clone)]
pub struct AppState {
    pub contracts: Arc<dyn ContractStore>,
    pub event_data: Arc<dyn EventDataStore>,
    pub transactions: Arc<dyn TransactionStore>,
    pub webhooks: Arc<dyn WebhookStore>,
    pub queue: Arc<dyn TransactionQueue>,
    pub probe: Arc<dyn WebhookProber>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(contract_info))
        .route("/events", get(contract_events))
        .route("/functions", get(contract_functions))
        .route("/tx", get(transaction_status).post(submit_transaction))
        .route("/event/data", get(event_data_by_tx))
        .route("/webhooks", put(register_webhook))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

// Every endpoint answers HTTP 200 with either envelope; clients branch on the
// numeric error code, not on the HTTP status.
fn data_response(value: Value) -> Json<Value> {
    Json(json!({ "data": value }))
}

fn error_response(code: u16, message: &str) -> Json<Value> {
    Json(json!({ "error": { "code": code, "message": message } }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[derive(Deserialize)]
struct InfoQuery {
    #[serde(rename = "contractId")]
    contract_id: Option<String>,
}

/// Aggregates the contract row with its event and function metadata, read as
/// a strict waterfall.
async fn contract_info(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Json<Value> {
    let Some(raw_id) = query.contract_id else {
        return error_response(201, "contractId is null");
    };
    let Ok(contract_id) = raw_id.parse::<i64>() else {
        return error_response(213, "error on load data");
    };

    let contract = match state.contracts.read_contract(contract_id).await {
        Ok(Some(contract)) => contract,
        Ok(None) => return error_response(212, "empty data"),
        Err(err) => {
            error!("Failed to load contract {}: {}", contract_id, err);
            return error_response(213, "error on load data");
        }
    };
    let events = match state.contracts.read_events_by_contract(contract_id).await {
        Ok(rows) => rows,
        Err(err) => {
            error!("Failed to load events for contract {}: {}", contract_id, err);
            return error_response(213, "error on load data");
        }
    };
    let functions = match state.contracts.read_functions_by_contract(contract_id).await {
        Ok(rows) => rows,
        Err(err) => {
            error!("Failed to load functions for contract {}: {}", contract_id, err);
            return error_response(213, "error on load data");
        }
    };

    data_response(json!({
        "contract": contract,
        "contractEvent": events,
        "contractFunction": functions,
    }))
}

#[derive(Deserialize)]
struct EventsQuery {
    #[serde(rename = "contractEventId")]
    contract_event_id: Option<String>,
}

async fn contract_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<Value> {
    let Some(raw_id) = query.contract_event_id else {
        return error_response(214, "contractEventId is null");
    };
    let Ok(contract_event_id) = raw_id.parse::<i64>() else {
        return error_response(213, "error on load data");
    };

    match state.contracts.read_event(contract_event_id).await {
        Ok(rows) if !rows.is_empty() => data_response(json!(rows)),
        Ok(_) => error_response(212, "empty data"),
        Err(err) => {
            error!("Failed to load contract event {}: {}", contract_event_id, err);
            error_response(213, "error on load data")
        }
    }
}

#[derive(Deserialize)]
struct FunctionsQuery {
    #[serde(rename = "contractFunctionId")]
    contract_function_id: Option<String>,
}

async fn contract_functions(
    State(state): State<AppState>,
    Query(query): Query<FunctionsQuery>,
) -> Json<Value> {
    let Some(raw_id) = query.contract_function_id else {
        return error_response(215, "contractFunctionId is null");
    };
    let Ok(contract_function_id) = raw_id.parse::<i64>() else {
        return error_response(213, "error on load data");
    };

    match state.contracts.read_function(contract_function_id).await {
        Ok(rows) if !rows.is_empty() => data_response(json!(rows)),
        Ok(_) => error_response(212, "empty data"),
        Err(err) => {
            error!("Failed to load contract function {}: {}", contract_function_id, err);
            error_response(213, "error on load data")
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitTxRequest {
    contract_id: Option<i64>,
    contract_function_id: Option<i64>,
    data: Option<Value>,
}

/// Records the invocation, hands it to the queue for asynchronous on-chain
/// submission and replies with the generated hash. Confirmation happens
/// out-of-band.
async fn submit_transaction(
    State(state): State<AppState>,
    Json(body): Json<SubmitTxRequest>,
) -> Json<Value> {
    let Some(contract_id) = body.contract_id else {
        return error_response(201, "contractId is null");
    };
    let Some(contract_function_id) = body.contract_function_id else {
        return error_response(202, "contractFunctionId is null");
    };
    let Some(data) = body.data else {
        return error_response(203, "data is null");
    };

    let tx_hash = match state.transactions.create(contract_function_id, &data).await {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to create transaction record: {}", err);
            return error_response(204, "error on send transaction");
        }
    };

    let message = TransactionMessage {
        tx_hash: tx_hash.clone(),
        contract_id,
        contract_function_id,
        data,
    };
    if let Err(err) = state.queue.publish(&message).await {
        error!("Failed to publish transaction {}: {}", tx_hash, err);
        return error_response(204, "error on send transaction");
    }

    data_response(json!({ "txHash": tx_hash }))
}

#[derive(Deserialize)]
struct TxQuery {
    #[serde(rename = "txHash")]
    tx_hash: Option<String>,
}

async fn transaction_status(
    State(state): State<AppState>,
    Query(query): Query<TxQuery>,
) -> Json<Value> {
    let Some(tx_hash) = query.tx_hash else {
        return error_response(211, "txHash is null");
    };

    match state.transactions.read(&tx_hash).await {
        Ok(Some(row)) => data_response(json!(row)),
        Ok(None) => error_response(212, "empty data"),
        Err(err) => {
            error!("Failed to load transaction {}: {}", tx_hash, err);
            error_response(213, "error on load data")
        }
    }
}

async fn event_data_by_tx(
    State(state): State<AppState>,
    Query(query): Query<TxQuery>,
) -> Json<Value> {
    let Some(tx_hash) = query.tx_hash else {
        return error_response(211, "txHash is null");
    };

    match state.event_data.read_by_tx_hash(&tx_hash).await {
        Ok(rows) if !rows.is_empty() => data_response(json!(rows)),
        Ok(_) => error_response(212, "empty data"),
        Err(err) => {
            error!("Failed to load event data for {}: {}", tx_hash, err);
            error_response(213, "error on load data")
        }
    }
}

#[derive(Deserialize)]
struct WebhookQuery {
    url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookRequest {
    contract_id: Option<i64>,
    hook: Option<String>,
    contract_function_id: Option<i64>,
    contract_event_id: Option<i64>,
}

/// Registers a webhook subscription once the callback has been verified
/// reachable. The probe target is the `url` query parameter while the stored
/// callback is the `hook` body field; upstream keeps these separate.
async fn register_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
    Json(body): Json<WebhookRequest>,
) -> Json<Value> {
    let Some(contract_id) = body.contract_id else {
        return error_response(201, "contractId is null");
    };
    let Some(hook) = body.hook else {
        return error_response(215, "empty webhook");
    };
    let Some(probe_url) = query.url else {
        return error_response(220, "webhook error, no probe url");
    };

    let status = match state.probe.probe(&probe_url).await {
        Ok(status) => status,
        Err(err) => {
            error!("Webhook probe failed for {}: {}", probe_url, err);
            return error_response(220, "webhook error, probe unreachable");
        }
    };
    if status != 200 {
        return error_response(220, &format!("webhook error, statusCode: {}", status));
    }

    let entity = WebhookData {
        contract_id,
        contract_function_id: body.contract_function_id,
        contract_event_id: body.contract_event_id,
        url: hook,
    };
    match state.webhooks.create(&entity).await {
        Ok(id) => data_response(json!({ "id": id })),
        Err(err) => {
            error!("Failed to store webhook: {}", err);
            error_response(204, "error on put webhooks")
        }
    }
}
