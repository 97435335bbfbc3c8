mod contract;
mod event_data;
mod transaction_data;
mod webhook_data;

pub use contract::{ContractStore, PgContractStore};
pub use event_data::{EventDataStore, PgEventDataStore};
pub use transaction_data::{PgTransactionStore, TransactionStore};
pub use webhook_data::{PgWebhookStore, WebhookStore};

#[cfg(test)]
pub use contract::MockContractStore;
#[cfg(test)]
pub use event_data::MockEventDataStore;
#[cfg(test)]
pub use transaction_data::MockTransactionStore;
#[cfg(test)]
pub use webhook_data::MockWebhookStore;
