pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod queue;
pub mod store;
pub mod webhook_probe;
