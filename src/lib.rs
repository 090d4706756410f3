pub mod config;
pub mod error;
pub mod ingest;
pub mod query;
pub mod state;
pub mod types;
