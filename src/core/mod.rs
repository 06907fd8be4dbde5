pub mod command;
pub mod config;
pub mod dispatcher;
pub mod elevator;
pub mod errors;
pub mod event_scheduler;
pub mod floor_registry;
pub mod metrics;
pub mod request_ledger;
pub mod simulation_engine;
pub mod status;
pub mod types;
pub mod workload;
