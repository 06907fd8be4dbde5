use super::elevator::Elevator;
use super::floor_registry::Floor;
use super::metrics::Metrics;
use super::request_ledger::Request;
use super::types::Tick;
use serde::{Deserialize, Serialize};

/// Read-only snapshot of the whole system for broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub tick: Tick,
    pub elevators: Vec<Elevator>,
    pub floors: Vec<Floor>,
    pub metrics: Metrics,
    pub is_auto_generating: bool,
}

/// Status snapshot plus the request ledger, as pushed to viewers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullState {
    #[serde(flatten)]
    pub status: SystemStatus,
    pub requests: Vec<Request>,
}

impl SystemStatus {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FullState {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
