//! Configuration for an elevator bank simulation
//!
//! This module provides the configuration types controlling the building,
//! the fleet, the workload generator and the peak (rush-hour) scenario.
use super::errors::CommandError;
use super::types::{CallDirection, FloorIndex};
use serde::{Deserialize, Serialize};

/// Peak/rush-hour workload bias toward one lobby floor and direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeakConfig {
    pub active: bool,
    pub lobby_floor: FloorIndex,
    /// Share of generated requests routed to the lobby while active
    pub request_percentage: f64,
    pub direction: CallDirection,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            active: false,
            lobby_floor: 0,
            request_percentage: 0.7,
            direction: CallDirection::Up,
        }
    }
}

/// Partial peak configuration, merged field by field into [`PeakConfig`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeakScenarioUpdate {
    pub active: Option<bool>,
    pub lobby_floor: Option<FloorIndex>,
    pub request_percentage: Option<f64>,
    pub direction: Option<CallDirection>,
}

impl PeakScenarioUpdate {
    /// An update that activates the scenario at `lobby_floor` in `direction`
    pub fn activate(lobby_floor: FloorIndex, direction: CallDirection) -> Self {
        Self {
            active: Some(true),
            lobby_floor: Some(lobby_floor),
            direction: Some(direction),
            ..Self::default()
        }
    }

    pub fn deactivate() -> Self {
        Self {
            active: Some(false),
            ..Self::default()
        }
    }
}

impl PeakConfig {
    /// Merge an update; `active` defaults to true when the update leaves it unset
    pub fn merge(&mut self, update: &PeakScenarioUpdate) {
        if let Some(lobby_floor) = update.lobby_floor {
            self.lobby_floor = lobby_floor;
        }
        if let Some(request_percentage) = update.request_percentage {
            self.request_percentage = request_percentage;
        }
        if let Some(direction) = update.direction {
            self.direction = direction;
        }
        self.active = update.active.unwrap_or(true);
    }
}

/// Configuration for a simulation run
///
/// Every field has a default, so a JSON config file only needs to list
/// the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub total_floors: usize,
    pub elevator_count: usize,
    pub elevator_capacity: u32,
    /// Probability that the workload generator emits a trip on a given cycle
    pub request_frequency: f64,
    /// Ticks a car keeps its doors open after an arrival
    pub door_open_ticks: u64,
    /// Generator cycles before auto-generation halts by itself
    pub generation_cycle_limit: u32,
    /// Capacity of each rolling metrics sequence
    pub metrics_window: usize,
    pub auto_generate: bool,
    /// RNG seed for deterministic workloads; entropy-seeded when absent
    pub random_seed: Option<u64>,
    pub peak: PeakConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_floors: 10,
            elevator_count: 4,
            elevator_capacity: 8,
            request_frequency: 0.3,
            door_open_ticks: 3,
            generation_cycle_limit: 100,
            metrics_window: 100,
            auto_generate: true,
            random_seed: None,
            peak: PeakConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floors(mut self, total_floors: usize) -> Self {
        self.total_floors = total_floors;
        self
    }

    pub fn with_elevators(mut self, elevator_count: usize) -> Self {
        self.elevator_count = elevator_count;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.elevator_capacity = capacity;
        self
    }

    pub fn with_request_frequency(mut self, frequency: f64) -> Self {
        self.request_frequency = frequency;
        self
    }

    pub fn with_door_open_ticks(mut self, ticks: u64) -> Self {
        self.door_open_ticks = ticks;
        self
    }

    pub fn with_auto_generation(mut self, enabled: bool) -> Self {
        self.auto_generate = enabled;
        self
    }

    pub fn with_random_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_peak(mut self, peak: PeakConfig) -> Self {
        self.peak = peak;
        self
    }

    /// Check the configuration before a system is built from it
    pub fn validate(&self) -> Result<(), CommandError> {
        if self.total_floors == 0 {
            return Err(CommandError::InvalidConfig(
                "building needs at least one floor".to_string(),
            ));
        }
        if self.elevator_capacity == 0 {
            return Err(CommandError::InvalidConfig(
                "elevator capacity must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.request_frequency) {
            return Err(CommandError::InvalidConfig(format!(
                "request frequency {} is not a probability",
                self.request_frequency
            )));
        }
        if !(0.0..=1.0).contains(&self.peak.request_percentage) {
            return Err(CommandError::InvalidConfig(format!(
                "peak request percentage {} is not a probability",
                self.peak.request_percentage
            )));
        }
        if self.metrics_window == 0 {
            return Err(CommandError::InvalidConfig(
                "metrics window must hold at least one sample".to_string(),
            ));
        }
        if self.peak.lobby_floor >= self.total_floors {
            return Err(CommandError::FloorOutOfRange {
                floor: self.peak.lobby_floor as i64,
                total_floors: self.total_floors,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.total_floors, 10);
        assert_eq!(config.elevator_count, 4);
        assert_eq!(config.elevator_capacity, 8);
        assert_eq!(config.door_open_ticks, 3);
        assert_eq!(config.generation_cycle_limit, 100);
        assert!(!config.peak.active);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::new()
            .with_floors(20)
            .with_elevators(2)
            .with_request_frequency(1.0)
            .with_random_seed(Some(7));

        assert_eq!(config.total_floors, 20);
        assert_eq!(config.elevator_count, 2);
        assert_eq!(config.request_frequency, 1.0);
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(SimulationConfig::new().with_floors(0).validate().is_err());
        assert!(SimulationConfig::new().with_capacity(0).validate().is_err());
        assert!(SimulationConfig::new()
            .with_request_frequency(1.5)
            .validate()
            .is_err());

        let mut config = SimulationConfig::new().with_floors(5);
        config.peak.lobby_floor = 5;
        assert_eq!(
            config.validate(),
            Err(CommandError::FloorOutOfRange {
                floor: 5,
                total_floors: 5
            })
        );
    }

    #[test]
    fn test_peak_merge_defaults_active() {
        let mut peak = PeakConfig::default();
        peak.merge(&PeakScenarioUpdate {
            lobby_floor: Some(3),
            ..PeakScenarioUpdate::default()
        });
        assert!(peak.active, "unspecified active flag turns the scenario on");
        assert_eq!(peak.lobby_floor, 3);
        assert_eq!(peak.request_percentage, 0.7);

        peak.merge(&PeakScenarioUpdate::deactivate());
        assert!(!peak.active);
        assert_eq!(peak.lobby_floor, 3, "deactivation keeps the other fields");
    }

    #[test]
    fn test_partial_json_config() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"total_floors": 12, "peak": {"lobbyFloor": 2}}"#).unwrap();
        assert_eq!(config.total_floors, 12);
        assert_eq!(config.elevator_count, 4);
        assert_eq!(config.peak.lobby_floor, 2);
        assert_eq!(config.peak.direction, CallDirection::Up);
    }
}
