use super::config::{PeakConfig, PeakScenarioUpdate, SimulationConfig};
use super::errors::CommandError;
use super::simulation_engine::SimulationEngine;
use super::types::{CallDirection, FloorIndex};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Control messages accepted from remote viewers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlCommand {
    External {
        floor: i64,
        direction: CallDirection,
        #[serde(default)]
        passengers: Option<i64>,
    },
    Internal {
        floor: i64,
        #[serde(default, rename = "passengersOut")]
        passengers_out: Option<i64>,
    },
    Config {
        floors: usize,
        elevators: usize,
        frequency: f64,
    },
    ToggleAuto,
    SetPeak {
        #[serde(default)]
        config: PeakScenarioUpdate,
    },
    Reset,
}

impl ControlCommand {
    pub fn parse(message: &str) -> Result<Self, CommandError> {
        Ok(serde_json::from_str(message)?)
    }
}

fn checked_floor(floor: i64, total_floors: usize) -> Result<FloorIndex, CommandError> {
    if floor < 0 || floor as u64 >= total_floors as u64 {
        return Err(CommandError::FloorOutOfRange {
            floor,
            total_floors,
        });
    }
    Ok(floor as FloorIndex)
}

fn checked_passengers(passengers: i64) -> Result<u32, CommandError> {
    if passengers <= 0 || passengers > u32::MAX as i64 {
        return Err(CommandError::InvalidPassengerCount(passengers));
    }
    Ok(passengers as u32)
}

impl SimulationEngine {
    /// Validate a control command and apply it
    ///
    /// Request commands without a passenger count are accepted and ignored.
    pub fn apply_command(&mut self, command: ControlCommand) -> Result<(), CommandError> {
        let result = self.try_apply(command);
        if let Err(err) = &result {
            warn!("[Command] rejected: {}", err);
        }
        result
    }

    fn try_apply(&mut self, command: ControlCommand) -> Result<(), CommandError> {
        let total_floors = self.config().total_floors;
        match command {
            ControlCommand::External {
                floor,
                direction,
                passengers,
            } => {
                let floor = checked_floor(floor, total_floors)?;
                if let Some(passengers) = passengers {
                    let passengers = checked_passengers(passengers)?;
                    self.add_external_request(floor, direction, passengers);
                }
            }
            ControlCommand::Internal {
                floor,
                passengers_out,
            } => {
                let floor = checked_floor(floor, total_floors)?;
                if let Some(passengers) = passengers_out {
                    let passengers = checked_passengers(passengers)?;
                    self.add_internal_request(floor, passengers);
                }
            }
            ControlCommand::Config {
                floors,
                elevators,
                frequency,
            } => {
                let config = SimulationConfig {
                    total_floors: floors,
                    elevator_count: elevators,
                    request_frequency: frequency,
                    peak: PeakConfig::default(),
                    ..self.config().clone()
                };
                self.reconfigure(config)?;
                info!(
                    "[Command] reconfigured: {} floors, {} elevators",
                    floors, elevators
                );
            }
            ControlCommand::ToggleAuto => {
                self.toggle_auto_generation();
            }
            ControlCommand::SetPeak { config } => {
                if let Some(lobby) = config.lobby_floor {
                    checked_floor(lobby as i64, total_floors)?;
                }
                if let Some(percentage) = config.request_percentage {
                    if !(0.0..=1.0).contains(&percentage) {
                        return Err(CommandError::MalformedCommand(format!(
                            "request percentage {} is not a probability",
                            percentage
                        )));
                    }
                }
                self.set_peak_scenario(config);
            }
            ControlCommand::Reset => self.initialize_system(),
        }
        Ok(())
    }
}
