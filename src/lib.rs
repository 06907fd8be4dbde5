pub mod core;

// Re-export commonly used types
pub use crate::core::command::ControlCommand;
pub use crate::core::config::{PeakConfig, PeakScenarioUpdate, SimulationConfig};
pub use crate::core::errors::CommandError;
pub use crate::core::metrics::{Metrics, MetricsRecord};
pub use crate::core::simulation_engine::{SimulationEngine, SimulationObserver};
pub use crate::core::status::{FullState, SystemStatus};
pub use crate::core::types::{CallDirection, Direction, DoorState, ElevatorId, FloorIndex, Tick};
