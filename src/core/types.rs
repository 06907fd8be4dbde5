use serde::{Deserialize, Serialize};

/// Stable elevator identifier, equal to the car's index in the fleet
pub type ElevatorId = usize;

/// Floor index in `0..total_floors`
pub type FloorIndex = usize;

/// Simulation time in ticks
pub type Tick = u64;

/// Direction of travel of an elevator car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Idle
    }
}

/// Direction requested by a passenger waiting at a floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Up,
    Down,
}

impl From<CallDirection> for Direction {
    fn from(direction: CallDirection) -> Self {
        match direction {
            CallDirection::Up => Direction::Up,
            CallDirection::Down => Direction::Down,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Idle => write!(f, "idle"),
        }
    }
}

impl std::fmt::Display for CallDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Direction::from(*self).fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open,
    Closed,
}

impl Default for DoorState {
    fn default() -> Self {
        DoorState::Closed
    }
}
