/// Rejections raised at the command boundary before anything reaches the core
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    FloorOutOfRange {
        floor: i64,
        total_floors: usize,
    },
    InvalidPassengerCount(i64),
    MalformedCommand(String),
    InvalidConfig(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::FloorOutOfRange { floor, total_floors } => write!(
                f,
                "floor {} is outside the building (0..{})",
                floor, total_floors
            ),
            CommandError::InvalidPassengerCount(count) => {
                write!(f, "passenger count must be positive, got {}", count)
            }
            CommandError::MalformedCommand(reason) => write!(f, "malformed command: {}", reason),
            CommandError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::MalformedCommand(err.to_string())
    }
}
