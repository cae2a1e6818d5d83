use std::fmt;

/// Failures surfaced by event operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    /// A binary or collection operation mixed events from different sample spaces.
    DifferentModels,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::DifferentModels => {
                write!(f, "events belong to different probability models")
            }
        }
    }
}

impl std::error::Error for EventError {}
