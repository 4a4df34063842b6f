use thiserror::Error;

/// Why a proposed name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Empty,
    Reserved,
    ContainsSeparator,
}

impl InvalidReason {
    pub fn description(&self) -> &'static str {
        match self {
            InvalidReason::Empty => "name is empty",
            InvalidReason::Reserved => "'.' and '..' cannot be used as names",
            InvalidReason::ContainsSeparator => {
                "path separators are not allowed (entries can only be renamed within the same directory)"
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Invalid name '{name}': {}", .reason.description())]
    InvalidName { name: String, reason: InvalidReason },

    #[error("Duplicate destination name: {name}")]
    DuplicateDestination { name: String },
}
