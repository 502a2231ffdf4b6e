// Messages that flow between the UI loop and the account service
//
// Commands go out on an mpsc channel, outcomes come back on another one.
// An Outcome is moved to whoever handles it, so a completed request can only
// ever be surfaced once.

use serde::Serialize;
use std::fmt;

/// Which asynchronous operation produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ProfileUpdate,
    Logout,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ProfileUpdate => write!(f, "profile update"),
            Operation::Logout => write!(f, "logout"),
        }
    }
}

/// A failed operation as reported by the account service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct OperationError {
    pub message: String,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of one completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub operation: Operation,
    /// Success message or the error to show
    pub result: Result<String, OperationError>,
}

impl Outcome {
    pub fn success(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            result: Ok(message.into()),
        }
    }

    pub fn failure(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            result: Err(OperationError::new(message)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Field update handed to the account service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
}

/// Requests the UI can make of the account service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    UpdateProfile(UpdateProfileRequest),
    Logout,
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::UpdateProfile(_) => Operation::ProfileUpdate,
            Command::Logout => Operation::Logout,
        }
    }
}
