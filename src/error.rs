use std::path::PathBuf;

use thiserror::Error;

use crate::scheduler::CommandStatus;

/// Failure reported by the remote-execution service or its transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation}: {message}")]
pub struct ServiceError {
    pub operation: &'static str,
    pub message: String,
}

impl ServiceError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// A single send attempt that did not yield a command handle.
///
/// Never fatal: the orchestrator turns it into an outcome row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("SendCommand for {0} returned no command id")]
    MissingCommandId(String),
}

impl DispatchError {
    /// Status recorded in the outcome for this failure.
    pub fn status(&self) -> CommandStatus {
        match self {
            DispatchError::Service(_) => CommandStatus::SendCommandFailed,
            DispatchError::MissingCommandId(_) => CommandStatus::SendFailed,
        }
    }
}

/// Errors that end a rollout before a complete report exists.
#[derive(Error, Debug)]
pub enum RolloutError {
    #[error("Failed to read CSV {path}: {reason}")]
    WorkspaceCsv { path: PathBuf, reason: String },

    #[error("No workspace rows found in {0}")]
    NoWorkspaces(PathBuf),

    #[error("Script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("Failed to read script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list SSM instances: {0}")]
    Resolution(#[source] ServiceError),

    #[error("Failed to write results CSV {path}: {reason}")]
    ReportWrite { path: PathBuf, reason: String },
}

impl RolloutError {
    /// Process exit code for the stage that failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            RolloutError::WorkspaceCsv { .. } | RolloutError::NoWorkspaces(_) => 2,
            RolloutError::ScriptNotFound(_) | RolloutError::ScriptRead { .. } => 3,
            RolloutError::Resolution(_) => 4,
            RolloutError::ReportWrite { .. } => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, RolloutError>;
