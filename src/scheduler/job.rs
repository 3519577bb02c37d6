use std::convert::Infallible;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// One installer script to run on every reachable workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub body: String,
}

impl Job {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Audit comment attached to the SSM command.
    pub fn comment(&self) -> String {
        format!("install-{}", self.name)
    }
}

/// Status of one (workspace, job) pair.
///
/// The first group mirrors what SSM reports for a command invocation; the
/// second group is produced locally when no invocation status is available.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandStatus {
    Pending,
    InProgress,
    Delayed,
    Cancelling,
    Success,
    Failed,
    Cancelled,
    TimedOut,

    ListInvocationsFailed,
    SendCommandFailed,
    SendFailed,
    SsmNotFound,

    /// Any other status string reported by the service, kept verbatim.
    Unknown(String),
}

impl CommandStatus {
    /// Whether the service will not move this invocation any further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CommandStatus::Success
                | CommandStatus::Failed
                | CommandStatus::Cancelled
                | CommandStatus::TimedOut
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            CommandStatus::Pending => "Pending",
            CommandStatus::InProgress => "InProgress",
            CommandStatus::Delayed => "Delayed",
            CommandStatus::Cancelling => "Cancelling",
            CommandStatus::Success => "Success",
            CommandStatus::Failed => "Failed",
            CommandStatus::Cancelled => "Cancelled",
            CommandStatus::TimedOut => "TimedOut",
            CommandStatus::ListInvocationsFailed => "ListInvocationsFailed",
            CommandStatus::SendCommandFailed => "SendCommandFailed",
            CommandStatus::SendFailed => "SendFailed",
            CommandStatus::SsmNotFound => "SSMNotFound",
            CommandStatus::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Pending" => CommandStatus::Pending,
            "InProgress" => CommandStatus::InProgress,
            "Delayed" => CommandStatus::Delayed,
            "Cancelling" => CommandStatus::Cancelling,
            "Success" => CommandStatus::Success,
            "Failed" => CommandStatus::Failed,
            "Cancelled" => CommandStatus::Cancelled,
            "TimedOut" => CommandStatus::TimedOut,
            "ListInvocationsFailed" => CommandStatus::ListInvocationsFailed,
            "SendCommandFailed" => CommandStatus::SendCommandFailed,
            "SendFailed" => CommandStatus::SendFailed,
            "SSMNotFound" => CommandStatus::SsmNotFound,
            other => CommandStatus::Unknown(other.to_string()),
        })
    }
}

impl From<&str> for CommandStatus {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl Serialize for CommandStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
