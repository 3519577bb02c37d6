use serde::Serialize;

use crate::error::DispatchError;
use crate::scheduler::job::{CommandStatus, Job};
use crate::worker::PollResult;

/// Workspace row as read from the input CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub workspace_id: String,
    pub username: String,
}

impl Workspace {
    pub fn new(workspace_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            username: username.into(),
        }
    }
}

/// Final record for one (workspace, job) pair. One per pair, always.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub workspace_id: String,
    pub username: String,
    pub agent_script: String,
    pub status: CommandStatus,
    pub response_code: String,
    pub stdout_snippet: String,
    pub stderr_snippet: String,
    pub command_id: String,
}

impl Outcome {
    fn blank(workspace: &Workspace, job: &Job, status: CommandStatus) -> Self {
        Self {
            workspace_id: workspace.workspace_id.clone(),
            username: workspace.username.clone(),
            agent_script: job.name.clone(),
            status,
            response_code: String::new(),
            stdout_snippet: String::new(),
            stderr_snippet: String::new(),
            command_id: String::new(),
        }
    }

    /// Workspace is not an SSM managed instance; nothing was sent.
    pub fn not_found(workspace: &Workspace, job: &Job) -> Self {
        Self::blank(workspace, job, CommandStatus::SsmNotFound)
    }

    pub fn dispatch_failed(
        workspace: &Workspace,
        job: &Job,
        error: &DispatchError,
        tail_chars: usize,
    ) -> Self {
        Self {
            stderr_snippet: tail(&error.to_string(), tail_chars),
            ..Self::blank(workspace, job, error.status())
        }
    }

    pub fn completed(
        workspace: &Workspace,
        job: &Job,
        command_id: &str,
        result: PollResult,
        tail_chars: usize,
    ) -> Self {
        Self {
            response_code: result.response_code,
            stdout_snippet: tail(&result.stdout, tail_chars),
            stderr_snippet: tail(&result.stderr, tail_chars),
            command_id: command_id.to_string(),
            ..Self::blank(workspace, job, result.status)
        }
    }
}

/// Last `max_chars` characters of `text`, or all of it when shorter.
pub fn tail(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    match text.char_indices().rev().nth(max_chars - 1) {
        Some((start, _)) => text[start..].to_string(),
        None => text.to_string(),
    }
}
