use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::scheduler::CommandStatus;
use crate::ssm::{CommandService, Invocation};

/// What the poller observed for one command. Output is untruncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    pub status: CommandStatus,
    pub response_code: String,
    pub stdout: String,
    pub stderr: String,
}

impl PollResult {
    fn pending() -> Self {
        Self {
            status: CommandStatus::Pending,
            response_code: String::new(),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Adopt the invocation's status and first plugin's output.
    fn observe(&mut self, invocation: &Invocation) {
        self.status = invocation
            .status
            .as_deref()
            .unwrap_or("Unknown")
            .into();

        if let Some(plugin) = invocation.plugins.first() {
            self.response_code = plugin
                .response_code
                .map(|code| code.to_string())
                .unwrap_or_default();
            self.stdout = plugin.output.clone().unwrap_or_default();
            self.stderr = plugin.standard_error.clone().unwrap_or_default();
        }
    }
}

/// Polls a submitted command at a fixed interval until it reaches a terminal
/// status or the deadline passes.
///
/// Status flow:
/// - starts `Pending`
/// - each tick: sleep `interval`, then list invocations
/// - a failed query ends polling with `ListInvocationsFailed`
/// - no record yet keeps the current status
/// - `Success`, `Failed`, `Cancelled`, `TimedOut` end polling
/// - running out of time without a terminal status forces `TimedOut`
#[derive(Clone)]
pub struct CompletionPoller {
    service: Arc<dyn CommandService>,
    interval: Duration,
}

impl CompletionPoller {
    pub fn new(service: Arc<dyn CommandService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    pub async fn poll(&self, command_id: &str, instance_id: &str, timeout: Duration) -> PollResult {
        let deadline = Instant::now() + timeout;
        let mut result = PollResult::pending();

        while Instant::now() < deadline {
            tokio::time::sleep(self.interval).await;

            let invocations = match self.service.list_invocations(command_id, instance_id).await {
                Ok(invocations) => invocations,
                Err(e) => {
                    tracing::warn!(
                        command_id,
                        instance_id,
                        error = %e,
                        "ListCommandInvocations failed"
                    );
                    result.status = CommandStatus::ListInvocationsFailed;
                    result.stderr = e.to_string();
                    return result;
                }
            };

            let Some(invocation) = invocations.first() else {
                continue;
            };

            result.observe(invocation);
            tracing::trace!(command_id, instance_id, status = %result.status, "Polled invocation");

            if result.status.is_terminal() {
                return result;
            }
        }

        tracing::warn!(
            command_id,
            instance_id,
            last_status = %result.status,
            timeout_secs = timeout.as_secs(),
            "Command did not finish before deadline"
        );
        result.status = CommandStatus::TimedOut;
        result
    }
}
