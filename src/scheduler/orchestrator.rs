use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::RunSettings;
use crate::error::{Result, RolloutError};
use crate::scheduler::job::Job;
use crate::scheduler::outcome::{Outcome, Workspace};
use crate::scheduler::resolver::EndpointResolver;
use crate::ssm::CommandService;
use crate::worker::{CommandDispatcher, CompletionPoller};

/// Runs every job on every workspace, one command at a time.
///
/// Outcomes come back in workspace-major, job-minor order with exactly one
/// entry per pair. Only a failed registry lookup aborts the run; every other
/// failure is recorded in the outcome for that pair.
pub struct RunOrchestrator {
    resolver: EndpointResolver,
    dispatcher: CommandDispatcher,
    poller: CompletionPoller,
    settings: RunSettings,
}

impl RunOrchestrator {
    pub fn new(service: Arc<dyn CommandService>, settings: RunSettings) -> Self {
        Self {
            resolver: EndpointResolver::new(service.clone()),
            dispatcher: CommandDispatcher::new(service.clone(), settings.document_name.clone()),
            poller: CompletionPoller::new(service, settings.poll_interval),
            settings,
        }
    }

    pub async fn run(&self, workspaces: &[Workspace], jobs: &[Job]) -> Result<Vec<Outcome>> {
        tracing::info!(workspaces = workspaces.len(), "Resolving SSM-managed instances");
        let registered = self
            .resolver
            .resolve(workspaces.iter().map(|w| w.workspace_id.as_str()))
            .await
            .map_err(RolloutError::Resolution)?;

        let mut reported = HashSet::new();
        for workspace in workspaces {
            let id = workspace.workspace_id.as_str();
            if !is_registered(&registered, id) && reported.insert(id) {
                tracing::warn!(
                    workspace_id = id,
                    "Workspace not found as an SSM managed instance; commands will not be sent"
                );
            }
        }

        let mut outcomes = Vec::with_capacity(workspaces.len() * jobs.len());
        for (idx, workspace) in workspaces.iter().enumerate() {
            tracing::info!(
                workspace_id = %workspace.workspace_id,
                username = %workspace.username,
                position = idx + 1,
                total = workspaces.len(),
                "Processing workspace"
            );

            if !is_registered(&registered, &workspace.workspace_id) {
                tracing::info!(
                    workspace_id = %workspace.workspace_id,
                    "Skipping all agents, workspace not registered with SSM"
                );
                outcomes.extend(jobs.iter().map(|job| Outcome::not_found(workspace, job)));
                continue;
            }

            for job in jobs {
                let outcome = self.run_job(workspace, job).await;
                tracing::info!(
                    workspace_id = %outcome.workspace_id,
                    script = %outcome.agent_script,
                    status = %outcome.status,
                    response_code = %outcome.response_code,
                    "Agent finished"
                );
                if !outcome.stdout_snippet.is_empty() {
                    tracing::debug!(
                        script = %job.name,
                        stdout = %outcome.stdout_snippet,
                        "stdout tail"
                    );
                }
                if !outcome.stderr_snippet.is_empty() {
                    tracing::debug!(
                        script = %job.name,
                        stderr = %outcome.stderr_snippet,
                        "stderr tail"
                    );
                }
                outcomes.push(outcome);
            }
        }

        Ok(outcomes)
    }

    async fn run_job(&self, workspace: &Workspace, job: &Job) -> Outcome {
        let instance_id = workspace.workspace_id.as_str();
        let comment = job.comment();
        tracing::info!(workspace_id = instance_id, script = %job.name, "Sending command");

        let command_id = match self
            .dispatcher
            .dispatch(instance_id, &job.body, Some(comment.as_str()))
            .await
        {
            Ok(command_id) => command_id,
            Err(e) => {
                return Outcome::dispatch_failed(workspace, job, &e, self.settings.tail_chars);
            }
        };

        let result = self
            .poller
            .poll(&command_id, instance_id, self.settings.command_timeout)
            .await;
        Outcome::completed(
            workspace,
            job,
            &command_id,
            result,
            self.settings.tail_chars,
        )
    }
}

/// Absent ids count as unreachable.
fn is_registered(registered: &HashMap<String, bool>, workspace_id: &str) -> bool {
    registered.get(workspace_id).copied().unwrap_or(false)
}
