use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::RolloutConfig;
use crate::error::Result;
use crate::inputs::{load_scripts, read_workspaces};
use crate::report::write_report;
use crate::scheduler::{Outcome, RunOrchestrator};
use crate::ssm::CommandService;

/// One complete rollout: inputs, execution, report.
pub struct Rollout {
    pub config: RolloutConfig,
    service: Arc<dyn CommandService>,
}

impl Rollout {
    pub fn new(config: RolloutConfig, service: Arc<dyn CommandService>) -> Self {
        Self { config, service }
    }

    /// Run the rollout end to end.
    ///
    /// 1. Reads workspace rows and loads scripts (fails fast on bad input)
    /// 2. Resolves which workspaces SSM manages
    /// 3. Runs every script on every managed workspace
    /// 4. Writes the results CSV
    ///
    /// # Errors
    ///
    /// Input, resolution and report-write failures end the rollout. Failures of
    /// individual commands are recorded in the returned outcomes instead.
    pub async fn run(self) -> Result<Vec<Outcome>> {
        let workspaces = read_workspaces(&self.config.workspace_csv)?;
        let jobs = load_scripts(&self.config.scripts_dir, &self.config.agents)?;

        tracing::info!(
            region = %self.config.region,
            workspaces = workspaces.len(),
            scripts = jobs.len(),
            timeout_secs = self.config.run.command_timeout.as_secs(),
            "Starting rollout"
        );

        let orchestrator = RunOrchestrator::new(self.service, self.config.run.clone());
        let outcomes = orchestrator.run(&workspaces, &jobs).await?;

        write_report(&self.config.output_path, &outcomes)?;
        tracing::info!(
            outcomes = outcomes.len(),
            summary = ?status_counts(&outcomes),
            "Completed all operations"
        );
        Ok(outcomes)
    }
}

/// Number of outcomes per status name, sorted by name.
pub fn status_counts(outcomes: &[Outcome]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for outcome in outcomes {
        *counts.entry(outcome.status.to_string()).or_insert(0) += 1;
    }
    counts
}
