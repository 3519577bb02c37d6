use std::path::PathBuf;
use std::time::Duration;

/// Installer scripts run on every workspace, in this order, unless overridden.
pub const DEFAULT_SEQUENCE: [&str; 8] = [
    "zscaler.ps1",
    "splunk_uf.ps1",
    "bit9_cbac.ps1",
    "winlogbeat.ps1",
    "elastic_agent.ps1",
    "crowdstrike.ps1",
    "nessus.ps1",
    "bigfix.ps1",
];

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_DOCUMENT: &str = "AWS-RunPowerShellScript";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;
/// Captured stdout/stderr is cut to its last this-many characters in outcomes.
pub const DEFAULT_TAIL_CHARS: usize = 4000;

/// Per-command execution settings shared by the dispatcher and poller.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// SSM document used to run the script body
    pub document_name: String,
    /// Fixed delay between invocation status queries
    pub poll_interval: Duration,
    /// Deadline for a single command, measured from the start of polling
    pub command_timeout: Duration,
    /// Tail length kept for stdout/stderr in each outcome
    pub tail_chars: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            document_name: DEFAULT_DOCUMENT.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            command_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tail_chars: DEFAULT_TAIL_CHARS,
        }
    }
}

impl RunSettings {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RolloutConfig {
    pub region: String,
    /// CSV with `workspace_id,username` rows
    pub workspace_csv: PathBuf,
    /// Directory holding the `.ps1` installers
    pub scripts_dir: PathBuf,
    /// Script filenames in execution order
    pub agents: Vec<String>,
    /// Where the results CSV is written
    pub output_path: PathBuf,
    pub run: RunSettings,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            workspace_csv: PathBuf::from("workspaces.csv"),
            scripts_dir: PathBuf::from("scripts"),
            agents: DEFAULT_SEQUENCE.iter().map(|s| s.to_string()).collect(),
            output_path: PathBuf::from("ssm_results.csv"),
            run: RunSettings::default(),
        }
    }
}

impl RolloutConfig {
    pub fn new(workspace_csv: PathBuf, scripts_dir: PathBuf) -> Self {
        Self {
            workspace_csv,
            scripts_dir,
            ..Default::default()
        }
    }

    pub fn with_agents(mut self, agents: Vec<String>) -> Self {
        self.agents = agents;
        self
    }

    pub fn with_output(mut self, output_path: PathBuf) -> Self {
        self.output_path = output_path;
        self
    }

    pub fn with_run_settings(mut self, run: RunSettings) -> Self {
        self.run = run;
        self
    }
}

/// Parse a comma-separated script list, e.g. `"zscaler.ps1, nessus.ps1"`.
///
/// Entries are trimmed and empty entries dropped.
pub fn parse_agent_list(agents: &str) -> Vec<String> {
    agents
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
