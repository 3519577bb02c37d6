use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use agent_rollout::config::{
    parse_agent_list, RolloutConfig, RunSettings, DEFAULT_DOCUMENT, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_REGION, DEFAULT_TIMEOUT_SECS,
};
use agent_rollout::rollout::{status_counts, Rollout};
use agent_rollout::scheduler::Outcome;
use agent_rollout::ssm::SsmCommandService;

#[derive(Parser, Debug)]
#[command(name = "agent-rollout")]
#[command(version)]
#[command(about = "Run PowerShell agent installers on WorkSpaces via SSM")]
struct Args {
    /// AWS region
    #[arg(long, short = 'r', env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// CSV file path (workspace_id,username)
    #[arg(long, short = 'c', env = "WORKSPACE_CSV", default_value = "workspaces.csv")]
    csv: PathBuf,

    /// Directory containing .ps1 scripts
    #[arg(long, short = 's', env = "SCRIPTS_DIR", default_value = "scripts")]
    scripts_dir: PathBuf,

    /// Comma-separated sequence of .ps1 filenames (default sequence used if omitted)
    #[arg(long, short = 'a')]
    agents: Option<String>,

    /// Timeout in seconds per SSM command
    #[arg(long, short = 't', env = "COMMAND_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Output CSV summary
    #[arg(long, short = 'o', default_value = "ssm_results.csv")]
    out: PathBuf,

    /// Seconds between invocation status checks
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    poll_interval: u64,

    /// SSM document used to run each script
    #[arg(long, default_value = DEFAULT_DOCUMENT)]
    document: String,

    /// Console summary format
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    total: usize,
    by_status: std::collections::BTreeMap<String, usize>,
    outcomes: &'a [Outcome],
}

impl Args {
    fn into_config(self) -> RolloutConfig {
        let run = RunSettings {
            document_name: self.document,
            ..RunSettings::default()
        }
        .with_timeout(Duration::from_secs(self.timeout))
        .with_poll_interval(Duration::from_secs(self.poll_interval));

        let mut config = RolloutConfig::new(self.csv, self.scripts_dir)
            .with_output(self.out)
            .with_run_settings(run);
        if let Some(agents) = self.agents.as_deref() {
            config = config.with_agents(parse_agent_list(agents));
        }
        config.region = self.region;
        config
    }
}

fn print_summary(
    outcomes: &[Outcome],
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            let output = SummaryOutput {
                total: outcomes.len(),
                by_status: status_counts(outcomes),
                outcomes,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!(
                "{:<16} {:<20} {:<22} {:<6} COMMAND ID",
                "WORKSPACE", "SCRIPT", "STATUS", "RC"
            );
            println!("{}", "-".repeat(100));
            for outcome in outcomes {
                let command_id = if outcome.command_id.is_empty() {
                    "-"
                } else {
                    outcome.command_id.as_str()
                };
                println!(
                    "{:<16} {:<20} {:<22} {:<6} {}",
                    outcome.workspace_id,
                    outcome.agent_script,
                    outcome.status,
                    outcome.response_code,
                    command_id
                );
            }
            println!();
            for (status, count) in status_counts(outcomes) {
                println!("{:<22} {}", status, count);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let format = args.format.clone();
    let config = args.into_config();
    let output_path = config.output_path.clone();

    let service = SsmCommandService::connect(&config.region).await;
    let outcomes = match Rollout::new(config, Arc::new(service)).run().await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            tracing::error!(error = %e, "Rollout failed");
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = print_summary(&outcomes, &format) {
        eprintln!("Error: failed to print summary: {}", e);
        std::process::exit(1);
    }
    eprintln!("Wrote results to {}", output_path.display());
}
