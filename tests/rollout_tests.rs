
use std::path::Path;

use agent_rollout::config::RolloutConfig;
use agent_rollout::error::RolloutError;
use agent_rollout::report::REPORT_COLUMNS;
use agent_rollout::rollout::Rollout;
use agent_rollout::scheduler::CommandStatus;
use test_harness::{test_settings, FakeCommandService, Step};

/// Lay out a workspace CSV and a scripts directory under `dir`.
fn write_inputs(dir: &Path, csv: &str, scripts: &[(&str, &str)]) -> RolloutConfig {
    let csv_path = dir.join("workspaces.csv");
    std::fs::write(&csv_path, csv).unwrap();

    let scripts_dir = dir.join("scripts");
    std::fs::create_dir(&scripts_dir).unwrap();
    for (name, body) in scripts {
        std::fs::write(scripts_dir.join(name), body).unwrap();
    }

    RolloutConfig::new(csv_path, scripts_dir)
        .with_agents(scripts.iter().map(|(name, _)| name.to_string()).collect())
        .with_output(dir.join("ssm_results.csv"))
        .with_run_settings(test_settings())
}

#[tokio::test(start_paused = true)]
async fn test_rollout_writes_report_for_every_pair() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "workspace_id,username\nws-1,alice\nws-2,bob\n",
        &[
            ("zscaler.ps1", "Install-Zscaler"),
            ("nessus.ps1", "Install-Nessus"),
        ],
    );
    let output_path = config.output_path.clone();

    let service = FakeCommandService::new()
        .with_registered(&["ws-1"])
        .with_timeline(
            "Install-Nessus",
            vec![Step::Output {
                status: "Failed",
                response_code: 1603,
                stdout: String::new(),
                stderr: "msiexec returned 1603".to_string(),
            }],
        )
        .into_arc();

    let outcomes = Rollout::new(config, service.clone()).run().await.unwrap();
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0].status, CommandStatus::Success);
    assert_eq!(outcomes[1].status, CommandStatus::Failed);
    assert_eq!(outcomes[2].status, CommandStatus::SsmNotFound);
    assert_eq!(outcomes[3].status, CommandStatus::SsmNotFound);

    let sent = service.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].script, "Install-Zscaler");
    assert_eq!(sent[1].script, "Install-Nessus");

    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, REPORT_COLUMNS);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[1].iter().collect::<Vec<_>>(),
        vec![
            "ws-1",
            "alice",
            "nessus.ps1",
            "Failed",
            "1603",
            "",
            "msiexec returned 1603",
            sent[1].command_id.as_str(),
        ]
    );
    assert_eq!(&rows[2][0], "ws-2");
    assert_eq!(&rows[2][1], "bob");
    assert_eq!(&rows[2][3], "SSMNotFound");
}

#[tokio::test(start_paused = true)]
async fn test_rollout_missing_script_fails_before_any_call() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "workspace_id,username\nws-1,alice\n",
        &[("zscaler.ps1", "Install-Zscaler")],
    )
    .with_agents(vec!["zscaler.ps1".to_string(), "bigfix.ps1".to_string()]);
    let output_path = config.output_path.clone();
    let service = FakeCommandService::new()
        .with_registered(&["ws-1"])
        .into_arc();

    let err = Rollout::new(config, service.clone()).run().await.unwrap_err();

    assert!(matches!(err, RolloutError::ScriptNotFound(_)));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(service.describe_calls(), 0);
    assert!(!output_path.exists());
}

#[tokio::test(start_paused = true)]
async fn test_rollout_empty_csv_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "workspace_id,username\n",
        &[("zscaler.ps1", "Install-Zscaler")],
    );
    let service = FakeCommandService::new().into_arc();

    let err = Rollout::new(config, service.clone()).run().await.unwrap_err();

    assert!(matches!(err, RolloutError::NoWorkspaces(_)));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_rollout_resolution_failure_writes_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "workspace_id,username\nws-1,alice\n",
        &[("zscaler.ps1", "Install-Zscaler")],
    );
    let output_path = config.output_path.clone();
    let service = FakeCommandService::new()
        .with_describe_error("ExpiredTokenException")
        .into_arc();

    let err = Rollout::new(config, service.clone()).run().await.unwrap_err();

    assert_eq!(err.exit_code(), 4);
    assert!(!output_path.exists());
}

#[tokio::test(start_paused = true)]
async fn test_rollout_report_failure_after_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "workspace_id,username\nws-1,alice\n",
        &[("zscaler.ps1", "Install-Zscaler")],
    )
    .with_output(dir.path().join("no-such-dir").join("out.csv"));
    let service = FakeCommandService::new()
        .with_registered(&["ws-1"])
        .into_arc();

    let err = Rollout::new(config, service.clone()).run().await.unwrap_err();

    assert!(matches!(err, RolloutError::ReportWrite { .. }));
    assert_eq!(err.exit_code(), 5);
    // Every command already ran before the report failed
    assert_eq!(service.sent().len(), 1);
}
