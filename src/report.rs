use std::io::Write;
use std::path::Path;

use crate::error::{Result, RolloutError};
use crate::scheduler::Outcome;

/// Column order of the results CSV. Matches the field order of [`Outcome`].
pub const REPORT_COLUMNS: [&str; 8] = [
    "workspace_id",
    "username",
    "agent_script",
    "status",
    "response_code",
    "stdout_snippet",
    "stderr_snippet",
    "command_id",
];

pub fn write_report(path: &Path, outcomes: &[Outcome]) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| report_error(path, e))?;
    write_outcomes(file, outcomes).map_err(|e| report_error(path, e))?;
    tracing::info!(path = %path.display(), rows = outcomes.len(), "Wrote results");
    Ok(())
}

/// Serialize outcomes as CSV. The header row is written even with no outcomes.
pub fn write_outcomes<W: Write>(writer: W, outcomes: &[Outcome]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(REPORT_COLUMNS)?;
    for outcome in outcomes {
        writer.serialize(outcome)?;
    }
    writer.flush()?;
    Ok(())
}

fn report_error(path: &Path, reason: impl std::fmt::Display) -> RolloutError {
    RolloutError::ReportWrite {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
