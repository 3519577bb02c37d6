use std::path::Path;

use crate::error::{Result, RolloutError};
use crate::scheduler::Job;

/// Load `scripts_dir/<name>` for every name, keeping the given order.
pub fn load_scripts<S: AsRef<str>>(scripts_dir: &Path, sequence: &[S]) -> Result<Vec<Job>> {
    sequence
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let path = scripts_dir.join(name);
            if !path.is_file() {
                return Err(RolloutError::ScriptNotFound(path));
            }
            let body = std::fs::read_to_string(&path)
                .map_err(|source| RolloutError::ScriptRead { path, source })?;
            tracing::debug!(script = name, bytes = body.len(), "Loaded script");
            Ok(Job::new(name, body))
        })
        .collect()
}
