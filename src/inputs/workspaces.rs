use std::io::Read;
use std::path::Path;

use crate::error::{Result, RolloutError};
use crate::scheduler::Workspace;

const REQUIRED_HEADERS: [&str; 2] = ["workspace_id", "username"];
const ID_HEADERS: [&str; 2] = ["workspace_id", "workspaceid"];
const USER_HEADERS: [&str; 2] = ["username", "user"];

/// Read workspace rows from a CSV file with a header row.
///
/// Header names are matched case-insensitively and must include
/// `workspace_id` and `username`. Rows with an empty id are skipped.
pub fn read_workspaces(path: &Path) -> Result<Vec<Workspace>> {
    if !path.exists() {
        return Err(csv_error(path, "file not found"));
    }
    let file = std::fs::File::open(path).map_err(|e| csv_error(path, e))?;
    let rows = parse_workspaces(file, path)?;
    if rows.is_empty() {
        return Err(RolloutError::NoWorkspaces(path.to_path_buf()));
    }
    tracing::info!(path = %path.display(), count = rows.len(), "Loaded workspaces");
    Ok(rows)
}

/// Parse workspace rows from any reader. `source` is only used in errors.
pub fn parse_workspaces<R: Read>(reader: R, source: &Path) -> Result<Vec<Workspace>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(source, e))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    if !REQUIRED_HEADERS
        .iter()
        .all(|required| headers.iter().any(|h| h == required))
    {
        return Err(csv_error(
            source,
            format!("CSV must contain headers: workspace_id,username (found: {headers:?})"),
        ));
    }

    let id_col = find_column(&headers, &ID_HEADERS);
    let user_col = find_column(&headers, &USER_HEADERS);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(source, e))?;
        let workspace_id = id_col.and_then(|i| record.get(i)).unwrap_or("").trim();
        if workspace_id.is_empty() {
            continue;
        }
        let username = user_col.and_then(|i| record.get(i)).unwrap_or("").trim();
        rows.push(Workspace::new(workspace_id, username));
    }
    Ok(rows)
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h == name))
}

fn csv_error(path: &Path, reason: impl std::fmt::Display) -> RolloutError {
    RolloutError::WorkspaceCsv {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<Workspace>> {
        parse_workspaces(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn parses_rows_in_order() {
        let rows = parse("workspace_id,username\nws-1,alice\nws-2,bob\n").unwrap();
        assert_eq!(
            rows,
            vec![Workspace::new("ws-1", "alice"), Workspace::new("ws-2", "bob")]
        );
    }

    #[test]
    fn headers_are_case_insensitive_and_values_trimmed() {
        let rows = parse("Workspace_ID , UserName\n  ws-1 ,  alice \n").unwrap();
        assert_eq!(rows, vec![Workspace::new("ws-1", "alice")]);
    }

    #[test]
    fn skips_rows_without_id_and_defaults_username() {
        let rows = parse("workspace_id,username\n,alice\nws-2,\nws-3\n").unwrap();
        assert_eq!(
            rows,
            vec![Workspace::new("ws-2", ""), Workspace::new("ws-3", "")]
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let rows = parse("region,username,workspace_id\nus-east-1,carol,ws-9\n").unwrap();
        assert_eq!(rows, vec![Workspace::new("ws-9", "carol")]);
    }

    #[test]
    fn missing_headers_rejected() {
        let err = parse("id,user\nws-1,alice\n").unwrap_err();
        assert!(matches!(err, RolloutError::WorkspaceCsv { .. }));
        assert!(err.to_string().contains("workspace_id,username"));
    }

    #[test]
    fn missing_file_rejected() {
        let err = read_workspaces(Path::new("/nonexistent/workspaces.csv")).unwrap_err();
        assert!(matches!(err, RolloutError::WorkspaceCsv { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ws.csv");
        std::fs::write(&path, "workspace_id,username\n").unwrap();
        let err = read_workspaces(&path).unwrap_err();
        assert!(matches!(err, RolloutError::NoWorkspaces(_)));
    }
}
