use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::error::SponsorMatchError;
use crate::sponsors::Row;

fn invalid(path: &Path, reason: impl Into<String>) -> SponsorMatchError {
    SponsorMatchError::InvalidTable {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

fn into_row(path: &Path, position: usize, value: Value) -> Result<Row, SponsorMatchError> {
    match value {
        Value::Object(row) => Ok(row),
        other => Err(invalid(
            path,
            format!("record {} is not an object (found {other})", position + 1),
        )),
    }
}

fn is_jsonl(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("jsonl" | "ndjson")
    )
}

/// Reads a JSON array of objects, or JSON Lines with one object per line.
pub(super) fn read_rows(path: &Path) -> anyhow::Result<Vec<Row>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read table {}", path.display()))?;

    if text.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON table {}", path.display()))?;
        return values
            .into_iter()
            .enumerate()
            .map(|(position, value)| Ok(into_row(path, position, value)?))
            .collect();
    }

    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = serde_json::from_str::<Value>(line)
            .with_context(|| format!("invalid JSONL line {} in {}", line_no + 1, path.display()))?;
        rows.push(into_row(path, rows.len(), value)?);
    }
    Ok(rows)
}

/// Writes `rows` as JSON Lines for `.jsonl`/`.ndjson` paths, otherwise as a
/// pretty JSON array.
pub(super) fn write_rows(path: &Path, rows: &[Row]) -> anyhow::Result<()> {
    let body = if is_jsonl(path) {
        let mut out = String::new();
        for row in rows {
            out.push_str(&serde_json::to_string(row)?);
            out.push('\n');
        }
        out
    } else {
        let mut out = crate::render::json::to_pretty(&rows)?;
        out.push('\n');
        out
    };

    fs::write(path, body).with_context(|| format!("failed to write table {}", path.display()))
}

#[cfg(test)]
pub(super) fn temp_path(prefix: &str, suffix: &str) -> std::path::PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "{}-{}-{}{}",
        prefix,
        std::process::id(),
        nanos,
        suffix
    ))
}
