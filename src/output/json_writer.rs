//! JSON report writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::Report;
use crate::error::Result;

/// Writes the report to `path` as pretty-printed JSON.
pub fn write_json(report: &Report<'_>, path: &Path) -> Result<()> {
    let json = to_json(report)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Serializes the report to a pretty-printed JSON string.
///
/// Absent first/last dates serialize as `null`; the reply-time section is
/// tagged with `"status": "not_applicable"` or `"computed"`.
pub fn to_json(report: &Report<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
