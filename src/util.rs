use crate::error::{InspectError, Result};
use chrono::{DateTime, Local};
use std::path::Path;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const SOURCE_SUFFIX: &str = ".py";

/// Format a commit time (seconds since the epoch) at second precision.
pub fn format_timestamp(secs: i64, utc: bool) -> Result<String> {
    let dt = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| InspectError::InvalidDate(format!("Invalid timestamp: {secs}")))?;
    if utc {
        Ok(dt.format(DATE_FORMAT).to_string())
    } else {
        Ok(dt.with_timezone(&Local).format(DATE_FORMAT).to_string())
    }
}

/// File name with the last extension removed: `pkg/mod.py` -> `mod`.
pub fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn is_source_path(path: &str) -> bool {
    path.ends_with(SOURCE_SUFFIX)
}
