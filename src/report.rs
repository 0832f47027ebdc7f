use crate::error::{InspectError, Result};
use crate::inspect::InspectionReport;
use crate::model::MetricSample;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub const METRICS_CSV: &str = "metrics.csv";
pub const METRICS_BY_FILE_CSV: &str = "metrics_by_file.csv";
pub const HISTORY_CSV: &str = "history_metrics.csv";
pub const FILES_HISTORY_DIR: &str = "files_history";

const METRICS_HEADER: [&str; 3] = ["Ciclomatic_Complexity", "Maintainability", "Lines_of_Code"];
const FILE_HEADER: [&str; 5] = [
    "File",
    "Date",
    "Ciclomatic_Complexity",
    "Maintainability",
    "Lines_of_Code",
];
const DATED_HEADER: [&str; 4] = [
    "Date",
    "Ciclomatic_Complexity",
    "Maintainability",
    "Lines_of_Code",
];

#[derive(Serialize)]
struct MetricsRow {
    ciclomatic_complexity: f64,
    maintainability: f64,
    lines_of_code: u64,
}

#[derive(Serialize)]
struct FileRow<'a> {
    file: &'a str,
    date: &'a str,
    ciclomatic_complexity: f64,
    maintainability: f64,
    lines_of_code: u64,
}

#[derive(Serialize)]
struct DatedRow<'a> {
    date: &'a str,
    ciclomatic_complexity: f64,
    maintainability: f64,
    lines_of_code: u64,
}

impl From<&MetricSample> for MetricsRow {
    fn from(s: &MetricSample) -> Self {
        Self {
            ciclomatic_complexity: s.ciclomatic_complexity,
            maintainability: s.maintainability,
            lines_of_code: s.lines_of_code,
        }
    }
}

impl<'a> From<&'a MetricSample> for FileRow<'a> {
    fn from(s: &'a MetricSample) -> Self {
        Self {
            file: s.file_name.as_deref().unwrap_or(""),
            date: s.date.as_deref().unwrap_or(""),
            ciclomatic_complexity: s.ciclomatic_complexity,
            maintainability: s.maintainability,
            lines_of_code: s.lines_of_code,
        }
    }
}

impl<'a> From<&'a MetricSample> for DatedRow<'a> {
    fn from(s: &'a MetricSample) -> Self {
        Self {
            date: s.date.as_deref().unwrap_or(""),
            ciclomatic_complexity: s.ciclomatic_complexity,
            maintainability: s.maintainability,
            lines_of_code: s.lines_of_code,
        }
    }
}

/// Write every report table under `output_directory`.
///
/// Each table is attempted even when an earlier one failed; the first
/// failure is returned afterwards. Files already written are left in place.
pub fn write_reports(report: &InspectionReport, output_directory: &Path) -> Result<()> {
    let history_dir = output_directory.join(FILES_HISTORY_DIR);
    fs::create_dir_all(&history_dir)?;

    let mut first_error: Option<InspectError> = None;
    let mut attempt = |path: PathBuf, result: Result<()>| {
        if let Err(err) = result {
            error!(path = %path.display(), "failed to write report: {err}");
            first_error.get_or_insert(InspectError::Report {
                path: path.display().to_string(),
                source: Box::new(err),
            });
        } else {
            debug!(path = %path.display(), "report written");
        }
    };

    let path = output_directory.join(METRICS_CSV);
    attempt(
        path.clone(),
        write_table(&path, &METRICS_HEADER, std::iter::once(MetricsRow::from(&report.metrics))),
    );

    let path = output_directory.join(METRICS_BY_FILE_CSV);
    attempt(
        path.clone(),
        write_table(&path, &FILE_HEADER, report.metrics_by_file.iter().map(FileRow::from)),
    );

    for series in report.files_history.iter() {
        let path = history_dir.join(format!("{}.csv", series.stem));
        attempt(
            path.clone(),
            write_table(&path, &DATED_HEADER, series.samples.iter().map(DatedRow::from)),
        );
    }

    let path = output_directory.join(HISTORY_CSV);
    attempt(
        path.clone(),
        write_table(&path, &DATED_HEADER, report.history_metrics.iter().map(DatedRow::from)),
    );

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Header row first, then one record per row, even when there are no rows.
fn write_table<R, I>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(path)?);
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
