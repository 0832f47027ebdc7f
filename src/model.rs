use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Metrics measured for one file at one commit, or an aggregate of several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub ciclomatic_complexity: f64,
    pub maintainability: f64,
    pub lines_of_code: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl MetricSample {
    pub fn new(ciclomatic_complexity: f64, maintainability: f64, lines_of_code: u64) -> Self {
        Self {
            ciclomatic_complexity,
            maintainability,
            lines_of_code,
            file_name: None,
            date: None,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0)
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSeries {
    pub stem: String,
    pub samples: Vec<MetricSample>,
}

/// Per-file sample series keyed by file stem, in first-seen order.
///
/// Samples inside a series keep the order they were pushed in, which for a
/// history walk is newest commit first.
#[derive(Debug, Clone, Default)]
pub struct FileHistory {
    series: Vec<FileSeries>,
    index: HashMap<String, usize>,
}

impl FileHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stem: &str, sample: MetricSample) {
        match self.index.get(stem) {
            Some(&i) => self.series[i].samples.push(sample),
            None => {
                self.index.insert(stem.to_string(), self.series.len());
                self.series.push(FileSeries {
                    stem: stem.to_string(),
                    samples: vec![sample],
                });
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileSeries> {
        self.series.iter()
    }

    /// Every sample of every series.
    pub fn samples(&self) -> impl Iterator<Item = &MetricSample> {
        self.series.iter().flat_map(|s| s.samples.iter())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub history_inspected: bool,
    pub max_history_count: Option<usize>,
    pub metrics: MetricSample,
    pub metrics_by_file: Vec<MetricSample>,
    pub files_history: Vec<FileSeries>,
    pub history_metrics: Vec<MetricSample>,
}
