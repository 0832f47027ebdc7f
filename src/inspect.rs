use crate::aggregate::{aggregate, history_timeline};
use crate::analysis::SourceAnalyzer;
use crate::error::Result;
use crate::extract::MetricExtractor;
use crate::git::GitRepo;
use crate::history::{walk_history, WalkOptions};
use crate::model::{FileHistory, InspectOutput, MetricSample, SCHEMA_VERSION};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    pub inspect_history: bool,
    /// Most recent commits to inspect; zero or less walks the whole log.
    pub max_history_count: i64,
    pub utc: bool,
    pub progress: bool,
}

impl InspectOptions {
    pub fn history_limit(&self) -> Option<usize> {
        usize::try_from(self.max_history_count)
            .ok()
            .filter(|&n| n > 0)
    }

    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            utc: self.utc,
            progress: self.progress,
        }
    }
}

/// Everything one inspection run computed.
#[derive(Debug, Clone)]
pub struct InspectionReport {
    pub repository_path: PathBuf,
    /// Weighted aggregate over `metrics_by_file`.
    pub metrics: MetricSample,
    /// One sample per source file at HEAD, labelled with its stem.
    pub metrics_by_file: Vec<MetricSample>,
    pub files_history: FileHistory,
    /// Per-date aggregates, newest first.
    pub history_metrics: Vec<MetricSample>,
    pub history_inspected: bool,
    pub history_limit: Option<usize>,
}

pub fn inspect<P: AsRef<Path>>(
    project_directory: P,
    options: &InspectOptions,
) -> Result<InspectionReport> {
    inspect_with(project_directory, options, &MetricExtractor::default())
}

pub fn inspect_with<P: AsRef<Path>, A: SourceAnalyzer>(
    project_directory: P,
    options: &InspectOptions,
    extractor: &MetricExtractor<A>,
) -> Result<InspectionReport> {
    let repo = GitRepo::open(Some(project_directory.as_ref()))?;
    info!(repository = %repo.path().display(), "inspecting project");

    let current = walk_history(&repo, extractor, Some(1), options.walk_options())?;
    let metrics_by_file: Vec<MetricSample> = current
        .iter()
        .filter_map(|series| {
            series
                .samples
                .first()
                .map(|s| s.clone().with_file_name(series.stem.as_str()))
        })
        .collect();
    let metrics = aggregate(&metrics_by_file);

    let history_limit = options.history_limit();
    let (files_history, history_metrics) = if options.inspect_history {
        let history = walk_history(&repo, extractor, history_limit, options.walk_options())?;
        let timeline = history_timeline(&history);
        info!(
            files = history.len(),
            dates = timeline.len(),
            "history inspected"
        );
        (history, timeline)
    } else {
        (FileHistory::new(), Vec::new())
    };

    Ok(InspectionReport {
        repository_path: repo.path().to_path_buf(),
        metrics,
        metrics_by_file,
        files_history,
        history_metrics,
        history_inspected: options.inspect_history,
        history_limit,
    })
}

impl InspectionReport {
    /// Write the CSV reports under `output_directory`.
    pub fn export<P: AsRef<Path>>(&self, output_directory: P) -> Result<()> {
        crate::report::write_reports(self, output_directory.as_ref())
    }

    pub fn to_output(&self) -> InspectOutput {
        InspectOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            repository_path: self.repository_path.to_string_lossy().to_string(),
            history_inspected: self.history_inspected,
            max_history_count: self.history_limit,
            metrics: self.metrics.clone(),
            metrics_by_file: self.metrics_by_file.clone(),
            files_history: self.files_history.iter().cloned().collect(),
            history_metrics: self.history_metrics.clone(),
        }
    }

    /// The JSON envelope, pretty-printed.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_output())?)
    }
}
