use crate::analysis::SourceAnalyzer;
use crate::error::Result;
use crate::extract::MetricExtractor;
use crate::git::GitRepo;
use crate::model::FileHistory;
use crate::util::{file_stem, format_timestamp, is_source_path};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

const PACKAGE_MARKER: &str = "__init__";

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Format commit times in UTC instead of the local time zone.
    pub utc: bool,
    pub progress: bool,
}

/// Walk the commit log newest-first and extract metrics for every source
/// file of every commit.
///
/// Each stem's series is in commit order (newest first). Package markers and
/// empty files are skipped. `max_commits = Some(1)` yields the HEAD snapshot.
pub fn walk_history<A: SourceAnalyzer>(
    repo: &GitRepo,
    extractor: &MetricExtractor<A>,
    max_commits: Option<usize>,
    options: WalkOptions,
) -> Result<FileHistory> {
    let commits = repo.commits(max_commits)?;
    let pb = progress_bar(commits.len() as u64, options.progress);

    let mut history = FileHistory::new();
    for commit in &commits {
        let date = format_timestamp(commit.committed_at, options.utc)?;
        debug!(commit = %commit.id, %date, "inspecting commit");

        for file in repo.tree_files(commit.id)? {
            if !is_source_path(&file.path) {
                continue;
            }
            let stem = file_stem(file.name());
            if stem == PACKAGE_MARKER {
                continue;
            }
            let text = repo.read_text(file.id)?;
            let content = strip_final_newline(&text);
            if content.is_empty() {
                continue;
            }

            let sample = extractor.extract(content, &stem).with_date(date.as_str());
            history.push(&stem, sample);
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    debug!(files = history.len(), commits = commits.len(), "history walk finished");
    Ok(history)
}

/// Blob text with at most one trailing newline removed, the form metrics are
/// computed on.
fn strip_final_newline(content: &str) -> &str {
    content.strip_suffix('\n').unwrap_or(content)
}

fn progress_bar(len: u64, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("Inspecting commits...");
    pb
}
