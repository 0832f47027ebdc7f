use crate::analysis::{AnalysisResult, PythonAnalyzer, SourceAnalyzer};
use crate::model::MetricSample;
use tracing::warn;

/// Turns one file's content into a [`MetricSample`].
pub struct MetricExtractor<A = PythonAnalyzer> {
    analyzer: A,
}

impl Default for MetricExtractor<PythonAnalyzer> {
    fn default() -> Self {
        Self::new(PythonAnalyzer::new())
    }
}

impl<A: SourceAnalyzer> MetricExtractor<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Extract metrics for `content`. Analysis failures are logged against
    /// `label` and yield an all-zero sample.
    pub fn extract(&self, content: &str, label: &str) -> MetricSample {
        match self.try_extract(content) {
            Ok(sample) => sample,
            Err(err) => {
                warn!(file = label, "Error in {label}: {err}");
                MetricSample::zero()
            }
        }
    }

    fn try_extract(&self, content: &str) -> AnalysisResult<MetricSample> {
        let blocks = self.analyzer.blocks(content)?;
        let complexity = if blocks.is_empty() {
            0.0
        } else {
            blocks.iter().map(|b| f64::from(b.complexity)).sum::<f64>() / blocks.len() as f64
        };
        let maintainability = self.analyzer.maintainability(content, true)?;
        let raw = self.analyzer.raw(content)?;

        Ok(MetricSample::new(complexity, maintainability, raw.loc))
    }
}
