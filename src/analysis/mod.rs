//! Static analysis of a single source file.
//!
//! The extractor only sees the [`SourceAnalyzer`] trait; [`PythonAnalyzer`]
//! is the implementation used by the inspector.

pub mod complexity;
pub mod halstead;
pub mod maintainability;
pub mod python;
pub mod raw;

pub use complexity::{Block, BlockKind};
pub use python::PythonAnalyzer;
pub use raw::RawMetrics;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid syntax at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
    #[error("grammar error: {0}")]
    Grammar(String),
    #[error("parser produced no tree")]
    NoTree,
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

pub trait SourceAnalyzer {
    /// Code blocks (functions, classes, methods) with their cyclomatic complexity.
    fn blocks(&self, source: &str) -> AnalysisResult<Vec<Block>>;

    /// Maintainability index in `[0, 100]`. With `multi`, multi-line strings
    /// count as comment lines.
    fn maintainability(&self, source: &str, multi: bool) -> AnalysisResult<f64>;

    fn raw(&self, source: &str) -> AnalysisResult<RawMetrics>;
}
