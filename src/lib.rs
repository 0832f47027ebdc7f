//! Code quality metrics (cyclomatic complexity, maintainability index and
//! lines of code) for the Python sources of a git repository, at HEAD and
//! across its commit history, written out as CSV reports.

pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod error;
pub mod extract;
pub mod git;
pub mod history;
pub mod inspect;
pub mod model;
pub mod output;
pub mod report;
pub mod util;

pub use aggregate::{aggregate, history_timeline};
pub use error::{InspectError, Result};
pub use extract::MetricExtractor;
pub use history::walk_history;
pub use inspect::{inspect, inspect_with, InspectOptions, InspectionReport};
pub use model::{FileHistory, MetricSample};
