use super::complexity::{self, Block};
use super::maintainability::{self, MaintainabilityInputs};
use super::raw::{self, RawMetrics};
use super::{halstead, AnalysisError, AnalysisResult, SourceAnalyzer};
use tree_sitter::{Node, Parser, Tree};

/// Python analyzer backed by the tree-sitter grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonAnalyzer;

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Parse `source`, rejecting trees that contain error or missing nodes.
    pub fn parse(&self, source: &str) -> AnalysisResult<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| AnalysisError::Grammar(e.to_string()))?;
        let tree = parser.parse(source, None).ok_or(AnalysisError::NoTree)?;

        let root = tree.root_node();
        if root.has_error() {
            let at = first_error(root).unwrap_or(root);
            let pos = at.start_position();
            return Err(AnalysisError::Syntax {
                line: pos.row + 1,
                column: pos.column,
            });
        }
        Ok(tree)
    }
}

impl SourceAnalyzer for PythonAnalyzer {
    fn blocks(&self, source: &str) -> AnalysisResult<Vec<Block>> {
        let tree = self.parse(source)?;
        Ok(complexity::visit_module(tree.root_node(), source.as_bytes()).blocks())
    }

    fn maintainability(&self, source: &str, multi: bool) -> AnalysisResult<f64> {
        let tree = self.parse(source)?;
        let root = tree.root_node();
        let code = source.as_bytes();

        let raw = raw::analyze(root, source);
        let comment_lines = raw.comments + if multi { raw.multi } else { 0 };
        let comment_percent = if raw.sloc == 0 {
            0.0
        } else {
            comment_lines as f64 / raw.sloc as f64 * 100.0
        };

        Ok(maintainability::compute(MaintainabilityInputs {
            halstead_volume: halstead::analyze(root, code).volume(),
            complexity: complexity::visit_module(root, code).total_complexity(),
            logical_lines: raw.lloc,
            comment_percent,
        }))
    }

    fn raw(&self, source: &str) -> AnalysisResult<RawMetrics> {
        let tree = self.parse(source)?;
        Ok(raw::analyze(tree.root_node(), source))
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}
