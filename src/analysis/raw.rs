use std::collections::BTreeSet;
use tree_sitter::Node;

/// Raw line counts.
///
/// `loc == sloc + blank + multi + single_comments` always holds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawMetrics {
    /// Physical lines.
    pub loc: u64,
    /// Logical lines: one per statement or clause header.
    pub lloc: u64,
    /// Source lines: everything that is not blank, comment-only or a string statement.
    pub sloc: u64,
    /// Lines carrying a comment, including trailing comments.
    pub comments: u64,
    /// Lines that hold nothing but a comment.
    pub single_comments: u64,
    /// Lines spanned by string statements (docstrings).
    pub multi: u64,
    pub blank: u64,
}

const CLAUSE_KINDS: &[&str] = &[
    "function_definition",
    "class_definition",
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "case_clause",
];

#[derive(Default)]
struct LineScan {
    comment_rows: BTreeSet<usize>,
    string_rows: BTreeSet<usize>,
    logical: u64,
}

impl LineScan {
    fn visit(&mut self, node: Node) {
        let kind = node.kind();
        if kind == "comment" {
            self.comment_rows.insert(node.start_position().row);
            return;
        }
        if (kind.ends_with("_statement") && node.is_named()) || CLAUSE_KINDS.contains(&kind) {
            self.logical += 1;
        }
        if kind == "expression_statement" && is_string_statement(node) {
            let (start, end) = (node.start_position().row, node.end_position().row);
            self.string_rows.extend(start..=end);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }
}

fn is_string_statement(node: Node) -> bool {
    node.named_child_count() == 1
        && node
            .named_child(0)
            .map(|c| matches!(c.kind(), "string" | "concatenated_string"))
            .unwrap_or(false)
}

pub fn analyze(root: Node, source: &str) -> RawMetrics {
    let mut scan = LineScan::default();
    scan.visit(root);

    let mut metrics = RawMetrics {
        lloc: scan.logical,
        comments: scan.comment_rows.len() as u64,
        ..Default::default()
    };

    for (row, line) in source.lines().enumerate() {
        metrics.loc += 1;
        let trimmed = line.trim();
        if scan.string_rows.contains(&row) {
            metrics.multi += 1;
        } else if trimmed.is_empty() {
            metrics.blank += 1;
        } else if trimmed.starts_with('#') {
            metrics.single_comments += 1;
        }
    }
    metrics.sloc = metrics.loc - metrics.blank - metrics.multi - metrics.single_comments;
    metrics
}
