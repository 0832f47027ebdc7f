use std::collections::HashSet;
use tree_sitter::Node;

/// Operator and operand counts for Halstead metrics.
#[derive(Debug, Default, Clone)]
pub struct Halstead {
    operators: HashSet<String>,
    operands: HashSet<String>,
    total_operators: usize,
    total_operands: usize,
}

impl Halstead {
    pub fn vocabulary(&self) -> usize {
        self.operators.len() + self.operands.len()
    }

    pub fn length(&self) -> usize {
        self.total_operators + self.total_operands
    }

    pub fn volume(&self) -> f64 {
        let vocabulary = self.vocabulary();
        if vocabulary == 0 {
            return 0.0;
        }
        self.length() as f64 * (vocabulary as f64).log2()
    }

    fn operator(&mut self, op: &str) {
        self.total_operators += 1;
        self.operators.insert(op.to_string());
    }

    fn operand(&mut self, node: Option<Node>, code: &[u8]) {
        if let Some(text) = node.and_then(|n| n.utf8_text(code).ok()) {
            self.total_operands += 1;
            self.operands.insert(text.to_string());
        }
    }

    fn visit(&mut self, node: Node, code: &[u8]) {
        match node.kind() {
            "binary_operator" | "boolean_operator" => {
                self.field_operator(node, code);
                self.operand(node.child_by_field_name("left"), code);
                self.operand(node.child_by_field_name("right"), code);
            }
            "unary_operator" => {
                self.field_operator(node, code);
                self.operand(node.child_by_field_name("argument"), code);
            }
            "not_operator" => {
                self.operator("not");
                self.operand(node.child_by_field_name("argument"), code);
            }
            "augmented_assignment" => {
                self.field_operator(node, code);
                self.operand(node.child_by_field_name("left"), code);
                self.operand(node.child_by_field_name("right"), code);
            }
            "comparison_operator" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.is_named() {
                        if child.kind() != "comment" {
                            self.operand(Some(child), code);
                        }
                    } else if let Ok(op) = child.utf8_text(code) {
                        self.operator(op);
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, code);
        }
    }

    fn field_operator(&mut self, node: Node, code: &[u8]) {
        if let Some(op) = node
            .child_by_field_name("operator")
            .and_then(|n| n.utf8_text(code).ok())
        {
            self.operator(op);
        }
    }
}

pub fn analyze(root: Node, code: &[u8]) -> Halstead {
    let mut halstead = Halstead::default();
    halstead.visit(root, code);
    halstead
}
