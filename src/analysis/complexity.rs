use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Function,
    Method,
    Class,
}

/// A function, method or class with its cyclomatic complexity.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub name: String,
    pub kind: BlockKind,
    pub line: usize,
    pub complexity: u32,
}

#[derive(Debug, Clone)]
struct Function {
    name: String,
    line: usize,
    complexity: u32,
}

#[derive(Debug, Clone)]
struct Class {
    name: String,
    line: usize,
    methods: Vec<Function>,
    real_complexity: u32,
}

impl Class {
    /// Mean method complexity, bumped by one when there is more than one method.
    fn complexity(&self) -> u32 {
        if self.methods.is_empty() {
            return self.real_complexity;
        }
        let n = self.methods.len() as u32;
        self.real_complexity / n + u32::from(n > 1)
    }
}

/// Decision points found at one nesting level, plus the definitions found
/// below it. Function and class bodies are scored by their own visitor.
#[derive(Debug, Default)]
pub struct ComplexityVisitor {
    complexity: u32,
    functions: Vec<Function>,
    classes: Vec<Class>,
}

pub fn visit_module(root: Node, code: &[u8]) -> ComplexityVisitor {
    let mut visitor = ComplexityVisitor {
        complexity: 1,
        ..Default::default()
    };
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        visitor.visit(child, code);
    }
    visitor
}

impl ComplexityVisitor {
    fn child_visitor(node: Node, code: &[u8]) -> Self {
        let mut visitor = Self::default();
        visitor.visit(node, code);
        visitor
    }

    fn functions_complexity(&self) -> u32 {
        self.functions.iter().map(|f| f.complexity).sum()
    }

    fn classes_complexity(&self) -> u32 {
        self.classes.iter().map(|c| c.real_complexity).sum()
    }

    /// Module complexity including every function and class, used by the
    /// maintainability index.
    pub fn total_complexity(&self) -> u32 {
        self.complexity + self.functions_complexity() + self.classes_complexity()
    }

    /// Top-level functions first, then each class followed by its methods.
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks: Vec<Block> = self
            .functions
            .iter()
            .map(|f| Block {
                name: f.name.clone(),
                kind: BlockKind::Function,
                line: f.line,
                complexity: f.complexity,
            })
            .collect();

        for class in &self.classes {
            blocks.push(Block {
                name: class.name.clone(),
                kind: BlockKind::Class,
                line: class.line,
                complexity: class.complexity(),
            });
            blocks.extend(class.methods.iter().map(|m| Block {
                name: m.name.clone(),
                kind: BlockKind::Method,
                line: m.line,
                complexity: m.complexity,
            }));
        }
        blocks
    }

    fn visit(&mut self, node: Node, code: &[u8]) {
        match node.kind() {
            "function_definition" => {
                let function = visit_function(node, code);
                self.functions.push(function);
                return;
            }
            "class_definition" => {
                let class = visit_class(node, code);
                self.classes.push(class);
                return;
            }
            _ => {}
        }

        self.complexity += decision_points(node);

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, code);
        }
    }
}

fn decision_points(node: Node) -> u32 {
    match node.kind() {
        "if_statement" | "elif_clause" | "conditional_expression" => 1,
        "boolean_operator" => 1,
        "for_in_clause" | "if_clause" => 1,
        "assert_statement" => 1,
        "case_clause" => 1,
        "for_statement" | "while_statement" => {
            1 + u32::from(node.child_by_field_name("alternative").is_some())
        }
        "try_statement" => {
            let mut cursor = node.walk();
            node.children(&mut cursor)
                .filter(|c| {
                    matches!(
                        c.kind(),
                        "except_clause" | "except_group_clause" | "else_clause"
                    )
                })
                .count() as u32
        }
        _ => 0,
    }
}

fn definition_name(node: Node, code: &[u8]) -> String {
    node.child_by_field_name("name")
        .and_then(|n| n.utf8_text(code).ok())
        .unwrap_or("<anonymous>")
        .to_string()
}

fn body_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    match node.child_by_field_name("body") {
        Some(body) => {
            let mut cursor = body.walk();
            body.children(&mut cursor).collect()
        }
        None => Vec::new(),
    }
}

fn visit_function(node: Node, code: &[u8]) -> Function {
    // Closures are not counted towards the enclosing function.
    let complexity = 1 + body_children(node)
        .into_iter()
        .map(|child| ComplexityVisitor::child_visitor(child, code).complexity)
        .sum::<u32>();

    Function {
        name: definition_name(node, code),
        line: node.start_position().row + 1,
        complexity,
    }
}

fn visit_class(node: Node, code: &[u8]) -> Class {
    let mut methods = Vec::new();
    let mut real_complexity = 1;
    for child in body_children(node) {
        let visitor = ComplexityVisitor::child_visitor(child, code);
        real_complexity += visitor.complexity + visitor.functions_complexity();
        methods.extend(visitor.functions);
    }

    Class {
        name: definition_name(node, code),
        line: node.start_position().row + 1,
        methods,
        real_complexity,
    }
}
