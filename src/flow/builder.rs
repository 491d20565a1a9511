use crate::label;
use crate::normalizer::Statement;

use super::classify::{Classifier, StatementKind, opens_brace};
use super::model::{Anchor, EdgeStyle, FlowEdge, FlowGraph, FlowNode, NodeKind};

/// Stack-driven state machine that turns a statement stream into a flow
/// graph. All mutable state is owned by the builder, so independent runs
/// never share anything.
pub struct FlowGraphBuilder {
    classifier: Classifier,
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    scope_stack: Vec<Anchor>,
    switch_stack: Vec<usize>,
    ignore_depth: usize,
}

impl FlowGraphBuilder {
    pub fn new() -> Self {
        FlowGraphBuilder {
            classifier: Classifier::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            scope_stack: vec![Anchor::Start],
            switch_stack: Vec::new(),
            ignore_depth: 0,
        }
    }

    /// Runs a whole statement stream through a fresh builder.
    pub fn synthesize(statements: impl IntoIterator<Item = Statement>) -> FlowGraph {
        let mut builder = FlowGraphBuilder::new();
        for statement in statements {
            builder.consume(&statement);
        }
        builder.finish()
    }

    pub fn consume(&mut self, statement: &Statement) {
        let text = statement.text.as_str();

        match self.classifier.classify(text) {
            StatementKind::TypeDecl { opens_scope } => {
                if opens_scope {
                    self.ignore_depth += 1;
                }
            }
            StatementKind::Directive => {}
            StatementKind::OpenBrace => {
                if self.ignore_depth > 0 {
                    self.ignore_depth += 1;
                }
                // Otherwise the owning control statement already pushed the scope.
            }
            StatementKind::CloseBrace => {
                if self.ignore_depth > 0 {
                    self.ignore_depth -= 1;
                } else {
                    self.close_scope();
                }
            }
            kind => {
                if self.ignore_depth > 0 {
                    // Only brace balance is tracked inside type declarations.
                    if opens_brace(text) {
                        self.ignore_depth += 1;
                    }
                    return;
                }
                self.consume_executable(kind, text, statement.line);
            }
        }
    }

    pub fn finish(self) -> FlowGraph {
        FlowGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }

    fn consume_executable(&mut self, kind: StatementKind, text: &str, line: usize) {
        match kind {
            StatementKind::Conditional => {
                let condition = label::extract_condition(text, "if");
                let id = self.add_node(NodeKind::Decision, format!("{condition} ?"), line);
                self.connect(self.parent(), id, EdgeStyle::Solid, None);
                self.scope_stack.push(Anchor::Node(id));
            }
            StatementKind::Else => {
                // The prior if-branch insertion point is abandoned.
                self.pop_scope();
                let id = self.add_node(NodeKind::Default, "else".to_string(), line);
                self.connect(self.parent(), id, EdgeStyle::Solid, None);
                self.scope_stack.push(Anchor::Node(id));
            }
            StatementKind::Switch => {
                let condition = label::extract_condition(text, "switch");
                let id =
                    self.add_node(NodeKind::SwitchHeader, format!("switch: {condition}"), line);
                self.connect(self.parent(), id, EdgeStyle::Solid, None);
                self.scope_stack.push(Anchor::Node(id));
                self.switch_stack.push(id);
            }
            StatementKind::CaseLabel { value } => {
                let target = match self.switch_stack.last() {
                    Some(&header) => Anchor::Node(header),
                    None => self.parent(),
                };
                let id = self.add_node(NodeKind::Decision, value.clone(), line);
                self.connect(target, id, EdgeStyle::Solid, Some(value));
                // Case bodies share the switch's nesting level, so the case
                // becomes the new insertion point instead of opening one.
                self.replace_top(id);
            }
            StatementKind::LoopHead { keyword } => {
                let condition = label::extract_condition(text, keyword);
                let id =
                    self.add_node(NodeKind::Decision, format!("{keyword}: {condition}"), line);
                self.connect(self.parent(), id, EdgeStyle::Solid, None);
                self.scope_stack.push(Anchor::Node(id));
            }
            StatementKind::DoHead => {
                let id = self.add_node(NodeKind::Decision, "DO loop start".to_string(), line);
                self.connect(self.parent(), id, EdgeStyle::Solid, None);
                self.scope_stack.push(Anchor::Node(id));
            }
            StatementKind::TryHead => {
                let id = self.add_node(NodeKind::ExceptionBlock, "TRY Block".to_string(), line);
                self.connect(self.parent(), id, EdgeStyle::Solid, None);
                self.scope_stack.push(Anchor::Node(id));
            }
            StatementKind::CatchHead => {
                self.pop_scope();
                let condition = label::extract_condition(text, "catch");
                let id = self.add_node(NodeKind::ExceptionBlock, condition, line);
                self.connect(self.parent(), id, EdgeStyle::Dashed, None);
                self.scope_stack.push(Anchor::Node(id));
            }
            StatementKind::Jump => {
                let id = self.add_node(NodeKind::Terminator, text.to_string(), line);
                self.connect(self.parent(), id, EdgeStyle::Solid, None);
                // Control leaves the scope; the insertion point is unchanged.
            }
            StatementKind::Other => {
                let node_kind = if text.contains('(') {
                    NodeKind::Process
                } else {
                    NodeKind::Default
                };
                let id = self.add_node(node_kind, text.to_string(), line);
                self.connect(self.parent(), id, EdgeStyle::Solid, None);
                self.replace_top(id);
            }
            // Handled in `consume`.
            StatementKind::TypeDecl { .. }
            | StatementKind::Directive
            | StatementKind::OpenBrace
            | StatementKind::CloseBrace => {}
        }
    }

    fn add_node(&mut self, kind: NodeKind, label: String, line: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FlowNode {
            id,
            label,
            kind,
            line,
        });
        id
    }

    fn connect(&mut self, from: Anchor, to: usize, style: EdgeStyle, tag: Option<String>) {
        self.edges.push(FlowEdge {
            from,
            to,
            tag,
            style,
        });
    }

    fn parent(&self) -> Anchor {
        self.scope_stack.last().copied().unwrap_or(Anchor::Start)
    }

    /// Guarded pop: the start marker at the bottom is never removed.
    fn pop_scope(&mut self) {
        if self.scope_stack.len() > 1 {
            self.scope_stack.pop();
        }
    }

    /// Scope close on `}`: pops the insertion point and, when the popped node
    /// is the open switch header, retires that switch context with it.
    fn close_scope(&mut self) {
        if self.scope_stack.len() > 1
            && let Some(Anchor::Node(id)) = self.scope_stack.pop()
            && self.switch_stack.last() == Some(&id)
        {
            self.switch_stack.pop();
        }
    }

    fn replace_top(&mut self, id: usize) {
        if let Some(top) = self.scope_stack.last_mut() {
            *top = Anchor::Node(id);
        }
    }
}

impl Default for FlowGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::statements;

    fn build(source: &str) -> FlowGraph {
        FlowGraphBuilder::synthesize(statements(source))
    }

    #[test]
    fn sequential_statements_chain_linearly() {
        let graph = build("a();\nb();\nc();\n");
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.edges[0].from, Anchor::Start);
        assert_eq!(graph.edges[0].to, 0);
        assert_eq!(graph.edges[1].from, Anchor::Node(0));
        assert_eq!(graph.edges[1].to, 1);
        assert_eq!(graph.edges[2].from, Anchor::Node(1));
        assert_eq!(graph.edges[2].to, 2);
        assert!(graph.nodes.iter().all(|n| n.kind == NodeKind::Process));
    }

    #[test]
    fn call_heuristic_separates_process_from_default() {
        let graph = build("int x = 1;\ncompute(x);\n");
        assert_eq!(graph.nodes[0].kind, NodeKind::Default);
        assert_eq!(graph.nodes[1].kind, NodeKind::Process);
    }

    #[test]
    fn statements_after_a_jump_attach_to_the_same_parent() {
        let graph = build("a();\nreturn 1;\nb();\n");
        assert_eq!(graph.nodes[1].kind, NodeKind::Terminator);
        assert_eq!(graph.edges[1].from, Anchor::Node(0));
        // The terminator did not move the insertion point.
        assert_eq!(graph.edges[2].from, Anchor::Node(0));
        assert_eq!(graph.edges[2].to, 2);
    }

    #[test]
    fn unmatched_closing_braces_are_tolerated() {
        let graph = build("}\n}\na();\n");
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.edges[0].from, Anchor::Start);
    }

    #[test]
    fn switch_context_survives_nested_scopes() {
        let source =
            "switch (n) {\ncase 1:\nif (x) {\na();\n}\ncase 2:\nb();\n}\n";
        let graph = build(source);
        let tagged: Vec<_> = graph.edges.iter().filter(|e| e.tag.is_some()).collect();
        assert_eq!(tagged.len(), 2);
        // Both cases attach to the switch header even after the nested if.
        assert!(tagged.iter().all(|e| e.from == Anchor::Node(0)));
    }

    #[test]
    fn degenerate_case_outside_switch_attaches_to_parent() {
        let graph = build("a();\ncase 5:\n");
        assert_eq!(graph.edges[1].from, Anchor::Node(0));
        assert_eq!(graph.edges[1].tag.as_deref(), Some("Case 5"));
    }

    #[test]
    fn empty_input_builds_an_empty_graph() {
        let graph = build("");
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
