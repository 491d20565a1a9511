use serde::{Deserialize, Serialize};

/// Visual category of a flow node; the serializer maps each one to a shape
/// and a style class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Default,
    Process,
    Decision,
    Terminator,
    SwitchHeader,
    ExceptionBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeStyle {
    Solid,
    Dashed,
}

/// Insertion parent for a statement: the synthetic start marker or a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Start,
    Node(usize),
}

/// One box/shape in the output graph. Immutable once created; `label` holds
/// the raw text and is sanitized by the serializer at emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: usize,
    pub label: String,
    pub kind: NodeKind,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: Anchor,
    pub to: usize,
    pub tag: Option<String>,
    pub style: EdgeStyle,
}

/// The node/edge arena produced by one synthesis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}
