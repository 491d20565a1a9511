mod builder;
mod classify;
mod mermaid;
mod model;

pub use builder::FlowGraphBuilder;
pub use classify::{Classifier, StatementKind};
pub use mermaid::{MermaidConfig, MermaidGenerator};
pub use model::{Anchor, EdgeStyle, FlowEdge, FlowGraph, FlowNode, NodeKind};
