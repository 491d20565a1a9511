mod flow;
mod includes;
mod label;
mod normalizer;
mod visualizer;

pub use flow::{
    Anchor, Classifier, EdgeStyle, FlowEdge, FlowGraph, FlowGraphBuilder, FlowNode, MermaidConfig,
    MermaidGenerator, NodeKind, StatementKind,
};
pub use includes::{
    Include, IncludeGraphConfig, IncludeGraphGenerator, IncludeKind, IncludeScanner, SourceFile,
};
pub use label::{extract_condition, sanitize};
pub use normalizer::{Statement, StatementStream, statements};
pub use visualizer::{FlowVisualizer, VisualizationResult, visualize_file, visualize_source};

/// Turns one source text into a Mermaid flowchart.
pub fn flowchart_gen(source: &str) -> String {
    let mut builder = FlowGraphBuilder::new();
    for statement in statements(source) {
        builder.consume(&statement);
    }
    let graph = builder.finish();

    MermaidGenerator::new().generate_mermaid(&graph)
}

/// Turns a set of source files into a Mermaid include-dependency graph.
pub fn include_graph_gen(files: &[SourceFile]) -> String {
    IncludeGraphGenerator::new().generate_mermaid(files)
}
