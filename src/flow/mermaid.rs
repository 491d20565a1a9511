use crate::label;

use super::model::{Anchor, EdgeStyle, FlowEdge, FlowGraph, FlowNode, NodeKind};

#[derive(Debug, Clone)]
pub struct MermaidConfig {
    pub direction: String,
    pub include_click_bindings: bool,
    pub click_callback: String,
}

impl Default for MermaidConfig {
    fn default() -> Self {
        MermaidConfig {
            direction: "TD".to_string(),
            include_click_bindings: true,
            click_callback: "flowNodeClicked".to_string(),
        }
    }
}

/// Renders a finished flow graph as Mermaid flowchart text. The generator is
/// the only place that knows the textual syntax; node labels and edge tags
/// are sanitized here, at emission.
pub struct MermaidGenerator {
    config: MermaidConfig,
}

impl MermaidGenerator {
    pub fn new() -> Self {
        MermaidGenerator {
            config: MermaidConfig::default(),
        }
    }

    pub fn with_config(config: MermaidConfig) -> Self {
        MermaidGenerator { config }
    }

    pub fn generate_mermaid(&self, graph: &FlowGraph) -> String {
        let mut out = String::new();

        out.push_str(&format!("graph {};\n", self.config.direction));
        for (class, style) in STYLE_CLASSES {
            out.push_str(&format!("classDef {class} {style};\n"));
        }

        // The first recorded edge of a non-empty graph is the synthetic
        // root edge; it is emitted ahead of the node declarations.
        let (root_edge, rest) = match graph.edges.split_first() {
            Some((first, rest)) => (Some(first), rest),
            None => (None, &graph.edges[..]),
        };
        if let Some(edge) = root_edge {
            out.push_str(&self.render_edge(edge));
        }
        for node in &graph.nodes {
            out.push_str(&self.render_node(node));
        }
        for edge in rest {
            out.push_str(&self.render_edge(edge));
        }
        if self.config.include_click_bindings {
            for node in &graph.nodes {
                out.push_str(&format!(
                    "click N{} call {}({});\n",
                    node.id, self.config.click_callback, node.line
                ));
            }
        }
        out
    }

    fn render_node(&self, node: &FlowNode) -> String {
        let text = label::sanitize(&node.label);
        let (open, close) = shape_delimiters(node.kind);
        format!(
            "N{}{}\"{}\"{}:::{};\n",
            node.id,
            open,
            text,
            close,
            style_class(node.kind)
        )
    }

    fn render_edge(&self, edge: &FlowEdge) -> String {
        let arrow = match (&edge.tag, edge.style) {
            (None, EdgeStyle::Solid) => "-->".to_string(),
            (None, EdgeStyle::Dashed) => "-.->".to_string(),
            (Some(tag), EdgeStyle::Solid) => format!("-- {} -->", label::sanitize(tag)),
            (Some(tag), EdgeStyle::Dashed) => format!("-. {} .->", label::sanitize(tag)),
        };
        format!("{} {} N{};\n", anchor_name(edge.from), arrow, edge.to)
    }
}

impl Default for MermaidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn anchor_name(anchor: Anchor) -> String {
    match anchor {
        Anchor::Start => "Start".to_string(),
        Anchor::Node(id) => format!("N{id}"),
    }
}

const STYLE_CLASSES: [(&str, &str); 6] = [
    (
        "default",
        "fill:#f4f4f4,stroke:#4a4a4a,stroke-width:1px,color:#1a1a1a,rx:4,ry:4",
    ),
    (
        "process",
        "fill:#dae8fc,stroke:#6c8ebf,stroke-width:1px,color:#1a1a1a,rx:4,ry:4",
    ),
    (
        "decision",
        "fill:#ffe6cc,stroke:#d79b00,stroke-width:1px,color:#1a1a1a,rx:4,ry:4",
    ),
    (
        "terminator",
        "fill:#f8cecc,stroke:#b85450,stroke-width:2px,color:#1a1a1a,rx:12,ry:12",
    ),
    (
        "switchNode",
        "fill:#e1d5e7,stroke:#9673a6,stroke-width:1px,color:#1a1a1a,rx:4,ry:4",
    ),
    (
        "catchNode",
        "fill:#fff2cc,stroke:#d6b656,stroke-width:1px,color:#1a1a1a,rx:4,ry:4",
    ),
];

fn style_class(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Default => "default",
        NodeKind::Process => "process",
        NodeKind::Decision => "decision",
        NodeKind::Terminator => "terminator",
        NodeKind::SwitchHeader => "switchNode",
        NodeKind::ExceptionBlock => "catchNode",
    }
}

fn shape_delimiters(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Default | NodeKind::Process => ("[", "]"),
        NodeKind::Decision => ("{", "}"),
        NodeKind::Terminator => ("((", "))"),
        NodeKind::SwitchHeader => ("{{", "}}"),
        NodeKind::ExceptionBlock => (">", "]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::builder::FlowGraphBuilder;
    use crate::normalizer::statements;

    fn render(source: &str) -> String {
        MermaidGenerator::new().generate_mermaid(&FlowGraphBuilder::synthesize(statements(source)))
    }

    #[test]
    fn empty_input_renders_header_and_styles_only() {
        let out = render("");
        assert!(out.starts_with("graph TD;\n"));
        assert_eq!(out.matches("classDef").count(), 6);
        assert!(!out.contains("Start"));
        assert!(!out.contains("click"));
    }

    #[test]
    fn root_edge_precedes_node_declarations() {
        let out = render("a();\n");
        let root = out.find("Start --> N0;").unwrap();
        let node = out.find("N0[\"a();\"]:::process;").unwrap();
        assert!(root < node);
    }

    #[test]
    fn shapes_follow_categories() {
        let out = render("if (x)\ny();\nreturn;\n");
        assert!(out.contains("N0{\"x ?\"}:::decision;"));
        assert!(out.contains("N1[\"y();\"]:::process;"));
        assert!(out.contains("N2((\"return;\")):::terminator;"));
    }

    #[test]
    fn click_bindings_carry_source_lines() {
        let out = render("a();\n\nb();\n");
        assert!(out.contains("click N0 call flowNodeClicked(1);"));
        assert!(out.contains("click N1 call flowNodeClicked(3);"));
    }

    #[test]
    fn click_bindings_can_be_disabled() {
        let config = MermaidConfig {
            include_click_bindings: false,
            ..Default::default()
        };
        let generator = MermaidGenerator::with_config(config);
        let out = generator.generate_mermaid(&FlowGraphBuilder::synthesize(statements("a();\n")));
        assert!(!out.contains("click"));
    }

    #[test]
    fn dashed_edges_use_dotted_arrows() {
        let out = render("try {\nrisky();\n}\ncatch (err e) {\nhandle();\n}\n");
        assert!(out.contains("Start -.-> N2;"));
        assert!(out.contains("N0>\"TRY Block\"]:::catchNode;"));
        assert!(out.contains("N2>\"err e\"]:::catchNode;"));
    }

    #[test]
    fn switch_headers_render_as_hexagons() {
        let out = render("switch (mode) {\ncase 0:\nidle();\n}\n");
        assert!(out.contains("N0{{\"switch: mode\"}}:::switchNode;"));
        assert!(out.contains("N0 -- Case 0 --> N1;"));
    }
}
