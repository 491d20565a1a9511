use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::flow::{FlowGraph, FlowGraphBuilder, MermaidConfig, MermaidGenerator};
use crate::normalizer::statements;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationResult {
    pub mermaid_code: String,
    pub graph: FlowGraph,
    pub statement_count: usize,
}

impl VisualizationResult {
    /// Structured alternative to the Mermaid text, for collaborators that
    /// prefer JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub struct FlowVisualizer {
    generator: MermaidGenerator,
}

impl FlowVisualizer {
    pub fn new() -> Self {
        FlowVisualizer {
            generator: MermaidGenerator::new(),
        }
    }

    pub fn with_config(config: MermaidConfig) -> Self {
        FlowVisualizer {
            generator: MermaidGenerator::with_config(config),
        }
    }

    pub fn update_config(&mut self, config: MermaidConfig) {
        self.generator = MermaidGenerator::with_config(config);
    }

    pub fn generate_mermaid(&self, source: &str) -> String {
        self.analyze_and_generate(source).mermaid_code
    }

    pub fn analyze_and_generate(&self, source: &str) -> VisualizationResult {
        let mut builder = FlowGraphBuilder::new();
        let mut statement_count = 0;
        for statement in statements(source) {
            builder.consume(&statement);
            statement_count += 1;
        }
        let graph = builder.finish();
        let mermaid_code = self.generator.generate_mermaid(&graph);

        VisualizationResult {
            mermaid_code,
            graph,
            statement_count,
        }
    }
}

impl Default for FlowVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn visualize_source(source: &str) -> String {
    FlowVisualizer::new().generate_mermaid(source)
}

pub fn visualize_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;
    Ok(visualize_source(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_reports_statement_count() {
        let result = FlowVisualizer::new().analyze_and_generate("a();\n// comment only\nb();\n");
        assert_eq!(result.statement_count, 2);
        assert_eq!(result.graph.nodes.len(), 2);
        assert!(result.mermaid_code.starts_with("graph TD;"));
    }

    #[test]
    fn json_output_round_trips() {
        let result = FlowVisualizer::new().analyze_and_generate("if (x)\ny();\n");
        let json = result.to_json().unwrap();
        let back: VisualizationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.graph, result.graph);
        assert_eq!(back.statement_count, result.statement_count);
    }

    #[test]
    fn custom_direction_reaches_the_output() {
        let config = MermaidConfig {
            direction: "LR".to_string(),
            ..Default::default()
        };
        let visualizer = FlowVisualizer::with_config(config);
        assert!(visualizer.generate_mermaid("a();\n").starts_with("graph LR;"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = visualize_file("definitely/not/here.cpp").unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.cpp"));
    }
}
