use std::collections::HashMap;

use crate::label;

use super::scanner::{IncludeKind, IncludeScanner, SourceFile, basename};

#[derive(Debug, Clone)]
pub struct IncludeGraphConfig {
    pub direction: String,
    pub show_system_headers: bool,
    pub include_click_bindings: bool,
    pub click_callback: String,
}

impl Default for IncludeGraphConfig {
    fn default() -> Self {
        IncludeGraphConfig {
            direction: "LR".to_string(),
            show_system_headers: true,
            include_click_bindings: true,
            click_callback: "includeFileClicked".to_string(),
        }
    }
}

/// Assembles the file-level dependency graph over a caller-provided file set
/// and renders it as Mermaid text. Include targets resolve to provided files
/// by basename; everything else becomes an external header node.
pub struct IncludeGraphGenerator {
    scanner: IncludeScanner,
    config: IncludeGraphConfig,
}

impl IncludeGraphGenerator {
    pub fn new() -> Self {
        IncludeGraphGenerator {
            scanner: IncludeScanner::new(),
            config: IncludeGraphConfig::default(),
        }
    }

    pub fn with_config(config: IncludeGraphConfig) -> Self {
        IncludeGraphGenerator {
            scanner: IncludeScanner::new(),
            config,
        }
    }

    pub fn generate_mermaid(&self, files: &[SourceFile]) -> String {
        let mut by_basename: HashMap<&str, usize> = HashMap::new();
        for (index, file) in files.iter().enumerate() {
            by_basename.entry(basename(&file.name)).or_insert(index);
        }

        let mut externals: Vec<String> = Vec::new();
        let mut external_ids: HashMap<String, usize> = HashMap::new();
        let mut edges: Vec<String> = Vec::new();

        for (index, file) in files.iter().enumerate() {
            for include in self.scanner.scan(&file.content) {
                match by_basename.get(basename(&include.target)) {
                    Some(&resolved) => {
                        edges.push(format!("F{index} --> F{resolved};\n"));
                    }
                    None => {
                        if include.kind == IncludeKind::System && !self.config.show_system_headers {
                            continue;
                        }
                        let next = externals.len();
                        let id = *external_ids
                            .entry(include.target.clone())
                            .or_insert_with(|| {
                                externals.push(include.target.clone());
                                next
                            });
                        edges.push(format!("F{index} -.-> X{id};\n"));
                    }
                }
            }
        }

        let mut out = String::new();
        out.push_str(&format!("graph {};\n", self.config.direction));
        out.push_str(
            "classDef sourceFile fill:#dae8fc,stroke:#6c8ebf,stroke-width:1px,color:#1a1a1a,rx:4,ry:4;\n",
        );
        out.push_str(
            "classDef externalHeader fill:#f4f4f4,stroke:#9a9a9a,stroke-width:1px,color:#4a4a4a,rx:4,ry:4;\n",
        );
        for (index, file) in files.iter().enumerate() {
            out.push_str(&format!(
                "F{}[\"{}\"]:::sourceFile;\n",
                index,
                label::sanitize(&file.name)
            ));
        }
        for (id, name) in externals.iter().enumerate() {
            out.push_str(&format!(
                "X{}[\"{}\"]:::externalHeader;\n",
                id,
                label::sanitize(name)
            ));
        }
        for edge in &edges {
            out.push_str(edge);
        }
        if self.config.include_click_bindings {
            for (index, file) in files.iter().enumerate() {
                out.push_str(&format!(
                    "click F{} call {}(\"{}\");\n",
                    index,
                    self.config.click_callback,
                    label::sanitize(&file.name)
                ));
            }
        }
        out
    }
}

impl Default for IncludeGraphGenerator {
    fn default() -> Self {
        Self::new()
    }
}
