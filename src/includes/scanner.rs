use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One participating file: a display name (usually the path it was read
/// from) and its full contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<SourceFile> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source file {}", path.display()))?;
        Ok(SourceFile {
            name: path.to_string_lossy().into_owned(),
            content,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncludeKind {
    /// `#include "..."` — expected to name a project file.
    Local,
    /// `#include <...>` — a system or toolchain header.
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Include {
    pub target: String,
    pub kind: IncludeKind,
    pub line: usize,
}

pub struct IncludeScanner {
    directive: Regex,
}

impl IncludeScanner {
    pub fn new() -> Self {
        IncludeScanner {
            directive: Regex::new(r#"^\s*#\s*include\s*(?:"([^"]+)"|<([^>]+)>)"#).unwrap(),
        }
    }

    pub fn scan(&self, source: &str) -> Vec<Include> {
        let mut includes = Vec::new();
        for (index, line) in source.lines().enumerate() {
            let Some(caps) = self.directive.captures(line) else {
                continue;
            };
            let (target, kind) = if let Some(quoted) = caps.get(1) {
                (quoted.as_str(), IncludeKind::Local)
            } else if let Some(angled) = caps.get(2) {
                (angled.as_str(), IncludeKind::System)
            } else {
                continue;
            };
            includes.push(Include {
                target: target.to_string(),
                kind,
                line: index + 1,
            });
        }
        includes
    }
}

impl Default for IncludeScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Last path component of an include target or file name.
pub fn basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
