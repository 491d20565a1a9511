use regex::Regex;

/// Closed set of statement shapes the builder dispatches on, listed in
/// classification priority order (first match wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    TypeDecl { opens_scope: bool },
    Directive,
    OpenBrace,
    CloseBrace,
    Conditional,
    Else,
    Switch,
    CaseLabel { value: String },
    LoopHead { keyword: &'static str },
    DoHead,
    TryHead,
    CatchHead,
    Jump,
    Other,
}

pub struct Classifier {
    type_decl: Regex,
    directive: Regex,
    conditional: Regex,
    loop_head: Regex,
    jump: Regex,
}

impl Classifier {
    pub fn new() -> Self {
        Classifier {
            type_decl: Regex::new(r"^(?:struct|class|enum|union|namespace)\b").unwrap(),
            directive: Regex::new(r"^(?:#|using\s+namespace\b|template\b)").unwrap(),
            conditional: Regex::new(r"^(?:else\s+)?if\b").unwrap(),
            loop_head: Regex::new(r"^(?:while|for)\b").unwrap(),
            jump: Regex::new(r"^(?:return|break|continue|goto|throw)\b").unwrap(),
        }
    }

    pub fn classify(&self, text: &str) -> StatementKind {
        if self.type_decl.is_match(text) {
            return StatementKind::TypeDecl {
                opens_scope: opens_brace(text),
            };
        }
        if self.directive.is_match(text) {
            return StatementKind::Directive;
        }
        if text == "{" {
            return StatementKind::OpenBrace;
        }
        if text.contains('}') {
            return StatementKind::CloseBrace;
        }
        if self.conditional.is_match(text) {
            return StatementKind::Conditional;
        }
        if starts_with_word(text, "else") {
            return StatementKind::Else;
        }
        if starts_with_word(text, "switch") {
            return StatementKind::Switch;
        }
        if starts_with_word(text, "case") || starts_with_word(text, "default") {
            return StatementKind::CaseLabel {
                value: case_value(text),
            };
        }
        if self.loop_head.is_match(text) {
            let keyword = if text.starts_with("while") { "while" } else { "for" };
            return StatementKind::LoopHead { keyword };
        }
        if starts_with_word(text, "do") {
            return StatementKind::DoHead;
        }
        if starts_with_word(text, "try") {
            return StatementKind::TryHead;
        }
        if starts_with_word(text, "catch") {
            return StatementKind::CatchHead;
        }
        if self.jump.is_match(text) {
            return StatementKind::Jump;
        }
        StatementKind::Other
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// A brace is "opened" when the line starts one it does not also close.
pub fn opens_brace(text: &str) -> bool {
    text.contains('{') && !text.contains('}')
}

fn starts_with_word(text: &str, word: &str) -> bool {
    match text.strip_prefix(word) {
        Some(rest) => !rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

fn case_value(text: &str) -> String {
    if starts_with_word(text, "default") {
        return "Default".to_string();
    }
    let rest = text.strip_prefix("case").unwrap_or(text).trim();
    let rest = match single_colon(rest) {
        Some(i) => &rest[..i],
        None => rest,
    };
    format!("Case {}", rest.trim())
}

/// Index of the first `:` that is not part of a `::` scope separator.
fn single_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b':' {
            if bytes.get(i + 1) == Some(&b':') {
                i += 2;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}
