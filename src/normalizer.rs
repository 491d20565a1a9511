use regex::Regex;
use serde::{Deserialize, Serialize};

/// One comment-free, trimmed source fragment and the physical line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub line: usize,
    pub text: String,
}

/// Lazy stream of statements over one source text. Single pass; callers that
/// need a second pass create a new stream from the original text.
pub struct StatementStream {
    cleaned: String,
    cursor: usize,
    line: usize,
}

pub fn statements(source: &str) -> StatementStream {
    StatementStream {
        cleaned: strip_block_comments(source),
        cursor: 0,
        line: 0,
    }
}

impl Iterator for StatementStream {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        while self.cursor < self.cleaned.len() {
            let rest = &self.cleaned[self.cursor..];
            let (raw, advance) = match rest.find('\n') {
                Some(i) => (&rest[..i], i + 1),
                None => (rest, rest.len()),
            };
            self.cursor += advance;
            self.line += 1;

            let text = strip_line_comment(raw).trim();
            if !text.is_empty() {
                return Some(Statement {
                    line: self.line,
                    text: text.to_string(),
                });
            }
        }
        None
    }
}

/// Removes non-nested block comments, keeping the newlines they spanned so
/// later statements still report their physical source line.
fn strip_block_comments(source: &str) -> String {
    let pattern = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    pattern
        .replace_all(source, |caps: &regex::Captures| {
            "\n".repeat(caps[0].matches('\n').count())
        })
        .into_owned()
}

/// Drops text from the first line-comment marker to end of line. Not
/// string-aware: a marker inside a string literal still truncates the line.
fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(i) => &line[..i],
        None => line,
    }
}
