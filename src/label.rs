const MAX_LABEL_CHARS: usize = 50;
const TRUNCATED_KEEP: usize = 47;

/// Makes a text fragment safe to embed in a quoted Mermaid label.
/// Idempotent: sanitizing already-sanitized text is a no-op.
pub fn sanitize(text: &str) -> String {
    truncate_with_ellipsis(escape(text))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '"' => out.push('\''),
            '[' | ']' | '{' | '}' => out.push(' '),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => {
                let rest = &text[i + 1..];
                if rest.starts_with("amp;") || rest.starts_with("lt;") || rest.starts_with("gt;") {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn truncate_with_ellipsis(text: String) -> String {
    if text.chars().count() <= MAX_LABEL_CHARS {
        return text;
    }
    let mut cut = text
        .char_indices()
        .nth(TRUNCATED_KEEP)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    // Never leave a broken entity at the cut point.
    if let Some(amp) = text[..cut].rfind('&')
        && !text[amp..cut].contains(';')
    {
        cut = amp;
    }
    let mut out = text[..cut].to_string();
    out.push_str("...");
    out
}

/// Pulls the parenthesized expression that follows `keyword`, falling back to
/// the keyword-and-paren-stripped text so a label is always produced.
pub fn extract_condition(text: &str, keyword: &str) -> String {
    if let Some(inner) = parenthesized_group(text, keyword) {
        return trim_stray_closes(inner.trim()).to_string();
    }
    let stripped = match keyword_span(text, keyword) {
        Some((start, end)) => format!("{}{}", &text[..start], &text[end..]),
        None => text.to_string(),
    };
    let stripped: String = stripped.chars().filter(|c| *c != '(' && *c != ')').collect();
    stripped.trim().to_string()
}

/// Inner text of the balanced group after the keyword, if one is present.
fn parenthesized_group<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let (_, end) = keyword_span(text, keyword)?;
    let after = text[end..].trim_start();
    if !after.starts_with('(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in after.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&after[1..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// First word-bounded occurrence of `keyword` in `text`.
fn keyword_span(text: &str, keyword: &str) -> Option<(usize, usize)> {
    for (start, _) in text.match_indices(keyword) {
        let end = start + keyword.len();
        let before_ok = !text[..start].chars().next_back().is_some_and(is_word_char);
        let after_ok = !text[end..].chars().next().is_some_and(is_word_char);
        if before_ok && after_ok {
            return Some((start, end));
        }
    }
    None
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn trim_stray_closes(text: &str) -> &str {
    let mut out = text;
    while out.ends_with(')') && out.matches(')').count() > out.matches('(').count() {
        out = out[..out.len() - 1].trim_end();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_and_brackets_are_neutralized() {
        assert_eq!(sanitize("call(\"x\")"), "call('x')");
        assert_eq!(sanitize("a[0] = {1}"), "a 0  =  1 ");
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(sanitize("a < b && b > c"), "a &lt; b &amp;&amp; b &gt; c");
    }

    #[test]
    fn long_labels_are_capped_with_ellipsis() {
        let out = sanitize(&"x".repeat(80));
        assert_eq!(out.chars().count(), 50);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "plain text".to_string(),
            "a < b && b > \"c\"".to_string(),
            "&amp; already escaped".to_string(),
            "<".repeat(40),
            format!("{}&", "y".repeat(46)),
        ];
        for input in &inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn condition_extraction_handles_nesting() {
        assert_eq!(extract_condition("if (check(a, b)) {", "if"), "check(a, b)");
        assert_eq!(extract_condition("else if (x > 0)", "if"), "x > 0");
        assert_eq!(extract_condition("while(count--)", "while"), "count--");
    }

    #[test]
    fn condition_extraction_falls_back_without_parens() {
        assert_eq!(extract_condition("if x > 0", "if"), "x > 0");
        assert_eq!(extract_condition("if (unterminated", "if"), "unterminated");
    }

    #[test]
    fn stray_close_parens_are_trimmed() {
        assert_eq!(trim_stray_closes("a))"), "a");
        assert_eq!(trim_stray_closes("f(x)"), "f(x)");
    }
}
