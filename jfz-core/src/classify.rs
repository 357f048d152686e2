//! Content-based file extension classification

use serde_json::Value;

/// Predicate over string content deciding whether a rule applies
type ContentPredicate = fn(&str) -> bool;

/// Ordered classification rules for string values; first match wins.
///
/// The order is load-bearing: a JSON-parseable string never reaches the HTML
/// rule, an HTML-looking string never reaches the CSS rule, and so on. The
/// rules are heuristics, not guarantees; a CSS-like JS snippet classifying as
/// `.css` is accepted behavior.
const STRING_RULES: &[(ContentPredicate, &str)] = &[
    (looks_like_json, ".json"),
    (looks_like_html, ".html"),
    (looks_like_css, ".css"),
    (looks_like_js, ".js"),
    (looks_like_markdown, ".md"),
];

/// Extension for string content that matches no rule
const FALLBACK_EXTENSION: &str = ".txt";

fn looks_like_json(content: &str) -> bool {
    serde_json::from_str::<Value>(content).is_ok()
}

fn looks_like_html(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.starts_with('<') && trimmed.ends_with('>')
}

fn looks_like_css(content: &str) -> bool {
    content.contains('{') && content.contains('}') && content.contains(':')
}

fn looks_like_js(content: &str) -> bool {
    const MARKERS: &[&str] = &["function", "=>", "const ", "let ", "var ", "import "];
    MARKERS.iter().any(|marker| content.contains(marker))
}

fn looks_like_markdown(content: &str) -> bool {
    content.contains('#') || content.contains("**")
}

/// Infer a file extension for a scalar JSON value
///
/// Deterministic and total. Only strings undergo content sniffing; the other
/// scalar kinds (null, boolean, number) take `default_ext`, which callers
/// normally leave at [`crate::DEFAULT_EXTENSION`].
pub fn classify<'a>(value: &Value, default_ext: &'a str) -> &'a str {
    match value {
        Value::String(content) => classify_content(content),
        _ => default_ext,
    }
}

/// Run the ordered rule cascade over raw string content
pub fn classify_content(content: &str) -> &'static str {
    for &(applies, extension) in STRING_RULES {
        if applies(content) {
            return extension;
        }
    }
    FALLBACK_EXTENSION
}
