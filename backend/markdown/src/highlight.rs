//! Syntax highlighting for fenced code blocks, backed by syntect.
//!
//! The syntax and theme sets are loaded once per process; unknown language
//! hints fall back to the plain-text grammar rather than failing.

use once_cell::sync::Lazy;
use pulldown_cmark_escape::escape_html;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use tracing::warn;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME: Lazy<Theme> = Lazy::new(|| {
    ThemeSet::load_defaults()
        .themes
        .get("base16-ocean.dark")
        .cloned()
        .unwrap_or_default()
});

/// Highlighted HTML for one fenced code block.
pub fn highlight(code: &str, lang: &str) -> String {
    let syntax = SYNTAX_SET
        .find_syntax_by_token(lang)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
    match highlighted_html_for_string(code, &SYNTAX_SET, syntax, &THEME) {
        Ok(html) => html,
        Err(err) => {
            warn!(lang, error = %err, "highlighting failed, emitting plain block");
            plain_block(code)
        }
    }
}

/// Whether a language hint matches a known grammar.
pub fn is_known_language(lang: &str) -> bool {
    SYNTAX_SET.find_syntax_by_token(lang).is_some()
}

fn plain_block(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + 24);
    out.push_str("<pre><code>");
    let _ = escape_html(&mut out, code);
    out.push_str("</code></pre>\n");
    out
}
