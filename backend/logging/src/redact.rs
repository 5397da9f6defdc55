//! Token redaction.
//!
//! Scrubs access tokens and bearer headers from strings prior to logging.

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(access_token=|bearer\s+)[A-Za-z0-9\-._~+/]+=*").unwrap()
});

/// Mask a token down to its last four characters.
pub fn redact_token(token: &str) -> String {
    if token.len() <= 4 {
        return "****".to_string();
    }
    format!("****{}", &token[token.len() - 4..])
}

/// Scrub token-carrying patterns from free-form text.
pub fn scrub(input: &str) -> String {
    TOKEN_RE
        .replace_all(input, "$1[REDACTED]")
        .into_owned()
}
