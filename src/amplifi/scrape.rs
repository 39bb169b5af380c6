// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Token extraction from the router's HTML pages
//!
//! The web UI is not well-formed markup, so tokens are pulled out with tolerant
//! patterns. Everything that knows about page layout lives behind [`TokenScraper`].

use regex::Regex;
use std::sync::LazyLock;

/// `<input ... name="token" ... value="...">`, either quote style
static CSRF_NAME_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<input\b[^>]*\bname\s*=\s*["']token["'][^>]*\bvalue\s*=\s*["']([^"']+)["']"#)
        .expect("valid csrf token regex")
});

/// Same input with the attributes swapped
static CSRF_VALUE_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<input\b[^>]*\bvalue\s*=\s*["']([^"']+)["'][^>]*\bname\s*=\s*["']token["']"#)
        .expect("valid csrf token regex")
});

/// `var token='0123abcd';` inside an inline script
static INFO_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:var|let|const)\s+token\s*=\s*["']([0-9a-fA-F]+)["']"#)
        .expect("valid info token regex")
});

/// Pulls session tokens out of router pages
pub trait TokenScraper: Send + Sync {
    /// CSRF token from the login form
    fn csrf_token(&self, login_page: &str) -> Option<String>;

    /// Hex token authorizing status requests, from the info page script
    fn info_token(&self, info_page: &str) -> Option<String>;
}

/// Default scraper based on regular expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexScraper;

impl TokenScraper for RegexScraper {
    fn csrf_token(&self, login_page: &str) -> Option<String> {
        CSRF_NAME_FIRST
            .captures(login_page)
            .or_else(|| CSRF_VALUE_FIRST.captures(login_page))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn info_token(&self, info_page: &str) -> Option<String> {
        INFO_TOKEN
            .captures(info_page)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csrf_token_single_quotes() {
        let page = "<form><input type='hidden' name='token' value='abc123'></form>";
        assert_eq!(RegexScraper.csrf_token(page).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_csrf_token_double_quotes() {
        let page = r#"<input type="hidden" name="token" value="f00dcafe" />"#;
        assert_eq!(RegexScraper.csrf_token(page).as_deref(), Some("f00dcafe"));
    }

    #[test]
    fn test_csrf_token_value_before_name() {
        let page = r#"<INPUT value="xyz" type=hidden name='token'>"#;
        assert_eq!(RegexScraper.csrf_token(page).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_csrf_token_spans_lines() {
        let page = "<input\n  type=\"hidden\"\n  name=\"token\"\n  value=\"multi\">";
        assert_eq!(RegexScraper.csrf_token(page).as_deref(), Some("multi"));
    }

    #[test]
    fn test_csrf_token_ignores_other_inputs() {
        let page = r#"<input name="password" value="nope"><input name="token" value="yes">"#;
        assert_eq!(RegexScraper.csrf_token(page).as_deref(), Some("yes"));
    }

    #[test]
    fn test_csrf_token_absent() {
        let page = r#"<form><input type="password" name="password"></form>"#;
        assert_eq!(RegexScraper.csrf_token(page), None);
        assert_eq!(RegexScraper.csrf_token(""), None);
    }

    #[test]
    fn test_info_token() {
        let page = "<script>\n  var token='0a1b2c3d4e5f';\n  var other = 1;\n</script>";
        assert_eq!(RegexScraper.info_token(page).as_deref(), Some("0a1b2c3d4e5f"));
    }

    #[test]
    fn test_info_token_double_quotes_and_spacing() {
        let page = r#"<script>var token = "DEADBEEF";</script>"#;
        assert_eq!(RegexScraper.info_token(page).as_deref(), Some("DEADBEEF"));
    }

    #[test]
    fn test_info_token_rejects_non_hex() {
        let page = "<script>var token='not-hex';</script>";
        assert_eq!(RegexScraper.info_token(page), None);
    }

    #[test]
    fn test_info_token_not_confused_by_csrf_input() {
        let page = r#"<input name="token" value="abcdef">"#;
        assert_eq!(RegexScraper.info_token(page), None);
    }
}
