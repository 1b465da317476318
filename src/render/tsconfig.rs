//! tsconfig-aware renderer
//!
//! Structured-config samples get the default token treatment, except that
//! top-level property keys become links into the compiler-option
//! reference. Nested keys (inside "compilerOptions" values and the like
//! are option values, not options) stay plain tokens.

use crate::highlight::Token;

use super::tokens::render_token;
use super::{escape_html, wrap_pre, HtmlOptions};

const REFERENCE_BASE_URL: &str = "https://www.typescriptlang.org/tsconfig#";

/// Render a tsconfig sample with reference links on top-level keys.
pub fn tsconfig_renderer(lines: &[Vec<Token>], options: &HtmlOptions) -> String {
    let mut body = String::new();
    let mut depth: i32 = 0;

    for tokens in lines {
        body.push_str("<div class=\"line\">");
        for (idx, token) in tokens.iter().enumerate() {
            if depth == 1 && is_property_key(tokens, idx) {
                body.push_str(&render_key_link(token));
            } else {
                body.push_str(&render_token(token));
            }
            depth += brace_delta(&token.text);
        }
        body.push_str("</div>");
    }

    wrap_pre(Some("tsconfig"), options.lang_id.as_deref(), &body)
}

/// A quoted token followed (next non-whitespace token) by a colon is a key.
fn is_property_key(tokens: &[Token], idx: usize) -> bool {
    let token = &tokens[idx];
    if !token.text.starts_with('"') {
        return false;
    }
    tokens[idx + 1..]
        .iter()
        .find(|t| !t.text.trim().is_empty())
        .is_some_and(|t| t.text.trim_start().starts_with(':'))
}

fn render_key_link(token: &Token) -> String {
    let key = token.text.trim_matches('"');
    let inner = render_token(token);
    format!(
        "<a href=\"{}{}\" target=\"_blank\">{}</a>",
        REFERENCE_BASE_URL,
        escape_html(key),
        inner
    )
}

/// Net brace depth change for a token. Braces inside quoted text are
/// string content, not structure, and do not count.
fn brace_delta(text: &str) -> i32 {
    let mut delta = 0;
    let mut in_string = false;
    for c in text.chars() {
        match c {
            '"' => in_string = !in_string,
            '{' if !in_string => delta += 1,
            '}' if !in_string => delta -= 1,
            _ => {}
        }
    }
    delta
}
