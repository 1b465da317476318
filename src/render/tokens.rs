//! Default tokens renderer
//!
//! One span per token, one line div per source line, colors inlined from
//! the theme the highlighter was built with.

use crate::highlight::Token;

use super::{escape_html, wrap_pre, HtmlOptions};

/// Render styled tokens without annotations.
pub fn default_tokens_renderer(lines: &[Vec<Token>], options: &HtmlOptions) -> String {
    let mut body = String::new();
    for tokens in lines {
        body.push_str("<div class=\"line\">");
        for token in tokens {
            body.push_str(&render_token(token));
        }
        body.push_str("</div>");
    }
    wrap_pre(None, options.lang_id.as_deref(), &body)
}

pub(super) fn render_token(token: &Token) -> String {
    match token.color {
        Some(color) => format!(
            "<span style=\"color: {}\">{}</span>",
            color.to_css_hex(),
            escape_html(&token.text)
        ),
        None => format!("<span>{}</span>", escape_html(&token.text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;

    fn token(text: &str, color: Option<Color>) -> Token {
        Token {
            text: text.to_string(),
            start: 0,
            scope: color.map(|_| "keyword".to_string()),
            color,
        }
    }

    #[test]
    fn test_styled_and_unstyled_spans() {
        let lines = vec![vec![
            token("const", Some(Color::rgb(0x81, 0xA1, 0xC1))),
            token(" x", None),
        ]];
        let html = default_tokens_renderer(&lines, &HtmlOptions::default());
        assert!(html.contains("<span style=\"color: #81A1C1\">const</span>"));
        assert!(html.contains("<span> x</span>"));
    }

    #[test]
    fn test_one_div_per_line() {
        let lines = vec![vec![token("a", None)], Vec::new(), vec![token("b", None)]];
        let html = default_tokens_renderer(&lines, &HtmlOptions::default());
        assert_eq!(html.matches("<div class=\"line\">").count(), 3);
    }
}
