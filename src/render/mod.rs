//! Renderer dispatch and the shared HTML vocabulary
//!
//! Dispatch classifies a render request into exactly one renderer variant
//! (an explicit tagged decision evaluated once, never ad hoc probing mid
//! render), then invokes that variant. Every variant is pure with respect
//! to its inputs; no shared state is mutated while rendering.

mod annotated;
mod plain;
mod tokens;
mod tsconfig;

pub use annotated::annotated_renderer;
pub use plain::plain_text_renderer;
pub use tokens::default_tokens_renderer;
pub use tsconfig::tsconfig_renderer;

use crate::analysis::AnalysisResult;
use crate::error::NotInitializedError;
use crate::highlight::Highlighter;
use crate::languages::{supports_language, LanguageId};

/// Info tag marking a sample as compiler-verified
pub const TAG_TYPECHECK: &str = "typecheck";

/// Info tag marking a structured-config (tsconfig) sample
pub const TAG_TSCONFIG: &str = "tsconfig";

/// Options shared by every renderer variant
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Language label emitted into the output, when set
    pub lang_id: Option<String>,
}

/// The renderer variant a request resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RendererKind {
    /// Escape-only output for languages the registry does not know
    Plain,
    /// Styled tokens, no annotations
    Tokens,
    /// Tokens plus compiler-derived annotations
    Annotated,
    /// Tokens with compiler-option keys linked to their reference docs
    Tsconfig,
}

/// Classify a request. First match wins, in fixed order.
pub(crate) fn classify(lang: &str, info: &[&str], has_analysis: bool) -> RendererKind {
    if !supports_language(lang) {
        return RendererKind::Plain;
    }
    if info.contains(&TAG_TYPECHECK) && has_analysis {
        return RendererKind::Annotated;
    }
    if LanguageId::from_name(lang) == Some(LanguageId::Json) && info.contains(&TAG_TSCONFIG) {
        return RendererKind::Tsconfig;
    }
    RendererKind::Tokens
}

/// Renders a code sample to HTML, taking into account the rendering
/// overrides for verified and tsconfig samples and whether the language
/// can be tokenized at all.
///
/// Never constructs a highlighter: a missing one is the caller's error,
/// surfaced as [`NotInitializedError`] so initialization stays observable.
pub fn render_code_to_html(
    code: &str,
    lang: &str,
    info: &[&str],
    options: &HtmlOptions,
    highlighter: Option<&Highlighter>,
    analysis: Option<&AnalysisResult>,
) -> Result<String, NotInitializedError> {
    let highlighter = highlighter.ok_or(NotInitializedError)?;

    let kind = classify(lang, info, analysis.is_some());
    tracing::debug!("Rendering {} sample via {:?} renderer", lang, kind);

    Ok(match kind {
        RendererKind::Plain => plain_text_renderer(code, options),
        RendererKind::Tokens => {
            let lines = highlighter.tokenize(code, lang);
            default_tokens_renderer(&lines, options)
        }
        RendererKind::Annotated => {
            let lines = highlighter.tokenize(code, lang);
            match analysis {
                Some(analysis) => annotated_renderer(&lines, options, analysis),
                // classify only picks Annotated when analysis is present
                None => default_tokens_renderer(&lines, options),
            }
        }
        RendererKind::Tsconfig => {
            let lines = highlighter.tokenize(code, lang);
            tsconfig_renderer(&lines, options)
        }
    })
}

/// Escape text for embedding in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Shared outer structure for all variants
pub(crate) fn wrap_pre(extra_class: Option<&str>, lang_id: Option<&str>, body: &str) -> String {
    let mut html = String::from("<pre class=\"shiki");
    if let Some(class) = extra_class {
        html.push(' ');
        html.push_str(class);
    }
    html.push_str("\">");
    if let Some(lang) = lang_id {
        html.push_str(&format!(
            "<div class=\"language-id\">{}</div>",
            escape_html(lang)
        ));
    }
    html.push_str("<div class=\"code-container\"><code>");
    html.push_str(body);
    html.push_str("</code></div></pre>");
    html
}
