//! Escape-only renderer for languages the registry does not know
//!
//! Deliberately takes the raw source rather than tokens: by the time this
//! variant is selected there is nothing to tokenize with.

use super::{escape_html, wrap_pre, HtmlOptions};

/// Render a sample as escaped plain text.
pub fn plain_text_renderer(code: &str, options: &HtmlOptions) -> String {
    wrap_pre(None, options.lang_id.as_deref(), &escape_html(code))
}
