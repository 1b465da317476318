//! codefence - renders documentation code samples to annotated HTML
//!
//! This crate tokenizes fenced code samples for syntax coloring and, for
//! samples marked as compiler-verified, augments the tokens with type
//! information, inline errors, and query answers produced by an external
//! compiler-driven analysis engine.

pub mod analysis;
pub mod error;
pub mod highlight;
pub mod languages;
pub mod pipeline;
pub mod render;
pub mod theme;
pub mod vfs;

// Re-export commonly used types
pub use analysis::{AnalysisEngine, AnalysisResult, AnalysisSettings};
pub use error::{AnalysisError, NotInitializedError, ThemeLoadError};
pub use highlight::{Highlighter, HighlighterCache, Token};
pub use languages::supports_language;
pub use pipeline::{Pipeline, RenderRequest};
pub use render::{render_code_to_html, HtmlOptions, TAG_TSCONFIG, TAG_TYPECHECK};
pub use theme::{Theme, ThemeSpec};
pub use vfs::{ScriptTarget, VirtualModuleMap};
