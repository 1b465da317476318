//! Tokenization and highlighter lifecycle
//!
//! `Highlighter` binds a resolved theme to compiled tree-sitter queries for
//! the full language set; construction is the expensive step and happens at
//! most once per `HighlighterCache`.

mod cache;
mod highlighter;

pub use cache::HighlighterCache;
pub use highlighter::{Highlighter, Token};
