//! Error types surfaced by the rendering pipeline
//!
//! Every failure is local to one call. The pipeline performs no retries and
//! no silent recovery; retry policy belongs to the embedding documentation
//! pipeline. An unsupported language is deliberately not represented here:
//! it triggers the plain-text renderer instead of an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::vfs::ScriptTarget;

/// Failure while resolving or parsing a single theme source.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The id matched no builtin theme
    #[error("unknown builtin theme id: {0}")]
    UnknownId(String),
    /// A theme file existed but could not be read
    #[error("failed to read theme file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The theme YAML did not parse or was structurally invalid
    #[error("invalid theme definition: {0}")]
    Parse(String),
    /// No resolution strategy produced a theme file to try
    #[error("no theme found for id: {0}")]
    NotFound(String),
}

/// A theme name was unresolvable by every resolution strategy.
///
/// Carries the attempted name so callers can report which theme was asked
/// for. Does not poison the highlighter cache; a later call with a valid
/// theme may still succeed.
#[derive(Debug, Error)]
#[error("unable to load theme \"{name}\"")]
pub struct ThemeLoadError {
    /// The theme id the caller asked for
    pub name: String,
    #[source]
    pub source: ThemeError,
}

/// Render was requested before any highlighter exists.
///
/// The dispatch never implicitly triggers highlighter construction, so that
/// initialization stays caller-controlled and observable.
#[derive(Debug, Error)]
#[error("no highlighter has been initialised; call initialize_highlighter before render")]
pub struct NotInitializedError;

/// The compiler-driven analysis engine failed.
///
/// The original cause is attached unmodified; this crate does not interpret
/// or recover engine errors, only surfaces them.
#[derive(Debug, Error)]
#[error("analysis failed for \"{lang}\" sample")]
pub struct AnalysisError {
    /// Effective language handed to the engine (post substitution)
    pub lang: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Failure while building or extending a virtual module map.
#[derive(Debug, Error)]
pub enum VfsError {
    /// The standard-library declaration map could not be built
    #[error("failed to build standard library map for {target:?}")]
    Stdlib {
        target: ScriptTarget,
        #[source]
        source: std::io::Error,
    },
    /// A declaration file inside an overlay folder could not be read
    #[error("failed to read declaration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
