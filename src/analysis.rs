//! Type-aware analysis of compiler-verified samples
//!
//! The actual type checking is delegated to an external compiler-driven
//! engine consumed through the [`AnalysisEngine`] trait. This module owns
//! what happens around that call: the input-language substitution table,
//! merging caller compiler options over internal defaults, and translating
//! engine failures into [`AnalysisError`](crate::error::AnalysisError).
//!
//! Results are never cached here; samples are assumed unique per call site
//! and reuse is the documentation pipeline's concern.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::vfs::{ScriptTarget, VirtualModuleMap};

/// Default overlay folder when package-type analysis is requested without
/// an explicit path
pub const DEFAULT_PACKAGE_TYPES_DIR: &str = "node_modules/@types";

/// Languages the analysis engine's tokenizer does not accept directly.
/// json5 is normalized to json, which can carry comments through the
/// highlight step.
const LANG_SUBSTITUTIONS: &[(&str, &str)] = &[("json5", "json")];

/// Apply the static substitution table to an input language.
pub fn substitute_language(lang: &str) -> &str {
    LANG_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == lang)
        .map(|(_, to)| *to)
        .unwrap_or(lang)
}

/// Diagnostic severity, as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
    Message,
}

/// A code span within the effective source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset into the effective source
    pub start: usize,
    /// Length in bytes
    pub length: usize,
    /// 0-indexed line
    pub line: usize,
    /// 0-indexed byte column within the line
    pub character: usize,
}

impl Span {
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Whether this span and a half-open byte range overlap
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end()
    }
}

/// One compiler diagnostic for a sample
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Engine-specific numeric code, when the engine assigns one
    pub code: Option<u64>,
    pub span: Span,
}

/// Type information the engine derived for a position (hover answer)
#[derive(Debug, Clone)]
pub struct HoverInfo {
    /// The type text shown on hover
    pub text: String,
    /// Attached documentation, if any
    pub docs: Option<String>,
    pub span: Span,
}

/// Answer to an explicit query marker in the sample
#[derive(Debug, Clone)]
pub struct QueryAnswer {
    /// The resolved type text; None when the engine could not answer
    pub text: Option<String>,
    /// 0-indexed line the answer attaches to
    pub line: usize,
    /// Byte column the marker points at
    pub offset: usize,
}

/// Boundaries of one virtual file within a multi-file sample
#[derive(Debug, Clone)]
pub struct FileBoundary {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// The compiler-derived annotation set for one sample.
///
/// Produced fresh per call and consumed immediately by a renderer.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The sample's effective source with internal markup removed
    pub code: String,
    /// Effective language (post substitution), the one to tokenize under
    pub language: String,
    pub diagnostics: Vec<Diagnostic>,
    pub hovers: Vec<HoverInfo>,
    pub queries: Vec<QueryAnswer>,
    pub files: Vec<FileBoundary>,
}

impl AnalysisResult {
    /// An empty result for a clean sample
    pub fn clean(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            diagnostics: Vec::new(),
            hovers: Vec::new(),
            queries: Vec::new(),
            files: Vec::new(),
        }
    }
}

/// Everything the engine needs beyond the sample itself
pub struct EngineInput {
    /// Module map for import resolution; None lets the engine use its own
    /// default resolution
    pub module_map: Option<VirtualModuleMap>,
    /// Merged compiler options (caller options already override defaults)
    pub options: Map<String, Value>,
}

/// The external compiler-driven analysis engine.
///
/// One invocation either returns a complete result or fails; this crate
/// performs no retries and must not render from a partial result.
pub trait AnalysisEngine {
    fn run(
        &self,
        code: &str,
        lang: &str,
        input: EngineInput,
    ) -> Result<AnalysisResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// Caller-facing knobs for one analysis call
#[derive(Debug, Clone, Default)]
pub struct AnalysisSettings {
    /// Opt into package-type-aware analysis (overlay scan)
    pub use_package_types: bool,
    /// Overlay folder; defaults to [`DEFAULT_PACKAGE_TYPES_DIR`]
    pub package_types_path: Option<PathBuf>,
    /// Standard-library version for the base map
    pub target: ScriptTarget,
    /// Compiler options; win over internal defaults on key conflicts
    pub compiler_options: Map<String, Value>,
}

fn default_compiler_options() -> Map<String, Value> {
    let mut options = Map::new();
    options.insert("strict".to_string(), Value::Bool(true));
    options.insert("module".to_string(), Value::String("esnext".to_string()));
    options.insert("noImplicitAny".to_string(), Value::Bool(true));
    options
}

/// Internal defaults merged with caller options; caller wins on conflict.
pub(crate) fn merged_options(caller: &Map<String, Value>) -> Map<String, Value> {
    let mut options = default_compiler_options();
    for (key, value) in caller {
        options.insert(key.clone(), value.clone());
    }
    options
}
