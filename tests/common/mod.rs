//! Shared test helpers for integration tests
//!
//! Note: Items may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::{Map, Value};

use codefence::analysis::{AnalysisEngine, AnalysisResult, Diagnostic, EngineInput};
use codefence::error::VfsError;
use codefence::theme::ThemeSpec;
use codefence::vfs::{ScriptTarget, StdlibSource, VirtualModuleMap};
use codefence::Pipeline;

/// One captured engine invocation
pub struct RecordedCall {
    pub code: String,
    pub lang: String,
    pub options: Map<String, Value>,
    pub module_map: Option<VirtualModuleMap>,
}

/// Deterministic stand-in for the compiler-driven analysis engine.
///
/// Records every invocation and replays configured diagnostics, or fails
/// when `fail_with` is set.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<RecordedCall>>,
    pub diagnostics: Vec<Diagnostic>,
    pub fail_with: Option<String>,
}

impl RecordingEngine {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl AnalysisEngine for RecordingEngine {
    fn run(
        &self,
        code: &str,
        lang: &str,
        input: EngineInput,
    ) -> Result<AnalysisResult, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().unwrap().push(RecordedCall {
            code: code.to_string(),
            lang: lang.to_string(),
            options: input.options,
            module_map: input.module_map,
        });
        if let Some(message) = &self.fail_with {
            return Err(message.clone().into());
        }
        let mut result = AnalysisResult::clean(code, lang);
        result.diagnostics = self.diagnostics.clone();
        Ok(result)
    }
}

/// In-memory stdlib source that counts how often it is asked to build.
#[derive(Default)]
pub struct CountingStdlib {
    pub builds: AtomicUsize,
}

impl CountingStdlib {
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl StdlibSource for CountingStdlib {
    fn standard_lib(&self, _target: ScriptTarget) -> Result<VirtualModuleMap, VfsError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        let mut map = VirtualModuleMap::new();
        map.insert("lib.es2015", "declare var Promise: any;");
        map.insert("lib.dom", "declare var document: any;");
        Ok(map)
    }
}

/// Route crate logs through the test harness, filtered by `RUST_LOG`.
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A pipeline wired with the recording engine and in-memory stdlib
pub fn test_pipeline() -> Pipeline<RecordingEngine, CountingStdlib> {
    init_tracing();
    Pipeline::new(RecordingEngine::default(), CountingStdlib::default())
}

/// A pipeline with an initialised default-theme highlighter
pub fn initialized_pipeline() -> Pipeline<RecordingEngine, CountingStdlib> {
    let pipeline = test_pipeline();
    pipeline
        .initialize_highlighter(&ThemeSpec::default())
        .expect("default theme should always resolve");
    pipeline
}
