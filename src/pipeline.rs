//! The produced interface of the crate
//!
//! A `Pipeline` owns the highlighter cache, the module-map cache, and the
//! analysis engine. It is an explicitly owned value the embedding
//! documentation pipeline constructs and passes around; there is no
//! ambient global state, so lifetime and test isolation stay explicit.

use std::sync::Arc;

use crate::analysis::{
    merged_options, substitute_language, AnalysisEngine, AnalysisResult, AnalysisSettings,
    EngineInput, DEFAULT_PACKAGE_TYPES_DIR,
};
use crate::error::{AnalysisError, NotInitializedError, ThemeLoadError};
use crate::highlight::{Highlighter, HighlighterCache};
use crate::render::{self, HtmlOptions};
use crate::theme::ThemeSpec;
use crate::languages;
use crate::vfs::{add_files_from_folder, ModuleMapCache, StdlibSource, VirtualModuleMap};

/// The unit of work for one render call.
///
/// No persistent identity; exists for the duration of the call.
pub struct RenderRequest<'a> {
    /// Source text of the sample
    pub code: &'a str,
    /// Fence language identifier
    pub lang: &'a str,
    /// Ordered free-form info tags from the codefence
    pub info: &'a [&'a str],
    /// Renderer options
    pub options: HtmlOptions,
    /// Caller-supplied highlighter override; falls back to the pipeline's
    /// cached one
    pub highlighter: Option<Arc<Highlighter>>,
    /// Pre-computed analysis for compiler-verified samples
    pub analysis: Option<&'a AnalysisResult>,
}

impl<'a> RenderRequest<'a> {
    pub fn new(code: &'a str, lang: &'a str) -> Self {
        Self {
            code,
            lang,
            info: &[],
            options: HtmlOptions::default(),
            highlighter: None,
            analysis: None,
        }
    }

    pub fn with_info(mut self, info: &'a [&'a str]) -> Self {
        self.info = info;
        self
    }

    pub fn with_options(mut self, options: HtmlOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_highlighter(mut self, highlighter: Arc<Highlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn with_analysis(mut self, analysis: &'a AnalysisResult) -> Self {
        self.analysis = Some(analysis);
        self
    }
}

/// Rendering pipeline for documentation code samples.
///
/// Generic over the analysis engine and the standard-library source, both
/// consumed as narrow contracts; the pipeline never looks inside either.
pub struct Pipeline<E, S> {
    engine: E,
    highlighter: HighlighterCache,
    module_maps: ModuleMapCache<S>,
}

impl<E: AnalysisEngine, S: StdlibSource> Pipeline<E, S> {
    pub fn new(engine: E, stdlib: S) -> Self {
        Self {
            engine,
            highlighter: HighlighterCache::new(),
            module_maps: ModuleMapCache::new(stdlib),
        }
    }

    /// Checks whether a particular fence language can be tokenized.
    pub fn supports_language(&self, lang: &str) -> bool {
        languages::supports_language(lang)
    }

    /// The analysis engine this pipeline was constructed with.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The standard-library source this pipeline was constructed with.
    pub fn stdlib(&self) -> &S {
        self.module_maps.source()
    }

    /// Construct (or fetch) the shared highlighter for the given theme.
    ///
    /// The first successful call constructs; every later call returns the
    /// same instance without suspending, regardless of the requested
    /// theme. Concurrent first calls share one construction.
    pub fn initialize_highlighter(
        &self,
        spec: &ThemeSpec,
    ) -> Result<Arc<Highlighter>, ThemeLoadError> {
        self.highlighter.get_or_init(spec)
    }

    /// The cached highlighter, if one has been initialised.
    pub fn highlighter(&self) -> Option<Arc<Highlighter>> {
        self.highlighter.get()
    }

    /// Render one sample to HTML.
    ///
    /// Fails only when no highlighter is available; every other condition
    /// (unsupported language included) resolves to a renderer variant.
    pub fn render(&self, request: &RenderRequest<'_>) -> Result<String, NotInitializedError> {
        let highlighter = match &request.highlighter {
            Some(hl) => Some(hl.clone()),
            None => self.highlighter.get(),
        };
        render::render_code_to_html(
            request.code,
            request.lang,
            request.info,
            &request.options,
            highlighter.as_deref(),
            request.analysis,
        )
    }

    /// Run the compiler-driven engine over one sample.
    ///
    /// Applies the language substitution table, resolves the module map
    /// when package types are requested, merges compiler options (caller
    /// wins), and surfaces engine failure with its cause attached. Results
    /// are never cached.
    pub fn run_analysis(
        &self,
        code: &str,
        lang: &str,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisResult, AnalysisError> {
        let lang = substitute_language(lang);

        let module_map = if settings.use_package_types {
            Some(self.resolve_module_map(lang, settings)?)
        } else {
            None
        };

        let input = EngineInput {
            module_map,
            options: merged_options(&settings.compiler_options),
        };
        self.engine
            .run(code, lang, input)
            .map_err(|source| AnalysisError {
                lang: lang.to_string(),
                source,
            })
    }

    fn resolve_module_map(
        &self,
        lang: &str,
        settings: &AnalysisSettings,
    ) -> Result<VirtualModuleMap, AnalysisError> {
        let wrap = |source: crate::error::VfsError| AnalysisError {
            lang: lang.to_string(),
            source: Box::new(source),
        };
        let mut map = self.module_maps.base_map(settings.target).map_err(wrap)?;
        let folder = settings
            .package_types_path
            .clone()
            .unwrap_or_else(|| DEFAULT_PACKAGE_TYPES_DIR.into());
        add_files_from_folder(&mut map, &folder).map_err(wrap)?;
        Ok(map)
    }
}
