//! Language registry
//!
//! The static set of languages the highlighter recognises, split into the
//! common documentation languages, their aliases, and a secondary set of
//! less frequent ones. Membership must be checked before tokenization; an
//! unsupported language is not an error, it routes to the plain renderer.

use tree_sitter::Language;

/// Canonical ids of the common documentation-sample languages
pub const COMMON_LANG_IDS: &[&str] = &[
    "javascript",
    "typescript",
    "tsx",
    "json",
    "html",
    "css",
    "markdown",
    "yaml",
];

/// Accepted aliases for the common ids
pub const COMMON_LANG_ALIASES: &[&str] = &["js", "ts", "jsx", "md", "yml"];

/// Secondary language set: recognised, but rarer in documentation
pub const OTHER_LANG_IDS: &[&str] = &[
    "rust", "python", "go", "php", "c", "cpp", "java", "bash", "sh", "toml", "ini", "xml",
    "scheme",
];

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    JavaScript,
    TypeScript,
    Tsx,
    Json,
    Html,
    Css,
    Markdown,
    Yaml,
    Rust,
    Python,
    Go,
    Php,
    C,
    Cpp,
    Java,
    Bash,
    Toml,
    Ini,
    Xml,
    Scheme,
}

/// Every supported language, in highlighter initialization order
pub const ALL_LANGUAGES: &[LanguageId] = &[
    LanguageId::JavaScript,
    LanguageId::TypeScript,
    LanguageId::Tsx,
    LanguageId::Json,
    LanguageId::Html,
    LanguageId::Css,
    LanguageId::Markdown,
    LanguageId::Yaml,
    LanguageId::Rust,
    LanguageId::Python,
    LanguageId::Go,
    LanguageId::Php,
    LanguageId::C,
    LanguageId::Cpp,
    LanguageId::Java,
    LanguageId::Bash,
    LanguageId::Toml,
    LanguageId::Ini,
    LanguageId::Xml,
    LanguageId::Scheme,
];

// Highlight queries. Grammar crates that ship a usable query are used
// directly; the rest are embedded from queries/.
const JAVASCRIPT_HIGHLIGHTS: &str = include_str!("../queries/javascript/highlights.scm");
const TYPESCRIPT_HIGHLIGHTS: &str = include_str!("../queries/typescript/highlights.scm");
const JSON_HIGHLIGHTS: &str = include_str!("../queries/json/highlights.scm");
const HTML_HIGHLIGHTS: &str = include_str!("../queries/html/highlights.scm");
const CSS_HIGHLIGHTS: &str = include_str!("../queries/css/highlights.scm");
const MARKDOWN_HIGHLIGHTS: &str = include_str!("../queries/markdown/highlights.scm");
const YAML_HIGHLIGHTS: &str = include_str!("../queries/yaml/highlights.scm");
const TOML_HIGHLIGHTS: &str = include_str!("../queries/toml/highlights.scm");

const RUST_HIGHLIGHTS: &str = tree_sitter_rust::HIGHLIGHTS_QUERY;
const PYTHON_HIGHLIGHTS: &str = tree_sitter_python::HIGHLIGHTS_QUERY;
const GO_HIGHLIGHTS: &str = tree_sitter_go::HIGHLIGHTS_QUERY;
const PHP_HIGHLIGHTS: &str = tree_sitter_php::HIGHLIGHTS_QUERY;
const C_HIGHLIGHTS: &str = tree_sitter_c::HIGHLIGHT_QUERY;
const CPP_HIGHLIGHTS: &str = tree_sitter_cpp::HIGHLIGHT_QUERY;
const JAVA_HIGHLIGHTS: &str = tree_sitter_java::HIGHLIGHTS_QUERY;
const BASH_HIGHLIGHTS: &str = tree_sitter_bash::HIGHLIGHT_QUERY;
const SCHEME_HIGHLIGHTS: &str = tree_sitter_racket::HIGHLIGHTS_QUERY;
const INI_HIGHLIGHTS: &str = tree_sitter_ini::HIGHLIGHTS_QUERY;
const XML_HIGHLIGHTS: &str = tree_sitter_xml::XML_HIGHLIGHT_QUERY;

impl LanguageId {
    /// Resolve a fence language string (canonical id or alias)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "javascript" | "js" | "jsx" => Some(LanguageId::JavaScript),
            "typescript" | "ts" => Some(LanguageId::TypeScript),
            "tsx" => Some(LanguageId::Tsx),
            "json" => Some(LanguageId::Json),
            "html" => Some(LanguageId::Html),
            "css" => Some(LanguageId::Css),
            "markdown" | "md" => Some(LanguageId::Markdown),
            "yaml" | "yml" => Some(LanguageId::Yaml),
            "rust" => Some(LanguageId::Rust),
            "python" => Some(LanguageId::Python),
            "go" => Some(LanguageId::Go),
            "php" => Some(LanguageId::Php),
            "c" => Some(LanguageId::C),
            "cpp" => Some(LanguageId::Cpp),
            "java" => Some(LanguageId::Java),
            "bash" | "sh" => Some(LanguageId::Bash),
            "toml" => Some(LanguageId::Toml),
            "ini" => Some(LanguageId::Ini),
            "xml" => Some(LanguageId::Xml),
            "scheme" => Some(LanguageId::Scheme),
            _ => None,
        }
    }

    /// Tree-sitter grammar for this language
    pub fn grammar(self) -> Language {
        match self {
            LanguageId::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            LanguageId::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            LanguageId::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            LanguageId::Json => tree_sitter_json::LANGUAGE.into(),
            LanguageId::Html => tree_sitter_html::LANGUAGE.into(),
            LanguageId::Css => tree_sitter_css::LANGUAGE.into(),
            LanguageId::Markdown => tree_sitter_md::LANGUAGE.into(),
            LanguageId::Yaml => tree_sitter_yaml::language(),
            LanguageId::Rust => tree_sitter_rust::LANGUAGE.into(),
            LanguageId::Python => tree_sitter_python::LANGUAGE.into(),
            LanguageId::Go => tree_sitter_go::LANGUAGE.into(),
            LanguageId::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            LanguageId::C => tree_sitter_c::LANGUAGE.into(),
            LanguageId::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            LanguageId::Java => tree_sitter_java::LANGUAGE.into(),
            LanguageId::Bash => tree_sitter_bash::LANGUAGE.into(),
            LanguageId::Toml => tree_sitter_toml_ng::LANGUAGE.into(),
            LanguageId::Ini => tree_sitter_ini::LANGUAGE.into(),
            LanguageId::Xml => tree_sitter_xml::LANGUAGE_XML.into(),
            LanguageId::Scheme => tree_sitter_racket::LANGUAGE.into(),
        }
    }

    /// Highlight query source for this language
    pub fn highlight_query(self) -> &'static str {
        match self {
            LanguageId::JavaScript => JAVASCRIPT_HIGHLIGHTS,
            // TSX shares the TypeScript query
            LanguageId::TypeScript | LanguageId::Tsx => TYPESCRIPT_HIGHLIGHTS,
            LanguageId::Json => JSON_HIGHLIGHTS,
            LanguageId::Html => HTML_HIGHLIGHTS,
            LanguageId::Css => CSS_HIGHLIGHTS,
            LanguageId::Markdown => MARKDOWN_HIGHLIGHTS,
            LanguageId::Yaml => YAML_HIGHLIGHTS,
            LanguageId::Rust => RUST_HIGHLIGHTS,
            LanguageId::Python => PYTHON_HIGHLIGHTS,
            LanguageId::Go => GO_HIGHLIGHTS,
            LanguageId::Php => PHP_HIGHLIGHTS,
            LanguageId::C => C_HIGHLIGHTS,
            LanguageId::Cpp => CPP_HIGHLIGHTS,
            LanguageId::Java => JAVA_HIGHLIGHTS,
            LanguageId::Bash => BASH_HIGHLIGHTS,
            LanguageId::Toml => TOML_HIGHLIGHTS,
            LanguageId::Ini => INI_HIGHLIGHTS,
            LanguageId::Xml => XML_HIGHLIGHTS,
            LanguageId::Scheme => SCHEME_HIGHLIGHTS,
        }
    }
}

/// Checks whether a particular fence language can be tokenized.
///
/// Membership test against canonical ids, aliases, and the secondary
/// language set. Pure, no failure modes.
pub fn supports_language(lang: &str) -> bool {
    LanguageId::from_name(lang).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_canonical_ids() {
        for id in COMMON_LANG_IDS.iter().chain(OTHER_LANG_IDS) {
            assert!(supports_language(id), "registry should know {id}");
        }
    }

    #[test]
    fn test_supports_aliases() {
        for alias in COMMON_LANG_ALIASES {
            assert!(supports_language(alias), "registry should know alias {alias}");
        }
        assert_eq!(LanguageId::from_name("ts"), Some(LanguageId::TypeScript));
        assert_eq!(LanguageId::from_name("yml"), Some(LanguageId::Yaml));
    }

    #[test]
    fn test_unknown_languages_rejected() {
        assert!(!supports_language("text"));
        assert!(!supports_language("brainfuck"));
        assert!(!supports_language(""));
        // json5 is only known to the analysis substitution table
        assert!(!supports_language("json5"));
    }
}
