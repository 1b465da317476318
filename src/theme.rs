//! Theme registry and resolution
//!
//! Provides YAML-based syntax themes with compile-time embedded builtins
//! and user-defined themes from the config directory.
//!
//! Theme resolution is an ordered list of strategies, each returning a
//! result, combined first-success-wins:
//! 1. Builtin registry (embedded YAML)
//! 2. User config: `~/.config/codefence/themes/{id}.yaml`
//! 3. Literal filesystem path

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ThemeError, ThemeLoadError};

// Embed theme YAML files at compile time
pub const NORD_DARK_YAML: &str = include_str!("../themes/nord-dark.yaml");
pub const GITHUB_DARK_YAML: &str = include_str!("../themes/github-dark.yaml");
pub const GITHUB_LIGHT_YAML: &str = include_str!("../themes/github-light.yaml");

/// Theme id used when the caller does not name one
pub const DEFAULT_THEME_ID: &str = "nord-dark";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier (e.g. "nord-dark", "github-light")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "nord-dark",
        yaml: NORD_DARK_YAML,
    },
    BuiltinTheme {
        id: "github-dark",
        yaml: GITHUB_DARK_YAML,
    },
    BuiltinTheme {
        id: "github-light",
        yaml: GITHUB_LIGHT_YAML,
    },
];

/// Where a theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/codefence/themes/
    User,
    /// Built-in theme embedded in the binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    pub id: String,
    pub name: String,
    pub source: ThemeSource,
}

/// How the caller names the theme to highlight with
#[derive(Debug, Clone)]
pub enum ThemeSpec {
    /// Resolve by id through the strategy chain
    Name(String),
    /// Use a theme the caller already loaded
    Loaded(Theme),
}

impl ThemeSpec {
    /// The name being asked for, for error reporting
    pub fn display_name(&self) -> &str {
        match self {
            ThemeSpec::Name(name) => name,
            ThemeSpec::Loaded(theme) => &theme.name,
        }
    }
}

impl Default for ThemeSpec {
    fn default() -> Self {
        ThemeSpec::Name(DEFAULT_THEME_ID.to_string())
    }
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, ThemeError> {
        let hex = s.trim_start_matches('#');
        let parse = |range: &str| {
            u8::from_str_radix(range, 16).map_err(|e| ThemeError::Parse(e.to_string()))
        };
        match hex.len() {
            6 => Ok(Color {
                r: parse(&hex[0..2])?,
                g: parse(&hex[2..4])?,
                b: parse(&hex[4..6])?,
                a: 255,
            }),
            8 => Ok(Color {
                r: parse(&hex[0..2])?,
                g: parse(&hex[2..4])?,
                b: parse(&hex[4..6])?,
                a: parse(&hex[6..8])?,
            }),
            _ => Err(ThemeError::Parse(format!("invalid color format: {}", s))),
        }
    }

    /// CSS hex form, "#RRGGBB" (alpha appended only when not opaque)
    pub fn to_css_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    pub colors: ThemeColorsData,
    /// Capture name -> hex color
    pub tokens: HashMap<String, String>,
}

/// Base colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeColorsData {
    pub foreground: String,
    pub background: String,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub foreground: Color,
    pub background: Color,
    token_colors: HashMap<String, Color>,
}

impl Theme {
    /// Load theme from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| ThemeError::Parse(e.to_string()))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, ThemeError> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ThemeError::UnknownId(id.to_string()))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Load a theme from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Theme::from_yaml(&content)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, ThemeError> {
        let mut token_colors = HashMap::new();
        for (capture, hex) in &data.tokens {
            token_colors.insert(capture.clone(), Color::from_hex(hex)?);
        }
        Ok(Theme {
            name: data.name,
            foreground: Color::from_hex(&data.colors.foreground)?,
            background: Color::from_hex(&data.colors.background)?,
            token_colors,
        })
    }

    /// Color for a capture name.
    ///
    /// Hierarchical names fall back to progressively shorter parents
    /// (e.g. "keyword.operator" -> "keyword").
    pub fn color_for(&self, capture: &str) -> Option<Color> {
        let mut current = capture;
        loop {
            if let Some(color) = self.token_colors.get(current) {
                return Some(*color);
            }
            let Some(dot_pos) = current.rfind('.') else {
                break;
            };
            current = &current[..dot_pos];
        }
        None
    }
}

/// Get the user's config directory for codefence
///
/// Returns `~/.config/codefence/` on Unix/macOS and
/// `%APPDATA%\codefence\` on Windows.
pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join("codefence"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        // Use XDG-style ~/.config on all Unix systems including macOS
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join("codefence"))
    }
}

/// Get the user's theme directory
pub fn get_user_themes_dir() -> Option<PathBuf> {
    get_config_dir().map(|config| config.join("themes"))
}

fn resolve_builtin(id: &str) -> Result<Theme, ThemeError> {
    Theme::from_builtin(id)
}

fn resolve_user_dir(id: &str) -> Result<Theme, ThemeError> {
    let dir = get_user_themes_dir().ok_or_else(|| ThemeError::NotFound(id.to_string()))?;
    let path = dir.join(format!("{}.yaml", id));
    if !path.exists() {
        return Err(ThemeError::NotFound(id.to_string()));
    }
    tracing::info!("Loading user theme from {}", path.display());
    Theme::from_file(&path)
}

fn resolve_path(id: &str) -> Result<Theme, ThemeError> {
    let path = Path::new(id);
    if !path.is_file() {
        return Err(ThemeError::NotFound(id.to_string()));
    }
    Theme::from_file(path)
}

/// Resolve a theme spec through the strategy chain.
///
/// Strategies run in order; the first success wins and later strategies are
/// never consulted. When every strategy fails, the error carries the
/// attempted name and the last underlying cause.
pub fn resolve_theme(spec: &ThemeSpec) -> Result<Theme, ThemeLoadError> {
    let name = match spec {
        ThemeSpec::Loaded(theme) => return Ok(theme.clone()),
        ThemeSpec::Name(name) => name,
    };

    let strategies: &[(&str, fn(&str) -> Result<Theme, ThemeError>)] = &[
        ("builtin", resolve_builtin),
        ("user-dir", resolve_user_dir),
        ("path", resolve_path),
    ];

    let mut last_err = ThemeError::UnknownId(name.clone());
    for (strategy, resolve) in strategies {
        match resolve(name) {
            Ok(theme) => {
                tracing::debug!("Resolved theme {} via {} strategy", name, strategy);
                return Ok(theme);
            }
            Err(e) => {
                tracing::debug!("Theme strategy {} failed for {}: {}", strategy, name, e);
                last_err = e;
            }
        }
    }

    Err(ThemeLoadError {
        name: name.clone(),
        source: last_err,
    })
}

/// List all available themes from all sources
///
/// User themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = get_user_themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                        if seen_ids.insert(id.to_string()) {
                            let name = Theme::from_file(&path)
                                .map(|t| t.name)
                                .unwrap_or_else(|_| id.to_string());
                            themes.push(ThemeInfo {
                                id: id.to_string(),
                                name,
                                source: ThemeSource::User,
                            });
                        }
                    }
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}
