//! Colour theme for console output.
//!
//! The default theme is embedded via [`include_str!`] so the console works
//! without any files on disk. Module colours come from a fixed table keyed by
//! module name; names missing from the table share a single fallback colour.
//! Lookups ignore ASCII case, since the config layer may fold keys.

use std::collections::HashMap;

use config::{Config, File, FileFormat};
use crossterm::style::{Color, ContentStyle, Stylize};
use serde::Deserialize;

use crate::types::LogLevel;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> ContentStyle {
        let mut style = ContentStyle::new();
        if let Some(color) = self.fg.as_deref().and_then(parse_color) {
            style = style.with(color);
        }
        if self.bold {
            style = style.bold();
        }
        if self.dim {
            style = style.dim();
        }
        if self.italic {
            style = style.italic();
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawLevels {
    debug: RawStyle,
    info: RawStyle,
    warn: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawModules {
    fallback: String,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    timestamp: RawStyle,
    notice: RawStyle,
    levels: RawLevels,
    modules: RawModules,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Resolved console styles. Cheap to clone; no allocation at format time
/// beyond the line itself.
#[derive(Debug, Clone)]
pub struct Theme {
    pub timestamp: ContentStyle,
    /// Operator-facing notices (level confirmations, the startup banner).
    pub notice: ContentStyle,
    pub level_debug: ContentStyle,
    pub level_info: ContentStyle,
    pub level_warn: ContentStyle,
    pub level_error: ContentStyle,

    /// Lowercased module name → colour.
    module_colors: HashMap<String, Color>,
    module_fallback: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_default()
    }
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the unit tests rule
    /// out.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Parse a theme from a TOML string.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let module_fallback = parse_color(&raw.modules.fallback)
            .ok_or_else(|| anyhow::anyhow!("invalid fallback colour {:?}", raw.modules.fallback))?;

        let mut theme = Self {
            timestamp: raw.timestamp.into_style(),
            notice: raw.notice.into_style(),
            level_debug: raw.levels.debug.into_style(),
            level_info: raw.levels.info.into_style(),
            level_warn: raw.levels.warn.into_style(),
            level_error: raw.levels.error.into_style(),
            module_colors: HashMap::new(),
            module_fallback,
        };
        theme.set_module_colors(&raw.modules.colors);
        Ok(theme)
    }

    /// Override module colours. Unparseable colours are skipped with a
    /// warning.
    pub fn set_module_colors(&mut self, colors: &HashMap<String, String>) {
        for (module, color) in colors {
            match parse_color(color) {
                Some(c) => {
                    self.module_colors.insert(module.to_ascii_lowercase(), c);
                }
                None => tracing::warn!(module = %module, color = %color, "ignoring unparseable module colour"),
            }
        }
    }

    pub fn level_style(&self, level: LogLevel) -> ContentStyle {
        match level {
            LogLevel::Debug => self.level_debug,
            LogLevel::Info => self.level_info,
            LogLevel::Warn => self.level_warn,
            LogLevel::Error => self.level_error,
        }
    }

    /// Bold, in the module's colour or the shared fallback.
    pub fn module_style(&self, module: &str) -> ContentStyle {
        let color = self
            .module_colors
            .get(&module.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.module_fallback);
        ContentStyle::new().with(color).bold()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a crossterm [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_grey`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `ansi:N`
pub(crate) fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "dark_red" => Some(Color::DarkRed),
        "green" => Some(Color::Green),
        "dark_green" => Some(Color::DarkGreen),
        "yellow" => Some(Color::Yellow),
        "dark_yellow" => Some(Color::DarkYellow),
        "blue" => Some(Color::Blue),
        "dark_blue" => Some(Color::DarkBlue),
        "magenta" => Some(Color::Magenta),
        "dark_magenta" => Some(Color::DarkMagenta),
        "cyan" => Some(Color::Cyan),
        "dark_cyan" => Some(Color::DarkCyan),
        "grey" | "gray" => Some(Color::Grey),
        "dark_grey" | "dark_gray" => Some(Color::DarkGrey),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 && s.is_ascii() => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb { r, g, b })
        }
        s if s.starts_with("ansi:") => {
            let n: u8 = s["ansi:".len()..].parse().ok()?;
            Some(Color::AnsiValue(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
