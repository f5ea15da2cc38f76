//! Terminal output formatting.
//!
//! Submodules:
//! - [`tree`]: dependency tree rendering with ASCII/Unicode connectors
//!
//! [`OutputConfig`] controls width, ASCII fallback, and color use; it is
//! read once from the environment per command.

pub mod tree;

use std::env;

use terminal_size::{terminal_size, Width};

const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width; rendered tree lines are bounded to it.
    pub max_width: usize,
    /// Use ASCII-only connectors and markers instead of Unicode.
    pub use_ascii: bool,
    /// Use ANSI colors.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a config with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// - `PREFLIGHT_MAX_WIDTH`: maximum content width (default: terminal
    ///   width, else 80)
    /// - `PREFLIGHT_ASCII`: `1`/`true` forces ASCII-only output
    /// - `NO_COLOR`: any value disables colors
    /// - `PREFLIGHT_COLOR`: `0`/`false` disables colors
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = env::var("PREFLIGHT_MAX_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .or_else(|| terminal_size().map(|(Width(w), _)| usize::from(w)))
            .unwrap_or(DEFAULT_MAX_CONTENT_WIDTH);

        let use_ascii = env::var("PREFLIGHT_ASCII")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let no_color = env::var_os("NO_COLOR").is_some();
        let color_disabled = env::var("PREFLIGHT_COLOR")
            .map(|v| v == "0" || v.eq_ignore_ascii_case("false"))
            .unwrap_or(false);

        Self {
            max_width,
            use_ascii,
            use_colors: !(no_color || color_disabled),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_WIDTH, false, true)
    }
}
