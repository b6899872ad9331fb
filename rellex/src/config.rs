//! Lexer settings.
use std::path::Path;

use log::debug;
use relexpr::{Error, Pos, Result};
use serde::Deserialize;

/// Settings handed to the primitive lexer. The filter never looks at them.
///
/// ```toml
/// filename = "model.als"
/// line_offset = 10
/// allow_dollar = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexerConfig {
    /// Name recorded in every token position.
    pub filename: String,
    /// Added to every line number, for sources embedded in a larger file.
    pub line_offset: u32,
    /// Accept `$` inside identifiers (generated names such as `this$0`).
    pub allow_dollar: bool,
}

impl LexerConfig {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_line_offset(mut self, line_offset: u32) -> Self {
        self.line_offset = line_offset;
        self
    }

    pub fn with_allow_dollar(mut self, allow_dollar: bool) -> Self {
        self.allow_dollar = allow_dollar;
        self
    }

    /// Parse settings from a TOML fragment. Missing keys keep their defaults.
    ///
    /// # Errors
    /// [`Error::Syntax`] if the fragment is not valid TOML or has unknown keys.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: Self = toml::from_str(src).map_err(|e| {
            Error::syntax(
                Pos::unknown(),
                format!("invalid lexer configuration: {}", e.message()),
            )
        })?;
        debug!("loaded lexer configuration {config:?}");
        Ok(config)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    /// [`Error::Syntax`] if the file cannot be read or parsed.
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|e| {
            Error::syntax(
                Pos::new(path.display().to_string(), 1, 1),
                format!("IO error: {e}"),
            )
        })?;
        Self::from_toml_str(&src)
    }

    /// Position of the first character of the input.
    pub(crate) fn start_pos(&self) -> Pos {
        Pos::new(self.filename.as_str(), self.line_offset.saturating_add(1), 1)
    }
}
