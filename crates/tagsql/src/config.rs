//! Statement configuration.
//!
//! Only identifier quoting is configurable; it can be set in code or loaded
//! from a config file:
//!
//! ```toml
//! quote = "backtick"
//! ```

use serde::{Deserialize, Serialize};

/// How identifiers are wrapped in INSERT/REPLACE/UPDATE/DELETE statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Identifiers are emitted as-is (default).
    #[default]
    None,
    /// MySQL style: `` `name` ``.
    Backtick,
    /// ANSI style: `"name"`.
    Double,
}

impl QuoteStyle {
    /// Wrap an identifier, doubling any embedded quote character.
    pub fn wrap(self, ident: &str) -> String {
        let q = match self {
            QuoteStyle::None => return ident.to_string(),
            QuoteStyle::Backtick => '`',
            QuoteStyle::Double => '"',
        };
        let mut out = String::with_capacity(ident.len() + 2);
        out.push(q);
        for c in ident.chars() {
            if c == q {
                out.push(q);
            }
            out.push(c);
        }
        out.push(q);
        out
    }
}

/// Configuration for statement rendering.
///
/// SELECT and TRUNCATE are always rendered unwrapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementConfig {
    pub quote: QuoteStyle,
}

impl StatementConfig {
    /// Create a new configuration with defaults (no identifier quoting).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier quoting style.
    pub fn with_quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    /// Shorthand for backtick quoting.
    pub fn mysql() -> Self {
        Self::new().with_quote(QuoteStyle::Backtick)
    }
}
