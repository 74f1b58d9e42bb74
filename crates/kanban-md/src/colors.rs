//! Semantic color theme for board output
//!
//! - `column` => bold blue: column headings
//! - `row` => cyan: layout row separators
//! - `success` => green: valid boards, written files
//! - `warning` => yellow: missing includes, disabled rules
//! - `fail` => red: invalid boards
//! - `muted` => dimmed: card descriptions and tags

use std::sync::LazyLock;

use owo_colors::Style;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    /// Column headings
    pub column: Style,
    /// Layout row separators
    pub row: Style,
    /// Success messages
    pub success: Style,
    /// Warnings
    pub warning: Style,
    /// Errors
    pub fail: Style,
    /// Secondary text
    pub muted: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            column: Style::new().blue().bold(),
            row: Style::new().cyan(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            fail: Style::new().red(),
            muted: Style::new().dimmed(),
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);
