//! Terminal output formatting

use console::style;
use keycalc::display::DisplayState;

/// Styles display lines for the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    /// Whether to use colors
    pub use_color: bool,
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub const fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// A result or main display line
    #[must_use]
    pub fn result(&self, text: &str) -> String {
        if self.use_color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// The expression line
    #[must_use]
    pub fn expression(&self, text: &str) -> String {
        if self.use_color {
            style(text).dim().to_string()
        } else {
            text.to_string()
        }
    }

    /// A modal error message
    #[must_use]
    pub fn error(&self, message: &str) -> String {
        if self.use_color {
            format!("{} {message}", style("✗").red().bold())
        } else {
            format!("! {message}")
        }
    }

    /// Both display lines; the expression line is omitted when empty
    #[must_use]
    pub fn display(&self, display: &DisplayState) -> String {
        let main = if display.is_error() && self.use_color {
            style(display.main_text.as_str()).red().bold().to_string()
        } else {
            self.result(&display.main_text)
        };
        if display.expression_text.is_empty() {
            main
        } else {
            format!("{}\n{main}", self.expression(&display.expression_text))
        }
    }
}
