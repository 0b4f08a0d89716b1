//! Projection of the buffer onto the two display lines

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buffer::ExpressionBuffer;

/// Text shown on the calculator display
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayState {
    /// Large line: the entry, a result, or `Error`
    pub main_text: String,
    /// Small line: the expression with display glyphs
    pub expression_text: String,
}

impl DisplayState {
    /// Text shown on the main line in the error phase
    pub const ERROR_TEXT: &'static str = "Error";

    /// Projects a buffer onto the display
    #[must_use]
    pub fn project(buffer: &ExpressionBuffer) -> Self {
        if buffer.is_error() {
            return Self {
                main_text: Self::ERROR_TEXT.to_string(),
                expression_text: String::new(),
            };
        }

        let expression_text = if buffer.tokens().is_empty() && buffer.entry().is_zero() {
            String::new()
        } else if buffer.tokens().is_empty() {
            buffer.entry().as_str().to_string()
        } else {
            buffer.display_expression()
        };

        Self {
            main_text: buffer.entry().as_str().to_string(),
            expression_text,
        }
    }

    /// Returns true when the main line shows an error
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.main_text == Self::ERROR_TEXT
    }
}

impl From<&ExpressionBuffer> for DisplayState {
    fn from(buffer: &ExpressionBuffer) -> Self {
        Self::project(buffer)
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expression_text.is_empty() {
            write!(f, "{}", self.main_text)
        } else {
            write!(f, "{}\n{}", self.expression_text, self.main_text)
        }
    }
}
