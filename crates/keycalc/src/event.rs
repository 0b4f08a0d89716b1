//! Input events consumed from the UI shell
//!
//! Both button grids and the keyboard collapse into [`InputEvent`]; the
//! shell only has to map its widgets and keys through [`InputEvent::from_label`]
//! and [`InputEvent::from_key`].

use serde::{Deserialize, Serialize};

use crate::core::Operation;

/// Parenthesis tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// `(`
    Open,
    /// `)`
    Close,
}

impl Grouping {
    /// Returns the parenthesis character
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Self::Open => '(',
            Self::Close => ')',
        }
    }
}

/// A discrete button activation or key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    DecimalPoint,
    /// Binary operator
    Operator(Operation),
    /// Parenthesis
    Grouping(Grouping),
    /// Evaluate the expression
    Equals,
    /// `C`: reset everything
    ClearAll,
    /// `CE`: clear the current entry
    ClearEntry,
    /// Remove the last character
    Backspace,
    /// `±`
    ToggleSign,
    /// `√`
    SquareRoot,
}

impl InputEvent {
    /// Creates a digit event, rejecting values above 9
    #[must_use]
    pub fn digit(d: u8) -> Option<Self> {
        (d <= 9).then_some(Self::Digit(d))
    }

    /// Maps a keyboard character to an event
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        if let Some(d) = key.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }

        match key {
            '.' | ',' => Some(Self::DecimalPoint),
            '(' => Some(Self::Grouping(Grouping::Open)),
            ')' => Some(Self::Grouping(Grouping::Close)),
            '=' | '\n' | '\r' => Some(Self::Equals),
            'c' | 'C' | '\u{1b}' => Some(Self::ClearAll),
            'e' | 'E' => Some(Self::ClearEntry),
            '\u{8}' | '\u{7f}' | '⌫' => Some(Self::Backspace),
            'n' | 'N' | '±' => Some(Self::ToggleSign),
            'r' | 'R' | '√' => Some(Self::SquareRoot),
            _ => Operation::from_char(key).map(Self::Operator),
        }
    }

    /// Maps a button label to an event
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "C" => Some(Self::ClearAll),
            "CE" => Some(Self::ClearEntry),
            "⌫" | "←" => Some(Self::Backspace),
            "±" | "+/-" => Some(Self::ToggleSign),
            "√" | "sqrt" => Some(Self::SquareRoot),
            "=" => Some(Self::Equals),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    // Letter shortcuts are keyboard-only
                    (Some(c), None) => Self::from_key(c).filter(|event| {
                        !matches!(
                            event,
                            Self::ClearEntry | Self::ToggleSign | Self::SquareRoot
                        )
                    }),
                    _ => None,
                }
            }
        }
    }

    /// Returns the button label for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Operator(op) => op.glyph().to_string(),
            Self::Grouping(g) => g.as_char().to_string(),
            Self::Equals => "=".to_string(),
            Self::ClearAll => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::SquareRoot => "√".to_string(),
        }
    }

    /// Maps every character of `keys` to an event, skipping whitespace and
    /// unmapped characters
    pub fn parse_keys(keys: &str) -> impl Iterator<Item = Self> + '_ {
        keys.chars()
            .filter(|c| !c.is_whitespace() || *c == '\n')
            .filter_map(Self::from_key)
    }
}
