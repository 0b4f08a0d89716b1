//! Calculator configuration

use serde::{Deserialize, Serialize};

use crate::core::Operation;
use crate::event::{Grouping, InputEvent};
use crate::format::{DEFAULT_PRECISION, MAX_PRECISION};

/// Which button grid the calculator offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Digits, `.`, `+ − × ÷`, `=`, `C`, `CE` and `±`
    Basic,
    /// Basic plus `%`, parentheses, backspace and square root
    #[default]
    Extended,
}

impl Variant {
    /// Returns the variant name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
        }
    }

    /// Returns true if the variant's keypad offers this event
    #[must_use]
    pub const fn supports(&self, event: &InputEvent) -> bool {
        match self {
            Self::Extended => true,
            Self::Basic => !matches!(
                event,
                InputEvent::Operator(Operation::Modulo)
                    | InputEvent::Grouping(Grouping::Open | Grouping::Close)
                    | InputEvent::SquareRoot
            ),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Keypad variant
    pub variant: Variant,
    /// Decimal places non-integer results are rounded to
    pub precision: usize,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Extended,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keypad variant
    #[must_use]
    pub const fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the result precision, clamped to the supported range
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }
}
