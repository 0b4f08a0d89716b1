//! keycalc - keypad calculator engine
//!
//! A button/keyboard-driven calculator: input events drive an expression
//! buffer, `=` evaluates the buffer with an arithmetic parser, and the
//! display projector derives the two display lines from the buffer.
//! Shells (the `keycalc` CLI, a GUI, a test harness) only translate their
//! input into [`event::InputEvent`]s and render [`display::DisplayState`].
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut calc = Calculator::new(CalcConfig::default());
//!
//! let outcome = calc.type_keys("12×(3+4)=");
//! assert_eq!(outcome.display.main_text, "84");
//!
//! let outcome = calc.type_keys("÷0=");
//! assert_eq!(outcome.error, Some(CalcError::DivisionByZero));
//! assert_eq!(outcome.display.main_text, "Error");
//!
//! // Expressions can also be evaluated directly
//! assert_eq!(evaluate("2+3*4"), Ok(14.0));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod buffer;
pub mod config;
pub mod core;
pub mod display;
pub mod driver;
pub mod event;
pub mod format;
pub mod session;
pub mod special;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::buffer::{Entry, ExprToken, ExpressionBuffer, Phase};
    pub use crate::config::{CalcConfig, Variant};
    pub use crate::core::evaluator::{evaluate, Evaluator};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Operation};
    pub use crate::display::DisplayState;
    pub use crate::driver::{CalculatorDriver, SharedCalculator};
    pub use crate::event::{Grouping, InputEvent};
    pub use crate::format::{format_number, format_result};
    pub use crate::session::{Calculator, EventOutcome};
    pub use crate::special::apply_sqrt;
}
