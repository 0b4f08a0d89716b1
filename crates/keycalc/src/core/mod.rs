//! Arithmetic core: operators, parser and evaluator
//!
//! Everything here works on canonical expression strings and `f64`
//! values. The keypad state machine lives in [`crate::buffer`].

pub mod evaluator;
mod operations;
pub mod parser;

pub(crate) use operations::check_finite;
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types - exhaustive enum ensures all cases handled
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Malformed expression (unbalanced parentheses, trailing operator, ...)
    #[error("Invalid expression: {0}")]
    SyntaxError(String),
    /// Division or modulo by zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Result is NaN or infinite
    #[error("Result is not a finite number")]
    NonFinite,
    /// Square root of a negative number
    #[error("Square root of negative number: {0}")]
    DomainError(f64),
}

impl CalcError {
    /// Creates a syntax error
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::SyntaxError(message.into())
    }

    /// The message a shell shows in its error dialog
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "Cannot divide by zero!",
            Self::SyntaxError(_) => "Invalid expression!",
            Self::NonFinite => "Result is not a finite number!",
            Self::DomainError(_) => "Cannot take the square root of a negative number!",
        }
    }
}
