//! AST evaluator
//!
//! Every intermediate value goes through [`Operation::apply`], so a
//! non-finite value is reported where it first appears.

use tracing::debug;

use crate::core::operations::check_finite;
use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcResult, Operation};

/// Evaluator for AST expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => check_finite(*n),
            AstNode::Negate(inner) => {
                let value = self.evaluate(inner)?;
                Operation::Multiply.apply(value, -1.0)
            }
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                op.apply(left_val, right_val)
            }
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        let value = self.evaluate(&ast)?;
        debug!(expression = input, value, "evaluated expression");
        Ok(value)
    }
}

/// Parses and evaluates `expression` with a default [`Evaluator`]
pub fn evaluate(expression: &str) -> CalcResult<f64> {
    Evaluator::new().evaluate_str(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;

    // ===== AST evaluation tests =====

    #[test]
    fn test_evaluate_number() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&AstNode::number(42.0)), Ok(42.0));
    }

    #[test]
    fn test_evaluate_double_negative() {
        let eval = Evaluator::new();
        let ast = AstNode::negate(AstNode::negate(AstNode::number(5.0)));
        assert_eq!(eval.evaluate(&ast), Ok(5.0));
    }

    #[test]
    fn test_evaluate_nested_expression() {
        let eval = Evaluator::new();
        // (1 + 2) * (3 + 4) = 21
        let ast = AstNode::binary(
            AstNode::binary(AstNode::number(1.0), Operation::Add, AstNode::number(2.0)),
            Operation::Multiply,
            AstNode::binary(AstNode::number(3.0), Operation::Add, AstNode::number(4.0)),
        );
        assert_eq!(eval.evaluate(&ast), Ok(21.0));
    }

    #[test]
    fn test_evaluate_infinite_literal() {
        let eval = Evaluator::new();
        assert_eq!(
            eval.evaluate(&AstNode::number(f64::INFINITY)),
            Err(CalcError::NonFinite)
        );
    }

    // ===== String evaluation tests =====

    #[test]
    fn test_evaluate_str_basics() {
        assert_eq!(evaluate("2+3"), Ok(5.0));
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("10-4-3"), Ok(3.0));
        assert_eq!(evaluate("17 % 5"), Ok(2.0));
        assert_eq!(evaluate("-5 + 10"), Ok(5.0));
    }

    #[test]
    fn test_evaluate_str_glyphs() {
        assert_eq!(evaluate("6 × 7"), Ok(42.0));
        assert_eq!(evaluate("9 ÷ 3 − 1"), Ok(2.0));
    }

    #[test]
    fn test_evaluate_deep_nesting_is_a_syntax_error() {
        let deep = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(evaluate(&deep), Err(CalcError::SyntaxError(_))));
        let negations = format!("{}1", "-".repeat(100_000));
        assert!(matches!(evaluate(&negations), Err(CalcError::SyntaxError(_))));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(evaluate("2/0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("1+(4%0)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_evaluate_incomplete() {
        assert!(matches!(evaluate("2+"), Err(CalcError::SyntaxError(_))));
        assert!(matches!(evaluate(""), Err(CalcError::SyntaxError(_))));
        assert!(matches!(evaluate("((1)"), Err(CalcError::SyntaxError(_))));
    }

    #[test]
    fn test_evaluate_overflow() {
        let huge = format!("{}", f64::MAX);
        assert_eq!(
            evaluate(&format!("{huge}*10")),
            Err(CalcError::NonFinite)
        );
    }

    #[test]
    fn test_evaluate_syntax_checked_before_arithmetic() {
        // A trailing operator is reported even when the prefix divides by zero
        assert!(matches!(evaluate("1/0+"), Err(CalcError::SyntaxError(_))));
    }
}
