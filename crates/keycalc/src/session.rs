//! Calculator session: dispatches events into the buffer

use tracing::{debug, warn};

use crate::buffer::{ExpressionBuffer, Phase};
use crate::config::CalcConfig;
use crate::core::evaluator::Evaluator;
use crate::core::{CalcError, CalcResult};
use crate::display::DisplayState;
use crate::event::InputEvent;
use crate::format::format_number;
use crate::special;

/// What the shell renders after an event
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    /// Display after the event
    pub display: DisplayState,
    /// Error raised by this event, shown once as a modal message
    pub error: Option<CalcError>,
}

impl EventOutcome {
    /// Returns true if the event raised no error
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Modal text for the error, if any
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        self.error.as_ref().map(CalcError::user_message)
    }
}

/// A calculator: buffer, evaluator and configuration
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalcConfig,
    buffer: ExpressionBuffer,
    evaluator: Evaluator,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalcConfig::default())
    }
}

impl Calculator {
    /// Creates a calculator in the initial state
    #[must_use]
    pub fn new(config: CalcConfig) -> Self {
        Self {
            config,
            buffer: ExpressionBuffer::new(config.variant),
            evaluator: Evaluator::new(),
        }
    }

    /// Returns the configuration
    #[must_use]
    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Returns the expression buffer
    #[must_use]
    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    /// Returns the current display
    #[must_use]
    pub fn display(&self) -> DisplayState {
        DisplayState::project(&self.buffer)
    }

    /// Returns to the initial state
    pub fn reset(&mut self) {
        self.buffer.clear_all();
    }

    /// Handles one event to completion
    pub fn handle(&mut self, event: InputEvent) -> EventOutcome {
        if !self.config.variant.supports(&event) {
            debug!(?event, variant = %self.config.variant, "event ignored by variant");
            return EventOutcome {
                display: self.display(),
                error: None,
            };
        }

        let before = self.buffer.phase();
        let error = self.dispatch(event).err();
        let after = self.buffer.phase();
        if before == after {
            debug!(?event, phase = ?after, "handled event");
        } else {
            debug!(?event, from = ?before, to = ?after, "handled event");
        }

        EventOutcome {
            display: self.display(),
            error,
        }
    }

    /// Feeds a key sequence and returns the last outcome
    pub fn type_keys(&mut self, keys: &str) -> EventOutcome {
        let mut outcome = EventOutcome {
            display: self.display(),
            error: None,
        };
        for event in InputEvent::parse_keys(keys) {
            outcome = self.handle(event);
        }
        outcome
    }

    /// Evaluates an expression string without touching the buffer,
    /// formatted with the configured precision
    pub fn evaluate_expression(&self, expression: &str) -> CalcResult<String> {
        let value = self.evaluator.evaluate_str(expression)?;
        Ok(format_number(value, self.config.precision))
    }

    fn dispatch(&mut self, event: InputEvent) -> CalcResult<()> {
        match event {
            InputEvent::Digit(d) => self.buffer.append_digit(d),
            InputEvent::DecimalPoint => self.buffer.append_decimal_point(),
            InputEvent::Operator(op) => self.buffer.append_operator(op),
            InputEvent::Grouping(g) => self.buffer.append_grouping(g),
            InputEvent::Equals => return self.equals(),
            InputEvent::ClearAll => self.buffer.clear_all(),
            InputEvent::ClearEntry => self.buffer.clear_entry(),
            InputEvent::Backspace => self.buffer.backspace(),
            InputEvent::ToggleSign => self.buffer.toggle_sign(),
            InputEvent::SquareRoot => return self.square_root(),
        }
        Ok(())
    }

    fn equals(&mut self) -> CalcResult<()> {
        if self.buffer.phase() == Phase::Error {
            self.buffer.clear_all();
            return Ok(());
        }
        let Some(expression) = self.buffer.completed_expression() else {
            return Ok(());
        };

        match self.evaluator.evaluate_str(&expression) {
            Ok(value) => {
                self.buffer
                    .commit_result(format_number(value, self.config.precision));
                Ok(())
            }
            Err(e) => {
                warn!(%expression, error = %e, "evaluation failed");
                self.buffer.fail();
                Err(e)
            }
        }
    }

    fn square_root(&mut self) -> CalcResult<()> {
        self.buffer.recover();
        let entry = self.buffer.entry().as_str().to_string();

        match special::apply_sqrt(&entry) {
            Ok(value) => {
                self.buffer
                    .replace_entry(format_number(value, self.config.precision));
                Ok(())
            }
            Err(e) => {
                warn!(%entry, error = %e, "square root failed");
                self.buffer.fail();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::core::Operation;
    use crate::event::Grouping;

    fn calculator() -> Calculator {
        Calculator::default()
    }

    #[test]
    fn test_handle_digits() {
        let mut calc = calculator();
        calc.handle(InputEvent::Digit(4));
        let outcome = calc.handle(InputEvent::Digit(2));
        assert!(outcome.is_ok());
        assert_eq!(outcome.display.main_text, "42");
    }

    #[test]
    fn test_simple_sum() {
        let mut calc = calculator();
        let outcome = calc.type_keys("2+3=");
        assert_eq!(outcome.display.main_text, "5");
        assert_eq!(outcome.display.expression_text, "5");
        assert_eq!(calc.buffer().phase(), Phase::Empty);
    }

    #[test]
    fn test_digit_after_result_starts_over() {
        let mut calc = calculator();
        let outcome = calc.type_keys("2+3=9");
        assert_eq!(outcome.display.main_text, "9");
        assert_eq!(outcome.display.expression_text, "9");
    }

    #[test]
    fn test_chained_result() {
        let mut calc = calculator();
        let outcome = calc.type_keys("2+3=*4=");
        assert_eq!(outcome.display.main_text, "20");
    }

    #[test]
    fn test_precedence_through_keys() {
        let mut calc = calculator();
        assert_eq!(calc.type_keys("2+3*4=").display.main_text, "14");
    }

    #[test]
    fn test_repeat_operand() {
        let mut calc = calculator();
        assert_eq!(calc.type_keys("2+=").display.main_text, "4");
    }

    #[test]
    fn test_equals_on_empty_is_noop() {
        let mut calc = calculator();
        let outcome = calc.handle(InputEvent::Equals);
        assert!(outcome.is_ok());
        assert_eq!(outcome.display, DisplayState::project(&ExpressionBuffer::default()));
    }

    #[test]
    fn test_division_by_zero() {
        let mut calc = calculator();
        let outcome = calc.type_keys("2/0=");
        assert_eq!(outcome.error, Some(CalcError::DivisionByZero));
        assert_eq!(outcome.message(), Some("Cannot divide by zero!"));
        assert_eq!(outcome.display.main_text, "Error");
        assert_eq!(outcome.display.expression_text, "");
    }

    #[test]
    fn test_error_reported_once() {
        let mut calc = calculator();
        calc.type_keys("2/0=");
        let outcome = calc.handle(InputEvent::Digit(7));
        assert!(outcome.is_ok());
        assert_eq!(outcome.display.main_text, "7");
    }

    #[test]
    fn test_equals_after_error_clears() {
        let mut calc = calculator();
        calc.type_keys("2/0=");
        let outcome = calc.handle(InputEvent::Equals);
        assert!(outcome.is_ok());
        assert_eq!(outcome.display.main_text, "0");
    }

    #[test]
    fn test_syntax_error_message() {
        let mut calc = calculator();
        let outcome = calc.type_keys("(2+3=");
        assert!(matches!(outcome.error, Some(CalcError::SyntaxError(_))));
        assert_eq!(outcome.message(), Some("Invalid expression!"));
    }

    #[test]
    fn test_square_root() {
        let mut calc = calculator();
        let outcome = calc.type_keys("16r");
        assert_eq!(outcome.display.main_text, "4");
        assert_eq!(outcome.display.expression_text, "4");
        // Digits append to a square root result
        assert_eq!(calc.type_keys("2").display.main_text, "42");
    }

    #[test]
    fn test_square_root_irrational() {
        let mut calc = calculator();
        assert_eq!(calc.type_keys("2r").display.main_text, "1.41421356");
    }

    #[test]
    fn test_square_root_negative() {
        let mut calc = calculator();
        let outcome = calc.type_keys("1nr");
        assert_eq!(outcome.error, Some(CalcError::DomainError(-1.0)));
        assert_eq!(
            outcome.message(),
            Some("Cannot take the square root of a negative number!")
        );
        assert!(outcome.display.is_error());
    }

    #[test]
    fn test_square_root_after_error_uses_zero() {
        let mut calc = calculator();
        calc.type_keys("2/0=");
        let outcome = calc.handle(InputEvent::SquareRoot);
        assert!(outcome.is_ok());
        assert_eq!(outcome.display.main_text, "0");
    }

    #[test]
    fn test_precision_config() {
        let mut calc = Calculator::new(CalcConfig::new().with_precision(3));
        assert_eq!(calc.type_keys("1/3=").display.main_text, "0.333");
    }

    #[test]
    fn test_basic_variant_ignores_extended_events() {
        let mut calc = Calculator::new(CalcConfig::new().with_variant(Variant::Basic));
        calc.type_keys("9");
        for event in [
            InputEvent::Operator(Operation::Modulo),
            InputEvent::Grouping(Grouping::Open),
            InputEvent::SquareRoot,
        ] {
            let outcome = calc.handle(event);
            assert!(outcome.is_ok());
            assert_eq!(outcome.display.main_text, "9");
            assert_eq!(calc.buffer().phase(), Phase::EnteringNumber);
        }
    }

    #[test]
    fn test_basic_clear_entry_drops_last_char() {
        let mut calc = Calculator::new(CalcConfig::new().with_variant(Variant::Basic));
        assert_eq!(calc.type_keys("123e").display.main_text, "12");
    }

    #[test]
    fn test_extended_clear_entry_resets_entry() {
        let mut calc = calculator();
        assert_eq!(calc.type_keys("123e").display.main_text, "0");
    }

    #[test]
    fn test_reset() {
        let mut calc = calculator();
        calc.type_keys("12+(3");
        calc.reset();
        assert_eq!(calc.buffer(), &ExpressionBuffer::default());
    }

    #[test]
    fn test_evaluate_expression() {
        let calc = calculator();
        assert_eq!(calc.evaluate_expression("7 % 3").as_deref(), Ok("1"));
        assert_eq!(calc.evaluate_expression("-7 % 3").as_deref(), Ok("2"));
        assert_eq!(
            calc.evaluate_expression("1/0"),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_type_keys_empty() {
        let mut calc = calculator();
        let outcome = calc.type_keys("");
        assert!(outcome.is_ok());
        assert_eq!(outcome.display.main_text, "0");
    }
}
