//! Calculator drivers
//!
//! Shells and tests talk to a calculator through [`CalculatorDriver`], so
//! one key sequence can be replayed against a plain [`Calculator`] and a
//! [`SharedCalculator`] alike.
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! fn sum<D: CalculatorDriver>(driver: &mut D) -> String {
//!     driver.type_keys("2+3=").display.main_text
//! }
//!
//! assert_eq!(sum(&mut Calculator::default()), "5");
//! assert_eq!(sum(&mut SharedCalculator::default()), "5");
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::CalcConfig;
use crate::display::DisplayState;
use crate::event::InputEvent;
use crate::session::{Calculator, EventOutcome};

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Sends one event
    fn send(&mut self, event: InputEvent) -> EventOutcome;

    /// Gets the current display
    fn display(&self) -> DisplayState;

    /// Sends every event of a key sequence, returning the last outcome
    fn type_keys(&mut self, keys: &str) -> EventOutcome {
        let mut outcome = EventOutcome {
            display: self.display(),
            error: None,
        };
        for event in InputEvent::parse_keys(keys) {
            outcome = self.send(event);
        }
        outcome
    }

    /// Presses the button with `label`; unknown labels return `None`
    fn press(&mut self, label: &str) -> Option<EventOutcome> {
        InputEvent::from_label(label).map(|event| self.send(event))
    }
}

impl CalculatorDriver for Calculator {
    fn send(&mut self, event: InputEvent) -> EventOutcome {
        self.handle(event)
    }

    fn display(&self) -> DisplayState {
        Self::display(self)
    }

    fn type_keys(&mut self, keys: &str) -> EventOutcome {
        Self::type_keys(self, keys)
    }
}

/// Cloneable handle to one calculator, for shells that dispatch events
/// from several threads
///
/// A panic while the lock is held does not poison later use; the buffer
/// is always left in a valid phase.
#[derive(Debug, Clone, Default)]
pub struct SharedCalculator {
    inner: Arc<Mutex<Calculator>>,
}

impl SharedCalculator {
    /// Creates a shared calculator
    #[must_use]
    pub fn new(config: CalcConfig) -> Self {
        Self::from(Calculator::new(config))
    }

    /// Runs `f` with exclusive access to the calculator
    pub fn with<R>(&self, f: impl FnOnce(&mut Calculator) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Calculator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Calculator> for SharedCalculator {
    fn from(calculator: Calculator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(calculator)),
        }
    }
}

impl CalculatorDriver for SharedCalculator {
    fn send(&mut self, event: InputEvent) -> EventOutcome {
        self.lock().handle(event)
    }

    fn display(&self) -> DisplayState {
        self.lock().display()
    }

    fn type_keys(&mut self, keys: &str) -> EventOutcome {
        self.lock().type_keys(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::core::CalcError;

    #[test]
    fn test_press_labels() {
        let mut calc = Calculator::default();
        for label in ["7", "×", "6"] {
            assert!(calc.press(label).is_some());
        }
        let outcome = calc.press("=").unwrap();
        assert_eq!(outcome.display.main_text, "42");
        assert!(calc.press("xyz").is_none());
    }

    #[test]
    fn test_shared_clones_see_same_state() {
        let mut a = SharedCalculator::default();
        let b = a.clone();
        a.type_keys("12");
        assert_eq!(b.display().main_text, "12");
    }

    #[test]
    fn test_shared_with_config() {
        let mut shared = SharedCalculator::new(CalcConfig::new().with_variant(Variant::Basic));
        assert_eq!(shared.with(|calc| calc.config().variant), Variant::Basic);
        let outcome = shared.type_keys("9r");
        assert_eq!(outcome.display.main_text, "9");
    }

    #[test]
    fn test_shared_across_threads() {
        let shared = SharedCalculator::default();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut driver = shared.clone();
                std::thread::spawn(move || {
                    driver.send(InputEvent::Digit(1));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.display().main_text, "1111");
    }

    #[test]
    fn test_shared_error_outcome() {
        let mut shared = SharedCalculator::default();
        let outcome = shared.type_keys("5/0=");
        assert_eq!(outcome.error, Some(CalcError::DivisionByZero));
    }

    #[test]
    fn test_shared_survives_poison() {
        let shared = SharedCalculator::default();
        let poisoner = shared.clone();
        let _ = std::thread::spawn(move || {
            poisoner.with(|_| panic!("poison"));
        })
        .join();
        assert_eq!(shared.display().main_text, "0");
    }
}
