//! Expression buffer: the keypad state machine
//!
//! The buffer turns a stream of keypad presses into a committed token list
//! plus the number currently being typed (the *entry*). Invariants are held
//! by construction:
//!
//! - [`Entry`] only ever gains digits and a single decimal point.
//! - An operator press while [`Phase::OperatorPending`] replaces the trailing
//!   operator instead of appending a second one.
//! - After `=` the entry holds the result and `pending_reset` is set, so the
//!   next digit starts a fresh number.

use serde::{Deserialize, Serialize};

use crate::config::Variant;
use crate::core::{CalcResult, Operation};
use crate::event::Grouping;
use crate::format::to_display;

/// Explicit state of the keypad state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing committed; the entry is zero, a result, or a square root
    Empty,
    /// A number (or a parenthesis) is being entered
    EnteringNumber,
    /// The expression ends in a binary operator
    OperatorPending,
    /// The last evaluation failed
    Error,
}

/// The number currently being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry(String);

impl Default for Entry {
    fn default() -> Self {
        Self::zero()
    }
}

impl Entry {
    /// Text of the zero sentinel
    pub const ZERO: &'static str = "0";

    /// The zero sentinel
    #[must_use]
    pub fn zero() -> Self {
        Self(Self::ZERO.to_string())
    }

    /// Wraps text already known to be a well-formed number
    fn from_number_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the entry text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for `0` (and `-0` left behind by backspace)
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits() == Self::ZERO
    }

    /// Returns true if the entry already has a decimal point
    #[must_use]
    pub fn has_decimal_point(&self) -> bool {
        self.0.contains('.')
    }

    /// Returns true if the entry is negative
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.starts_with('-')
    }

    /// Parses the entry as a number
    pub fn value(&self) -> CalcResult<f64> {
        self.committed()
            .parse()
            .map_err(|_| crate::core::CalcError::syntax(format!("Invalid number: '{}'", self.0)))
    }

    fn digits(&self) -> &str {
        self.0.strip_prefix('-').unwrap_or(&self.0)
    }

    fn push_digit(&mut self, digit: char) {
        if self.is_zero() {
            let sign = if self.is_negative() { "-" } else { "" };
            self.0 = format!("{sign}{digit}");
        } else {
            self.0.push(digit);
        }
    }

    fn push_decimal_point(&mut self) {
        if !self.has_decimal_point() {
            self.0.push('.');
        }
    }

    fn toggle_sign(&mut self) {
        self.0 = match self.0.strip_prefix('-') {
            Some(rest) => rest.to_string(),
            None => format!("-{}", self.0),
        };
    }

    /// Drops the last character; returns true once nothing typed is left
    fn pop(&mut self) -> bool {
        self.0.pop();
        let exhausted = self.0.is_empty() || self.0 == "-";
        if exhausted {
            *self = Self::zero();
        }
        exhausted
    }

    /// Text that goes into the expression: no dangling `.`, no `-0`
    fn committed(&self) -> String {
        let text = self.0.strip_suffix('.').unwrap_or(&self.0);
        if text == "-0" {
            Self::ZERO.to_string()
        } else {
            text.to_string()
        }
    }
}

/// A committed expression token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprToken {
    /// A number as typed or computed
    Number(String),
    /// Binary operator
    Operator(Operation),
    /// Parenthesis
    Grouping(Grouping),
}

impl ExprToken {
    /// Appends the canonical form (`2+3*4`) of this token
    fn write_canonical(&self, out: &mut String) {
        match self {
            Self::Number(text) => out.push_str(text),
            Self::Operator(op) => out.push(op.symbol()),
            Self::Grouping(g) => out.push(g.as_char()),
        }
    }

    /// Appends the canonical form with spaced operators (`2 + 3 * 4`)
    fn write_spaced(&self, out: &mut String) {
        match self {
            Self::Operator(op) => {
                out.push(' ');
                out.push(op.symbol());
                out.push(' ');
            }
            _ => self.write_canonical(out),
        }
    }
}

/// Keypad state: entry, committed tokens and the reset flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionBuffer {
    variant: Variant,
    phase: Phase,
    entry: Entry,
    tokens: Vec<ExprToken>,
    pending_reset: bool,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl ExpressionBuffer {
    /// Creates an empty buffer showing `0`
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            phase: Phase::Empty,
            entry: Entry::zero(),
            tokens: Vec::new(),
            pending_reset: false,
        }
    }

    /// Returns the keypad variant
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the current phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true in the error phase
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.phase == Phase::Error
    }

    /// Returns the current entry
    #[must_use]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Returns the committed tokens
    #[must_use]
    pub fn tokens(&self) -> &[ExprToken] {
        &self.tokens
    }

    /// Returns true if the next digit starts a new entry
    #[must_use]
    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    /// Returns true if the entry holds typed input not yet committed
    #[must_use]
    pub fn entry_is_live(&self) -> bool {
        if self.pending_reset {
            return false;
        }
        match self.phase {
            Phase::EnteringNumber => true,
            Phase::Empty => !self.entry.is_zero(),
            Phase::OperatorPending | Phase::Error => false,
        }
    }

    /// Committed tokens in canonical form, without the entry
    #[must_use]
    pub fn expression(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            token.write_canonical(&mut out);
        }
        out
    }

    /// Committed tokens in display form, followed by the live entry
    ///
    /// Operators are spaced and shown as glyphs (`2 × −5`).
    #[must_use]
    pub fn display_expression(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            token.write_spaced(&mut out);
        }
        if self.entry_is_live() {
            out.push_str(self.entry.as_str());
        }
        to_display(out.trim_end())
    }

    /// The expression `=` evaluates, or `None` when there is nothing to do
    ///
    /// A trailing operator is completed with the entry, so `2 + =`
    /// evaluates `2+2`.
    #[must_use]
    pub fn completed_expression(&self) -> Option<String> {
        if matches!(self.phase, Phase::Empty | Phase::Error) {
            return None;
        }
        let mut expression = self.expression();
        if self.phase == Phase::OperatorPending || self.entry_is_live() {
            expression.push_str(&self.entry.committed());
        }
        Some(expression)
    }

    // ===== Editing operations =====

    /// Appends a digit (values above 9 are ignored)
    pub fn append_digit(&mut self, digit: u8) {
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        self.recover();
        self.start_fresh_entry();
        self.entry.push_digit(c);
        self.phase = Phase::EnteringNumber;
    }

    /// Appends a decimal point unless the entry already has one
    pub fn append_decimal_point(&mut self) {
        self.recover();
        self.start_fresh_entry();
        self.entry.push_decimal_point();
        self.phase = Phase::EnteringNumber;
    }

    /// Commits the entry and appends `op`, or replaces a trailing operator
    pub fn append_operator(&mut self, op: Operation) {
        self.recover();
        if self.phase == Phase::OperatorPending {
            if let Some(last) = self.tokens.last_mut() {
                *last = ExprToken::Operator(op);
            }
        } else {
            let after_close = self.pending_reset
                && matches!(
                    self.tokens.last(),
                    Some(ExprToken::Grouping(Grouping::Close))
                );
            if !after_close {
                self.commit_entry();
            }
            self.tokens.push(ExprToken::Operator(op));
        }
        self.pending_reset = true;
        self.phase = Phase::OperatorPending;
    }

    /// Appends `(` or `)`
    pub fn append_grouping(&mut self, grouping: Grouping) {
        self.recover();
        match grouping {
            Grouping::Open => {
                // A zero entry is replaced by the parenthesis, not committed
                if self.entry_is_live() && !self.entry.is_zero() {
                    self.commit_entry();
                }
                self.entry = Entry::zero();
            }
            Grouping::Close => {
                if self.entry_is_live() {
                    self.commit_entry();
                }
            }
        }
        self.tokens.push(ExprToken::Grouping(grouping));
        self.pending_reset = true;
        self.phase = Phase::EnteringNumber;
    }

    /// Flips the sign of the entry being typed (or of a shown result)
    pub fn toggle_sign(&mut self) {
        self.recover();
        if self.entry.is_zero() {
            return;
        }
        if self.entry_is_live() || self.phase == Phase::Empty {
            self.entry.toggle_sign();
        }
    }

    /// Removes the last character, keeping entry and expression in step
    pub fn backspace(&mut self) {
        match self.phase {
            Phase::Error => self.clear_all(),
            Phase::OperatorPending => self.retract_token(),
            Phase::EnteringNumber if self.pending_reset => self.retract_token(),
            Phase::Empty | Phase::EnteringNumber => {
                let exhausted = self.entry.pop();
                self.pending_reset = false;
                if self.tokens.is_empty() {
                    self.phase = if self.entry.is_zero() {
                        Phase::Empty
                    } else {
                        Phase::EnteringNumber
                    };
                } else if exhausted {
                    // Back to the state before the entry was typed
                    self.resume_after_last_token();
                } else {
                    self.phase = Phase::EnteringNumber;
                }
            }
        }
    }

    /// Resets everything to the initial state
    pub fn clear_all(&mut self) {
        *self = Self::new(self.variant);
    }

    /// `CE`: extended resets the entry, basic drops the last character
    pub fn clear_entry(&mut self) {
        match (self.variant, self.phase) {
            (Variant::Basic, _) => self.backspace(),
            (Variant::Extended, Phase::Error) => self.clear_all(),
            (Variant::Extended, Phase::OperatorPending) => self.entry = Entry::zero(),
            (Variant::Extended, Phase::Empty | Phase::EnteringNumber) => {
                self.entry = Entry::zero();
                self.pending_reset = false;
                self.phase = if self.tokens.is_empty() {
                    Phase::Empty
                } else {
                    Phase::EnteringNumber
                };
            }
        }
    }

    // ===== Evaluation outcomes =====

    /// Reseeds the buffer with a successful `=` result
    pub fn commit_result(&mut self, formatted: impl Into<String>) {
        self.tokens.clear();
        self.entry = Entry::from_number_text(formatted);
        self.pending_reset = true;
        self.phase = Phase::Empty;
    }

    /// Replaces entry and expression with a function result; further
    /// digits append to it
    pub fn replace_entry(&mut self, formatted: impl Into<String>) {
        self.tokens.clear();
        self.entry = Entry::from_number_text(formatted);
        self.pending_reset = false;
        self.phase = Phase::Empty;
    }

    /// Enters the error phase; entry and expression are both cleared
    pub fn fail(&mut self) {
        self.tokens.clear();
        self.entry = Entry::zero();
        self.pending_reset = false;
        self.phase = Phase::Error;
    }

    /// Input after an error starts from a cleared buffer
    pub fn recover(&mut self) {
        if self.phase == Phase::Error {
            self.clear_all();
        }
    }

    fn start_fresh_entry(&mut self) {
        if self.pending_reset {
            self.entry = Entry::zero();
            self.pending_reset = false;
        }
    }

    fn commit_entry(&mut self) {
        self.tokens.push(ExprToken::Number(self.entry.committed()));
    }

    /// Drops the trailing token
    fn retract_token(&mut self) {
        self.tokens.pop();
        self.resume_after_last_token();
    }

    /// Restores the state the buffer had right after its last token was
    /// pressed; a number left at the end becomes the entry again
    fn resume_after_last_token(&mut self) {
        match self.tokens.last() {
            Some(ExprToken::Number(_)) => {
                if let Some(ExprToken::Number(text)) = self.tokens.pop() {
                    self.entry = Entry::from_number_text(text);
                }
                self.pending_reset = false;
                self.phase = Phase::EnteringNumber;
            }
            Some(ExprToken::Operator(_)) => {
                // The operand before the operator is what `=` repeats
                if let [.., ExprToken::Number(text), ExprToken::Operator(_)] =
                    self.tokens.as_slice()
                {
                    self.entry = Entry::from_number_text(text.clone());
                }
                self.pending_reset = true;
                self.phase = Phase::OperatorPending;
            }
            Some(ExprToken::Grouping(_)) => {
                self.pending_reset = true;
                self.phase = Phase::EnteringNumber;
            }
            None => {
                self.entry = Entry::zero();
                self.pending_reset = false;
                self.phase = Phase::Empty;
            }
        }
    }
}
