//! Calculator engine: the input reducer behind the keypad
//!
//! [`DisplayState`] holds everything the widget shows. Every [`InputToken`]
//! transitions it; nothing else mutates it. Division by zero is tracked as
//! [`CurrentOperand::Error`] and only becomes sentinel text when a
//! [`Display`] is produced.

pub mod number;
mod operations;

pub use number::{format_number, parse_operand, round_to, DEFAULT_PRECISION, MAX_PRECISION};
pub use operations::Operation;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Result type for engine arithmetic
pub type CalcResult<T> = Result<T, CalcError>;

/// Text shown in place of the current operand after a division by zero
pub const ERROR_TEXT: &str = "Error";

/// Arithmetic failures inside the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Operand text did not parse as a decimal number
    #[error("Invalid operand: {0:?}")]
    InvalidOperand(String),
}

/// A discrete input from the keypad or keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputToken {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    DecimalPoint,
    /// Binary operation
    Operation(Operation),
    /// Resolve the pending operation
    Equals,
    /// Reset to the initial state
    Clear,
    /// Remove the last character of the current operand
    Delete,
}

/// The operand being entered, or the division-by-zero marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentOperand {
    /// Decimal text; never empty
    Entry(String),
    /// Division by zero happened; only `Clear` leaves this state
    Error,
}

impl CurrentOperand {
    /// Text for display, with `error_text` standing in for the error marker
    #[must_use]
    pub fn text_or<'a>(&'a self, error_text: &'a str) -> &'a str {
        match self {
            Self::Entry(text) => text,
            Self::Error => error_text,
        }
    }

    /// Text for display using [`ERROR_TEXT`]
    #[must_use]
    pub fn text(&self) -> &str {
        self.text_or(ERROR_TEXT)
    }
}

/// What the two display lines show
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Display {
    /// Current operand line
    pub current: String,
    /// Previous operand line, with the pending operation symbol appended
    pub previous: String,
}

/// Full calculator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    current: CurrentOperand,
    previous: String,
    operation: Option<Operation>,
    pending_reset: bool,
    precision: u32,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayState {
    /// Creates the initial state: `"0"`, no previous operand, nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }

    /// Creates the initial state rounding results to `precision` places
    #[must_use]
    pub fn with_precision(precision: u32) -> Self {
        Self {
            current: CurrentOperand::Entry("0".to_string()),
            previous: String::new(),
            operation: None,
            pending_reset: false,
            precision: precision.min(MAX_PRECISION),
        }
    }

    /// The current operand
    #[must_use]
    pub fn current(&self) -> &CurrentOperand {
        &self.current
    }

    /// Current operand text using [`ERROR_TEXT`] for the error marker
    #[must_use]
    pub fn current_text(&self) -> &str {
        self.current.text()
    }

    /// The previous operand, empty when nothing is pending
    #[must_use]
    pub fn previous(&self) -> &str {
        &self.previous
    }

    /// The pending operation
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Whether the next digit starts a fresh operand
    #[must_use]
    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    /// Decimal places kept when rounding results
    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Whether a division by zero is being shown
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.current, CurrentOperand::Error)
    }

    /// Consumes the state and returns it after applying `token`
    #[must_use]
    pub fn reduce(mut self, token: InputToken) -> Self {
        self.apply(token);
        self
    }

    /// Applies one input token
    pub fn apply(&mut self, token: InputToken) {
        match token {
            InputToken::Digit(d) => self.digit(d),
            InputToken::DecimalPoint => self.decimal_point(),
            InputToken::Operation(op) => self.choose_operation(op),
            InputToken::Equals => self.equals(),
            InputToken::Clear => self.clear(),
            InputToken::Delete => self.delete_last(),
        }
    }

    /// Appends a digit, replacing a lone `"0"` or a finished operand
    pub fn digit(&mut self, d: u8) {
        let Some(ch) = char::from_digit(u32::from(d), 10) else {
            debug!(digit = d, "ignoring out-of-range digit");
            return;
        };
        let reset = self.pending_reset;
        let CurrentOperand::Entry(entry) = &mut self.current else {
            return;
        };
        self.pending_reset = false;

        if reset || entry.as_str() == "0" {
            entry.clear();
        }
        entry.push(ch);
    }

    /// Appends a decimal point unless the operand already has one.
    ///
    /// After an operation or result the operand restarts as `"0."`.
    pub fn decimal_point(&mut self) {
        let reset = self.pending_reset;
        let CurrentOperand::Entry(entry) = &mut self.current else {
            return;
        };
        self.pending_reset = false;

        if reset {
            *entry = "0".to_string();
        }
        if !entry.contains('.') {
            entry.push('.');
        }
    }

    /// Chooses the next operation, resolving a pending one first
    pub fn choose_operation(&mut self, op: Operation) {
        let CurrentOperand::Entry(entry) = &self.current else {
            return;
        };
        if entry == "0" && self.previous.is_empty() {
            return;
        }

        if self.operation.is_some() && !self.pending_reset {
            self.compute();
        }

        let CurrentOperand::Entry(entry) = &self.current else {
            return;
        };
        self.previous = entry.clone();
        self.operation = Some(op);
        self.pending_reset = true;
    }

    /// Resolves the pending operation, if any
    pub fn equals(&mut self) {
        if self.operation.is_some() {
            self.compute();
        }
    }

    /// Applies the pending operation to the previous and current operands.
    ///
    /// Leaves the state untouched when either operand fails to parse.
    pub fn compute(&mut self) {
        let Some(op) = self.operation else {
            return;
        };
        let CurrentOperand::Entry(entry) = &self.current else {
            return;
        };

        let operands = parse_operand(&self.previous).and_then(|prev| {
            let current = parse_operand(entry)?;
            Ok((prev, current))
        });
        let (prev, current) = match operands {
            Ok(pair) => pair,
            Err(err) => {
                debug!(error = %err, "compute aborted");
                return;
            }
        };

        self.current = match op.apply(prev, current) {
            Ok(value) => CurrentOperand::Entry(format_number(round_to(value, self.precision))),
            Err(err) => {
                debug!(error = %err, prev, current, "compute failed");
                CurrentOperand::Error
            }
        };
        self.previous.clear();
        self.operation = None;
        self.pending_reset = true;
    }

    /// Resets to the initial state
    pub fn clear(&mut self) {
        *self = Self::with_precision(self.precision);
    }

    /// Removes the last character; a single character becomes `"0"`
    pub fn delete_last(&mut self) {
        let CurrentOperand::Entry(entry) = &mut self.current else {
            return;
        };
        if entry.chars().count() > 1 {
            entry.pop();
        } else {
            *entry = "0".to_string();
        }
    }

    /// Display lines using [`ERROR_TEXT`]
    #[must_use]
    pub fn display(&self) -> Display {
        self.display_with(ERROR_TEXT)
    }

    /// Display lines with a custom error marker
    #[must_use]
    pub fn display_with(&self, error_text: &str) -> Display {
        let previous = match self.operation {
            Some(op) => format!("{} {}", self.previous, op.symbol()),
            None => self.previous.clone(),
        };
        Display {
            current: self.current.text_or(error_text).to_string(),
            previous,
        }
    }
}
