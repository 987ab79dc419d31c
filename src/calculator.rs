//! Chained-arithmetic calculator
//!
//! A small keypad state machine. Operators are applied left to right as they
//! are entered (`5 + 3 × 2 =` gives 16), and the result can be handed to the
//! ledger as the amount of a new entry.
//!
//! The display buffer is edited under two guards: a lone leading `0` is
//! replaced by the next digit, and a second decimal point is ignored.

use std::fmt;
use std::str::FromStr;

use crate::error::{TallyError, TallyResult};

/// Binary operator on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl Operator {
    /// Map a keypad character to an operator
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' | 'x' | 'X' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            '%' => Some(Self::Remainder),
            _ => None,
        }
    }

    /// Apply the operator; division by zero yields zero
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    0.0
                } else {
                    a / b
                }
            }
            Self::Remainder => a % b,
        }
    }

    /// Keypad symbol
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '−',
            Self::Multiply => '×',
            Self::Divide => '÷',
            Self::Remainder => '%',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Self::from_key(key),
            _ => None,
        }
        .ok_or_else(|| TallyError::Validation(format!("Unknown operator '{}'", s)))
    }
}

/// Calculator state
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    pending_value: Option<f64>,
    pending_operator: Option<Operator>,
    awaiting_new_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator showing `0`
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending_value: None,
            pending_operator: None,
            awaiting_new_operand: false,
        }
    }

    /// Current display buffer
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Left operand held for the pending operator
    pub fn pending_value(&self) -> Option<f64> {
        self.pending_value
    }

    /// Operator waiting for its right operand
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// Whether the next digit starts a fresh number
    pub fn is_awaiting_operand(&self) -> bool {
        self.awaiting_new_operand
    }

    /// Reset to the initial state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Remove the last display character
    pub fn delete_last(&mut self) {
        if self.awaiting_new_operand {
            return;
        }

        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = "0".to_string();
        }
    }

    /// Enter a digit; anything other than `0`-`9` is ignored
    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }

        if self.awaiting_new_operand {
            self.display = digit.to_string();
            self.awaiting_new_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    /// Enter a decimal point
    pub fn input_decimal(&mut self) {
        if self.awaiting_new_operand {
            self.display = "0.".to_string();
            self.awaiting_new_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Press a binary operator, collapsing any pending operation first
    pub fn perform_operation(&mut self, operator: Operator) {
        let input = self.numeric_value();

        match (self.pending_value, self.pending_operator) {
            (None, _) => self.pending_value = Some(input),
            (Some(pending), Some(pending_operator)) => {
                let result = pending_operator.apply(pending, input);
                self.pending_value = Some(result);
                self.display = format_number(result);
            }
            (Some(_), None) => {}
        }

        self.awaiting_new_operand = true;
        self.pending_operator = Some(operator);
    }

    /// Press equals, returning the value now on the display
    ///
    /// With nothing pending this leaves the state untouched.
    pub fn perform_calculation(&mut self) -> f64 {
        let input = self.numeric_value();

        match (self.pending_value, self.pending_operator) {
            (Some(pending), Some(operator)) => {
                let result = operator.apply(pending, input);
                self.display = format_number(result);
                self.pending_value = None;
                self.pending_operator = None;
                self.awaiting_new_operand = true;
                result
            }
            _ => input,
        }
    }

    /// The display parsed as a number (NaN if it does not parse)
    pub fn numeric_value(&self) -> f64 {
        self.display.parse().unwrap_or(f64::NAN)
    }

    /// Apply a single keypad key
    ///
    /// Digits, `.`, the operator symbols, `=`, `C` (clear) and `<` (delete)
    /// are understood. Whitespace is ignored.
    pub fn press(&mut self, key: char) -> TallyResult<()> {
        match key {
            '0'..='9' => self.input_digit(key),
            '.' => self.input_decimal(),
            '=' => {
                self.perform_calculation();
            }
            'c' | 'C' => self.clear(),
            '<' => self.delete_last(),
            k if k.is_whitespace() => {}
            k => {
                let operator = Operator::from_key(k).ok_or_else(|| {
                    TallyError::Validation(format!("Unsupported calculator key '{}'", k))
                })?;
                self.perform_operation(operator);
            }
        }
        Ok(())
    }

    /// Apply a whole key sequence and return the resulting display value
    pub fn run_keys(&mut self, keys: &str) -> TallyResult<f64> {
        for key in keys.chars() {
            self.press(key)?;
        }
        Ok(self.numeric_value())
    }
}

/// Plain string form of a calculator result
fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Also folds negative zero
        "0".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}
