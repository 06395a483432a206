//! Input adapter: keyboard keys and keypad buttons to [`InputToken`]s
//!
//! Buttons identify themselves through a `data-number` attribute (`0`-`9`,
//! `.`) or a `data-action` attribute (`clear`, `delete`, `equals`, or an
//! operation name). Keys use the browser `KeyboardEvent.key` names.

use crate::engine::{InputToken, Operation};

/// Maps a keyboard key to an input token
#[must_use]
pub fn key_to_token(key: &str) -> Option<InputToken> {
    match key {
        "." => Some(InputToken::DecimalPoint),
        "+" => Some(InputToken::Operation(Operation::Add)),
        "-" => Some(InputToken::Operation(Operation::Subtract)),
        "*" => Some(InputToken::Operation(Operation::Multiply)),
        "/" => Some(InputToken::Operation(Operation::Divide)),
        "Enter" | "=" => Some(InputToken::Equals),
        "Escape" => Some(InputToken::Clear),
        "Backspace" => Some(InputToken::Delete),
        _ => digit_token(key),
    }
}

/// Whether the host must suppress the browser's default handling of `key`
#[must_use]
pub fn should_prevent_default(key: &str) -> bool {
    match key {
        "Enter" | "Escape" | "Backspace" => true,
        _ => {
            let mut chars = key.chars();
            matches!(
                (chars.next(), chars.next()),
                (Some('0'..='9' | '.' | '+' | '-' | '*' | '/' | '='), None)
            )
        }
    }
}

/// Maps a button's data attributes to an input token
#[must_use]
pub fn button_to_token(data_number: Option<&str>, data_action: Option<&str>) -> Option<InputToken> {
    if let Some(number) = data_number {
        return match number {
            "." => Some(InputToken::DecimalPoint),
            _ => digit_token(number),
        };
    }
    match data_action? {
        "clear" => Some(InputToken::Clear),
        "delete" => Some(InputToken::Delete),
        "equals" => Some(InputToken::Equals),
        name => Operation::from_name(name).map(InputToken::Operation),
    }
}

fn digit_token(text: &str) -> Option<InputToken> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(10).map(|d| InputToken::Digit(d as u8)),
        _ => None,
    }
}

/// The data attribute a keypad button carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonData {
    /// `data-number`
    Number(&'static str),
    /// `data-action`
    Action(&'static str),
}

/// A single keypad button definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// DOM element ID
    pub id: &'static str,
    /// Button face
    pub label: &'static str,
    /// Data attribute
    pub data: ButtonData,
}

impl KeypadButton {
    const fn number(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            data: ButtonData::Number(label),
        }
    }

    const fn action(id: &'static str, label: &'static str, action: &'static str) -> Self {
        Self {
            id,
            label,
            data: ButtonData::Action(action),
        }
    }

    /// The token this button produces
    #[must_use]
    pub fn token(&self) -> Option<InputToken> {
        match self.data {
            ButtonData::Number(n) => button_to_token(Some(n), None),
            ButtonData::Action(a) => button_to_token(None, Some(a)),
        }
    }
}

/// Keypad layout:
/// ```text
/// [ C ] [DEL] [ ÷ ] [ × ]
/// [ 7 ] [ 8 ] [ 9 ] [ − ]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ = ]
/// [ 0 ] [ . ]
/// ```
pub const KEYPAD: [KeypadButton; 18] = [
    KeypadButton::action("btn-clear", "C", "clear"),
    KeypadButton::action("btn-delete", "DEL", "delete"),
    KeypadButton::action("btn-divide", "÷", "divide"),
    KeypadButton::action("btn-multiply", "×", "multiply"),
    KeypadButton::number("btn-7", "7"),
    KeypadButton::number("btn-8", "8"),
    KeypadButton::number("btn-9", "9"),
    KeypadButton::action("btn-subtract", "−", "subtract"),
    KeypadButton::number("btn-4", "4"),
    KeypadButton::number("btn-5", "5"),
    KeypadButton::number("btn-6", "6"),
    KeypadButton::action("btn-add", "+", "add"),
    KeypadButton::number("btn-1", "1"),
    KeypadButton::number("btn-2", "2"),
    KeypadButton::number("btn-3", "3"),
    KeypadButton::action("btn-equals", "=", "equals"),
    KeypadButton::number("btn-0", "0"),
    KeypadButton::number("btn-decimal", "."),
];
