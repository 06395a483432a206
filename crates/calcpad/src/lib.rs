//! Calcpad - four-function calculator widget
//!
//! The widget is a single input reducer ([`engine::DisplayState`]) driven by
//! discrete tokens, a render callback ([`calculator::Renderer`]), and a
//! two-valued theme preference ([`theme::ThemeStore`]). Keys and keypad
//! buttons are translated into tokens by [`input`].
//!
//! # Example
//!
//! ```rust
//! use calcpad::prelude::*;
//!
//! let mut calc = Calculator::new(RecordingRenderer::new());
//! calc.digit(2);
//! calc.choose_operation(Operation::Add);
//! calc.digit(3);
//! calc.choose_operation(Operation::Multiply);
//! calc.digit(4);
//! calc.equals();
//!
//! // Left to right, no precedence
//! assert_eq!(calc.display().current, "20");
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

pub mod calculator;
pub mod config;
pub mod dom;
pub mod driver;
pub mod engine;
pub mod input;
pub mod theme;

/// Browser bindings
#[cfg(feature = "wasm")]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::{Calculator, RecordingRenderer, Renderer};
    pub use crate::config::{CalcpadConfig, ConfigError};
    pub use crate::dom::{DomElement, DomEvent, DomRenderer, MockDom};
    pub use crate::driver::{KeyOutcome, WidgetDriver};
    pub use crate::engine::{
        CalcError, CalcResult, CurrentOperand, Display, DisplayState, InputToken, Operation,
    };
    pub use crate::input::{button_to_token, key_to_token, should_prevent_default};
    pub use crate::theme::{FileStore, MemoryStore, PreferenceStore, StoreError, Theme, ThemeStore};

    #[cfg(feature = "wasm")]
    pub use crate::wasm::{BrowserCalculator, LocalStorageStore};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let state = DisplayState::new()
            .reduce(InputToken::Digit(6))
            .reduce(InputToken::Operation(Operation::Multiply))
            .reduce(InputToken::Digit(7))
            .reduce(InputToken::Equals);
        assert_eq!(state.current_text(), "42");
    }

    #[test]
    fn test_keyboard_to_display() {
        let mut calc = Calculator::new(RecordingRenderer::new());
        for key in ["1", "2", "*", "3"] {
            if let Some(token) = key_to_token(key) {
                calc.press(token);
            }
        }
        assert_eq!(
            calc.display(),
            Display {
                current: "3".to_string(),
                previous: "12 ×".to_string(),
            }
        );
    }

    #[test]
    fn test_theme_round_trip_through_store() {
        let mut themes = ThemeStore::new(MemoryStore::new());
        assert_eq!(themes.init(), Theme::Dark);
        assert_eq!(themes.toggle().unwrap(), Theme::Light);
        assert_eq!(themes.read(), Theme::Light);
    }
}
