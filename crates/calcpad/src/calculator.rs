//! Calculator host: one engine state plus its render callback
//!
//! Each input is processed to completion and followed by exactly one
//! render notification.

use tracing::debug;

use crate::config::CalcpadConfig;
use crate::engine::{Display, DisplayState, InputToken, Operation, ERROR_TEXT};

/// Receives the display lines after every transition
pub trait Renderer {
    /// Shows `display`
    fn render(&mut self, display: &Display);
}

impl<F: FnMut(&Display)> Renderer for F {
    fn render(&mut self, display: &Display) {
        self(display);
    }
}

/// Renderer that keeps every frame
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Vec<Display>,
}

impl RecordingRenderer {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames in render order
    #[must_use]
    pub fn frames(&self) -> &[Display] {
        &self.frames
    }

    /// Most recent frame
    #[must_use]
    pub fn last(&self) -> Option<&Display> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, display: &Display) {
        self.frames.push(display.clone());
    }
}

/// Engine state owned together with its renderer
pub struct Calculator<R> {
    state: DisplayState,
    renderer: R,
    error_text: String,
}

impl<R> std::fmt::Debug for Calculator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("state", &self.state)
            .field("error_text", &self.error_text)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> Calculator<R> {
    /// Creates a calculator with default settings
    pub fn new(renderer: R) -> Self {
        Self {
            state: DisplayState::new(),
            renderer,
            error_text: ERROR_TEXT.to_string(),
        }
    }

    /// Creates a calculator using `config` for precision and error text
    pub fn with_config(renderer: R, config: &CalcpadConfig) -> Self {
        Self {
            state: DisplayState::with_precision(config.precision),
            renderer,
            error_text: config.error_text.clone(),
        }
    }

    /// Applies one input and renders the result
    pub fn press(&mut self, token: InputToken) -> &DisplayState {
        self.state.apply(token);
        let shown = self.render();
        debug!(?token, current = %shown.current, previous = %shown.previous, "input applied");
        &self.state
    }

    /// Applies a sequence of inputs, rendering after each
    pub fn press_all(&mut self, tokens: impl IntoIterator<Item = InputToken>) -> &DisplayState {
        for token in tokens {
            self.press(token);
        }
        &self.state
    }

    /// Renders the current state without changing it
    pub fn render(&mut self) -> Display {
        let display = self.display();
        self.renderer.render(&display);
        display
    }

    /// Appends a digit
    pub fn digit(&mut self, d: u8) -> &DisplayState {
        self.press(InputToken::Digit(d))
    }

    /// Appends a decimal point
    pub fn decimal_point(&mut self) -> &DisplayState {
        self.press(InputToken::DecimalPoint)
    }

    /// Chooses an operation
    pub fn choose_operation(&mut self, op: Operation) -> &DisplayState {
        self.press(InputToken::Operation(op))
    }

    /// Resolves the pending operation
    pub fn equals(&mut self) -> &DisplayState {
        self.press(InputToken::Equals)
    }

    /// Resets to the initial state
    pub fn clear(&mut self) -> &DisplayState {
        self.press(InputToken::Clear)
    }

    /// Removes the last character
    pub fn delete_last(&mut self) -> &DisplayState {
        self.press(InputToken::Delete)
    }
}

impl<R> Calculator<R> {
    /// Current engine state
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Display lines for the current state
    pub fn display(&self) -> Display {
        self.state.display_with(&self.error_text)
    }

    /// The renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Splits into state and renderer
    pub fn into_parts(self) -> (DisplayState, R) {
        (self.state, self.renderer)
    }
}
