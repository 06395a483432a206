//! Widget driver: the host wiring, run against the mock DOM
//!
//! Plays the part of the browser page script. Button clicks resolve through
//! the clicked element's data attributes, keydown events through the input
//! adapter; the theme toggle goes to the [`ThemeStore`].

use tracing::{debug, warn};

use crate::calculator::Calculator;
use crate::config::CalcpadConfig;
use crate::dom::{
    DomEvent, DomRenderer, MockDom, CURRENT_OPERAND_ID, PREVIOUS_OPERAND_ID, THEME_TOGGLE_ID,
};
use crate::engine::{DisplayState, InputToken};
use crate::input::{button_to_token, key_to_token, should_prevent_default};
use crate::theme::{PreferenceStore, StoreError, Theme, ThemeStore};

/// What happened to a keydown event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Token the key produced, if any
    pub token: Option<InputToken>,
    /// Whether default browser handling was suppressed
    pub default_prevented: bool,
}

/// Host driving the calculator, the theme store and the mock DOM
#[derive(Debug)]
pub struct WidgetDriver<S> {
    calculator: Calculator<DomRenderer>,
    theme: ThemeStore<S>,
}

impl<S: PreferenceStore> WidgetDriver<S> {
    /// Creates a driver with default settings
    pub fn new(store: S) -> Self {
        Self::with_config(store, &CalcpadConfig::default())
    }

    /// Creates a driver from `config`
    pub fn with_config(store: S, config: &CalcpadConfig) -> Self {
        Self {
            calculator: Calculator::with_config(DomRenderer::new(MockDom::widget()), config),
            theme: ThemeStore::with_key(store, &config.theme_key),
        }
    }

    /// Applies the stored theme and renders the initial display
    pub fn init(&mut self) -> Theme {
        let theme = self.theme.init();
        self.dom_mut().apply_theme(theme);
        self.calculator.render();
        theme
    }

    /// Clicks an element; returns whether anything handled it
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dom_mut().dispatch_event(DomEvent::click(element_id));

        if element_id == THEME_TOGGLE_ID {
            if let Err(e) = self.toggle_theme() {
                warn!(error = %e, "theme toggle not persisted");
            }
            return true;
        }

        let token = self.dom().get_element(element_id).and_then(|elem| {
            button_to_token(elem.get_attr("data-number"), elem.get_attr("data-action"))
        });
        match token {
            Some(token) => {
                self.calculator.press(token);
                true
            }
            None => {
                debug!(element_id, "click ignored");
                false
            }
        }
    }

    /// Presses a key on the document
    pub fn key_down(&mut self, key: &str) -> KeyOutcome {
        let outcome = KeyOutcome {
            token: key_to_token(key),
            default_prevented: should_prevent_default(key),
        };
        self.dom_mut()
            .dispatch_event(DomEvent::key_down(key, outcome.default_prevented));
        if let Some(token) = outcome.token {
            self.calculator.press(token);
        }
        outcome
    }

    /// Types a sequence of keys
    pub fn type_keys<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.key_down(key);
        }
    }

    /// Flips the theme, applies it, and persists it
    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        let result = self.theme.toggle();
        let theme = self.theme.current();
        self.dom_mut().apply_theme(theme);
        result
    }

    /// Theme currently applied
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// The theme store
    pub fn theme_store(&self) -> &ThemeStore<S> {
        &self.theme
    }
}

impl<S> WidgetDriver<S> {
    /// Text of the current operand line
    pub fn current_text(&self) -> &str {
        self.dom().get_element_text(CURRENT_OPERAND_ID).unwrap_or_default()
    }

    /// Text of the previous operand line
    pub fn previous_text(&self) -> &str {
        self.dom().get_element_text(PREVIOUS_OPERAND_ID).unwrap_or_default()
    }

    /// Engine state
    pub fn state(&self) -> &DisplayState {
        self.calculator.state()
    }

    /// The mock DOM
    pub fn dom(&self) -> &MockDom {
        self.calculator.renderer().dom()
    }

    fn dom_mut(&mut self) -> &mut MockDom {
        self.calculator.renderer_mut().dom_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{MemoryStore, DEFAULT_THEME_KEY};

    fn driver() -> WidgetDriver<MemoryStore> {
        let mut driver = WidgetDriver::new(MemoryStore::new());
        driver.init();
        driver
    }

    #[test]
    fn test_init_renders_and_applies_theme() {
        let driver = driver();
        assert_eq!(driver.current_text(), "0");
        assert_eq!(driver.previous_text(), "");
        assert_eq!(driver.theme(), Theme::Dark);
        assert!(driver.dom().body.has_class("dark-theme"));
        assert_eq!(
            driver.theme_store().store().entry(DEFAULT_THEME_KEY),
            Some("dark")
        );
    }

    #[test]
    fn test_init_restores_light_theme() {
        let store = MemoryStore::new().with_entry(DEFAULT_THEME_KEY, "light");
        let mut driver = WidgetDriver::new(store);
        assert_eq!(driver.init(), Theme::Light);
        assert!(driver.dom().body.has_class("light-theme"));
    }

    #[test]
    fn test_button_clicks() {
        let mut driver = driver();
        for id in ["btn-1", "btn-2", "btn-add", "btn-3"] {
            assert!(driver.click(id));
        }
        assert_eq!(driver.current_text(), "3");
        assert_eq!(driver.previous_text(), "12 +");
        driver.click("btn-equals");
        assert_eq!(driver.current_text(), "15");
        assert_eq!(driver.previous_text(), "");
    }

    #[test]
    fn test_unknown_click_is_ignored() {
        let mut driver = driver();
        assert!(!driver.click("current-operand"));
        assert!(!driver.click("missing"));
        assert_eq!(driver.current_text(), "0");
        assert_eq!(driver.dom().event_history().len(), 2);
    }

    #[test]
    fn test_keyboard_input() {
        let mut driver = driver();
        driver.type_keys(["9", "/", "4", "Enter"]);
        assert_eq!(driver.current_text(), "2.25");
    }

    #[test]
    fn test_key_outcome() {
        let mut driver = driver();
        let outcome = driver.key_down("Backspace");
        assert_eq!(outcome.token, Some(InputToken::Delete));
        assert!(outcome.default_prevented);

        let outcome = driver.key_down("a");
        assert_eq!(outcome.token, None);
        assert!(!outcome.default_prevented);
        assert_eq!(
            driver.dom().event_history().last(),
            Some(&DomEvent::key_down("a", false))
        );
    }

    #[test]
    fn test_theme_toggle_click() {
        let mut driver = driver();
        assert!(driver.click(THEME_TOGGLE_ID));
        assert_eq!(driver.theme(), Theme::Light);
        assert!(driver.dom().body.has_class("light-theme"));
        assert_eq!(
            driver.theme_store().store().entry(DEFAULT_THEME_KEY),
            Some("light")
        );
        assert_eq!(driver.toggle_theme().unwrap(), Theme::Dark);
        assert!(driver.dom().body.has_class("dark-theme"));
    }

    #[test]
    fn test_error_display_via_keys() {
        let mut driver = driver();
        driver.type_keys(["1", "0", "/", "0", "="]);
        assert_eq!(driver.current_text(), "Error");
        driver.type_keys(["5", "+"]);
        assert_eq!(driver.current_text(), "Error");
        driver.key_down("Escape");
        assert_eq!(driver.current_text(), "0");
        assert_eq!(driver.state(), &DisplayState::new());
    }

    #[test]
    fn test_config_theme_key_and_error_text() {
        let config = CalcpadConfig::builder()
            .theme_key("calc.theme")
            .error_text("÷0")
            .build()
            .unwrap();
        let mut driver = WidgetDriver::with_config(MemoryStore::new(), &config);
        driver.init();
        driver.toggle_theme().unwrap();
        assert_eq!(driver.theme_store().store().entry("calc.theme"), Some("light"));
        driver.type_keys(["3", "/", "0", "Enter"]);
        assert_eq!(driver.current_text(), "÷0");
    }
}
