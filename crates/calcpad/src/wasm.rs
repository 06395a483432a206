//! Browser bindings (feature `wasm`)
//!
//! Wires the calculator into the real document: the two display lines,
//! every `.btn` element, the theme toggle and document keydown events.
//! The theme preference lives in `window.localStorage`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Storage};

use crate::calculator::{Calculator, Renderer};
use crate::config::CalcpadConfig;
use crate::dom::{CURRENT_OPERAND_ID, PREVIOUS_OPERAND_ID, THEME_TOGGLE_ID};
use crate::engine::{Display, InputToken};
use crate::input::{button_to_token, key_to_token, should_prevent_default};
use crate::theme::{PreferenceStore, StoreError, Theme, ThemeStore};

/// Preference store over `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Opens the window's local storage
    pub fn from_window() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|_| StoreError::Unavailable("localStorage access denied".into()))?
            .ok_or_else(|| StoreError::Unavailable("localStorage missing".into()))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|_| StoreError::Unavailable(format!("cannot read {key}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| StoreError::Unavailable(format!("cannot write {key}")))
    }
}

/// Renderer writing into the two display elements
#[derive(Debug)]
struct ElementRenderer {
    current: Element,
    previous: Element,
}

impl Renderer for ElementRenderer {
    fn render(&mut self, display: &Display) {
        self.current.set_text_content(Some(&display.current));
        self.previous.set_text_content(Some(&display.previous));
    }
}

#[derive(Debug)]
struct Widget {
    calculator: Calculator<ElementRenderer>,
    theme: ThemeStore<LocalStorageStore>,
    body: HtmlElement,
    icon: Option<Element>,
}

impl Widget {
    fn apply_theme(&self, theme: Theme) {
        let classes = self.body.class_list();
        let swapped = classes
            .remove_1(theme.toggled().body_class())
            .and_then(|()| classes.add_1(theme.body_class()));
        if let Err(e) = swapped {
            web_sys::console::warn_1(&e);
        }
        if let Some(icon) = &self.icon {
            icon.set_class_name(theme.icon_class());
        }
    }

    fn toggle_theme(&mut self) {
        if let Err(e) = self.theme.toggle() {
            web_sys::console::warn_1(&format!("theme not persisted: {e}").into());
        }
        self.apply_theme(self.theme.current());
    }

    fn key_down(&mut self, key: &str) -> bool {
        if let Some(token) = key_to_token(key) {
            self.calculator.press(token);
        }
        should_prevent_default(key)
    }
}

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    widget: Rc<RefCell<Widget>>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Mounts onto the current document with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        Self::mount(&CalcpadConfig::default())
    }

    /// Mounts using a JSON configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<BrowserCalculator, JsValue> {
        let config =
            CalcpadConfig::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::mount(&config)
    }

    /// Current operand text
    #[wasm_bindgen(getter, js_name = currentOperand)]
    pub fn current_operand(&self) -> String {
        self.widget.borrow().calculator.display().current
    }

    /// Previous operand text with pending operation symbol
    #[wasm_bindgen(getter, js_name = previousOperand)]
    pub fn previous_operand(&self) -> String {
        self.widget.borrow().calculator.display().previous
    }

    /// `"light"` or `"dark"`
    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.widget.borrow().theme.current().as_str().to_string()
    }

    /// Feeds a `KeyboardEvent.key`; returns whether default handling should be suppressed
    #[wasm_bindgen(js_name = pressKey)]
    pub fn press_key(&self, key: &str) -> bool {
        self.widget.borrow_mut().key_down(key)
    }

    /// Flips the theme
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) {
        self.widget.borrow_mut().toggle_theme();
    }
}

impl BrowserCalculator {
    fn mount(config: &CalcpadConfig) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
        let toggle = element_by_id(&document, THEME_TOGGLE_ID)?;
        let icon = toggle.query_selector("i")?;

        let renderer = ElementRenderer {
            current: element_by_id(&document, CURRENT_OPERAND_ID)?,
            previous: element_by_id(&document, PREVIOUS_OPERAND_ID)?,
        };
        let store =
            LocalStorageStore::from_window().map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut widget = Widget {
            calculator: Calculator::with_config(renderer, config),
            theme: ThemeStore::with_key(store, &config.theme_key),
            body,
            icon,
        };
        let theme = widget.theme.init();
        widget.apply_theme(theme);
        widget.calculator.render();

        let widget = Rc::new(RefCell::new(widget));
        install_toggle_listener(&toggle, &widget)?;
        install_button_listeners(&document, &widget)?;
        install_key_listener(&document, &widget)?;

        Ok(Self { widget })
    }
}

fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn install_toggle_listener(toggle: &Element, widget: &Rc<RefCell<Widget>>) -> Result<(), JsValue> {
    let handle = Rc::clone(widget);
    let on_click = Closure::<dyn FnMut()>::new(move || handle.borrow_mut().toggle_theme());
    toggle.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn install_button_listeners(
    document: &Document,
    widget: &Rc<RefCell<Widget>>,
) -> Result<(), JsValue> {
    let buttons = document.query_selector_all(".btn")?;
    for index in 0..buttons.length() {
        let element = buttons
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok());
        let Some(button) = element else {
            continue;
        };
        let number = button.get_attribute("data-number");
        let action = button.get_attribute("data-action");
        let Some(token) = button_to_token(number.as_deref(), action.as_deref()) else {
            continue;
        };
        let handle = Rc::clone(widget);
        let on_click = Closure::<dyn FnMut()>::new(move || press(&handle, token));
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn install_key_listener(document: &Document, widget: &Rc<RefCell<Widget>>) -> Result<(), JsValue> {
    let handle = Rc::clone(widget);
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if handle.borrow_mut().key_down(&event.key()) {
            event.prevent_default();
        }
    });
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();
    Ok(())
}

fn press(widget: &Rc<RefCell<Widget>>, token: InputToken) {
    widget.borrow_mut().calculator.press(token);
}
