//! Mock DOM for the widget markup
//!
//! Models the fixed structure the widget is wired to: the two display lines,
//! the keypad buttons with their data attributes, the theme toggle icon and
//! the body theme class. Lets the whole host run without a browser.

use std::collections::HashMap;

use crate::calculator::Renderer;
use crate::engine::Display;
use crate::input::{ButtonData, KEYPAD};
use crate::theme::Theme;

/// Element ID of the current operand line
pub const CURRENT_OPERAND_ID: &str = "current-operand";
/// Element ID of the previous operand line
pub const PREVIOUS_OPERAND_ID: &str = "previous-operand";
/// Element ID of the theme toggle button
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
/// Element ID of the icon inside the theme toggle
pub const THEME_ICON_ID: &str = "theme-icon";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Replaces the whole class list with a space-separated `class_name`
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-separated class list
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Keydown event on the document
    KeyDown {
        /// `KeyboardEvent.key`
        key: String,
        /// Whether the handler called `preventDefault`
        default_prevented: bool,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str, default_prevented: bool) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            default_prevented,
        }
    }
}

/// Mock DOM holding the widget elements
#[derive(Debug, Clone)]
pub struct MockDom {
    /// The `<body>` element, carrier of the theme class
    pub body: DomElement,
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            body: DomElement::new("body"),
            elements: HashMap::new(),
            event_history: Vec::new(),
        }
    }

    /// Creates the calculator widget structure
    #[must_use]
    pub fn widget() -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("div")
                .with_id(PREVIOUS_OPERAND_ID)
                .with_class("previous-operand"),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(CURRENT_OPERAND_ID)
                .with_class("current-operand")
                .with_text("0"),
        );
        dom.register_element(
            DomElement::new("button")
                .with_id(THEME_TOGGLE_ID)
                .with_class("theme-toggle"),
        );
        dom.register_element(DomElement::new("i").with_id(THEME_ICON_ID));

        for button in &KEYPAD {
            let element = DomElement::new("button")
                .with_id(button.id)
                .with_text(button.label)
                .with_class("btn");
            let element = match button.data {
                ButtonData::Number(n) => element.with_attr("data-number", n),
                ButtonData::Action(a) => element.with_attr("data-action", a),
            };
            dom.register_element(element);
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Number of registered elements
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Swaps the body theme class and the toggle icon
    pub fn apply_theme(&mut self, theme: Theme) {
        self.body.remove_class(theme.toggled().body_class());
        self.body.add_class(theme.body_class());
        if let Some(icon) = self.elements.get_mut(THEME_ICON_ID) {
            icon.set_class_name(theme.icon_class());
        }
    }
}

/// Renderer writing into the mock DOM display lines
#[derive(Debug, Clone, Default)]
pub struct DomRenderer {
    dom: MockDom,
}

impl DomRenderer {
    /// Renders into `dom`
    #[must_use]
    pub fn new(dom: MockDom) -> Self {
        Self { dom }
    }

    /// The DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// The DOM, mutably
    pub fn dom_mut(&mut self) -> &mut MockDom {
        &mut self.dom
    }
}

impl Renderer for DomRenderer {
    fn render(&mut self, display: &Display) {
        self.dom.set_element_text(CURRENT_OPERAND_ID, &display.current);
        self.dom.set_element_text(PREVIOUS_OPERAND_ID, &display.previous);
    }
}
