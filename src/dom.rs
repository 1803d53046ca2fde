//! Document abstraction the controller drives.
//!
//! The controller never touches a real browser tree directly. It talks to a
//! [`Document`], which a wasm binding can implement over the DOM and which
//! [`MemoryDocument`] implements in memory for headless use and tests.
//!
//! # Example
//!
//! ```
//! use inkframe_refresh::{Document, MemoryDocument};
//!
//! let doc = MemoryDocument::refresh_modal("edit-modal", "edit");
//! assert!(doc.has_element("edit-modal"));
//! assert!(doc.has_element("edit-group-interval"));
//! assert!(!doc.is_visible("edit-modal"));
//! ```

use std::collections::HashMap;

/// Kind of element, as far as the controller cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Any non-control element (`div`, `label`, `span`, ...)
    Container,
    /// Radio button
    Radio,
    /// Text, number or time input
    Input,
    /// `<select>`
    Select,
}

impl ElementKind {
    /// Whether this is an input or select field.
    ///
    /// Radios are excluded: clicks on them are routed to the radio handler.
    pub fn is_field(self) -> bool {
        matches!(self, ElementKind::Input | ElementKind::Select)
    }
}

/// The operations the refresh controller needs from its surrounding document.
pub trait Document {
    /// Whether an element with this id exists.
    fn has_element(&self, id: &str) -> bool;

    /// Element kind, if it exists.
    fn kind(&self, id: &str) -> Option<ElementKind>;

    /// Whether `descendant` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: &str, descendant: &str) -> bool;

    /// Current value of an input or select.
    fn value(&self, id: &str) -> Option<String>;

    /// Set the value of an input or select.
    fn set_value(&mut self, id: &str, value: &str);

    /// Whether a radio is checked.
    fn is_checked(&self, id: &str) -> bool;

    /// Check or uncheck a radio.
    fn set_checked(&mut self, id: &str, checked: bool);

    /// Move input focus.
    fn focus(&mut self, id: &str);

    /// Whether an element is shown.
    fn is_visible(&self, id: &str) -> bool;

    /// Show or hide an element.
    fn set_visible(&mut self, id: &str, visible: bool);

    /// Blocking alert, the notification of last resort.
    fn alert(&mut self, message: &str);
}

/// A single element in a [`MemoryDocument`].
#[derive(Debug, Clone)]
pub struct Element {
    /// Element id
    pub id: String,
    /// What kind of element this is
    pub kind: ElementKind,
    /// Parent element id
    pub parent: Option<String>,
    /// Field value (inputs and selects)
    pub value: String,
    /// Checked state (radios)
    pub checked: bool,
    /// Visibility
    pub visible: bool,
}

impl Element {
    /// Create a visible element with no parent.
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            parent: None,
            value: String::new(),
            checked: false,
            visible: true,
        }
    }

    /// Place the element inside `parent`.
    #[must_use]
    pub fn inside(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the initial value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Start hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// In-memory [`Document`].
///
/// Records focus moves and alerts so callers can inspect them.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, Element>,
    focused: Option<String>,
    alerts: Vec<String>,
}

impl MemoryDocument {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element, replacing any with the same id.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    /// Add an element, replacing any with the same id.
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    /// Remove an element.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    /// Look up an element.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Currently focused element.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Alerts shown so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Build the standard refresh settings modal.
    ///
    /// Layout (ids shown for prefix `p`):
    ///
    /// ```text
    /// modal_id (hidden)
    /// ├── p-group-interval
    /// │   ├── p-refresh-interval   radio
    /// │   ├── p-interval-label
    /// │   ├── p-interval           input
    /// │   └── p-unit               select (defaults to "minute")
    /// └── p-group-scheduled
    ///     ├── p-refresh-scheduled  radio
    ///     ├── p-scheduled-label
    ///     └── p-scheduled          input
    /// ```
    pub fn refresh_modal(modal_id: &str, prefix: &str) -> Self {
        let id = |suffix: &str| format!("{}-{}", prefix, suffix);
        let interval_group = id("group-interval");
        let scheduled_group = id("group-scheduled");

        let container =
            |name: String, parent: &str| Element::new(name, ElementKind::Container).inside(parent);
        let control = |suffix: &str, kind: ElementKind, group: &str| {
            Element::new(id(suffix), kind).inside(group)
        };

        Self::new()
            .with_element(Element::new(modal_id, ElementKind::Container).hidden())
            .with_element(container(interval_group.clone(), modal_id))
            .with_element(container(scheduled_group.clone(), modal_id))
            .with_element(control("refresh-interval", ElementKind::Radio, &interval_group))
            .with_element(container(id("interval-label"), &interval_group))
            .with_element(control("interval", ElementKind::Input, &interval_group))
            .with_element(
                control("unit", ElementKind::Select, &interval_group).with_value("minute"),
            )
            .with_element(control("refresh-scheduled", ElementKind::Radio, &scheduled_group))
            .with_element(container(id("scheduled-label"), &scheduled_group))
            .with_element(control("scheduled", ElementKind::Input, &scheduled_group))
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn kind(&self, id: &str) -> Option<ElementKind> {
        self.elements.get(id).map(|e| e.kind)
    }

    fn contains(&self, ancestor: &str, descendant: &str) -> bool {
        let mut current = self.elements.get(descendant);
        // Bounded by element count so a parent cycle cannot loop forever
        for _ in 0..=self.elements.len() {
            match current {
                Some(element) if element.id == ancestor => return true,
                Some(element) => {
                    current = element
                        .parent
                        .as_deref()
                        .and_then(|parent| self.elements.get(parent));
                }
                None => return false,
            }
        }
        false
    }

    fn value(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.value = value.to_string();
        }
    }

    fn is_checked(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.checked)
    }

    fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.checked = checked;
        }
    }

    fn focus(&mut self, id: &str) {
        if self.elements.contains_key(id) {
            self.focused = Some(id.to_string());
        }
    }

    fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.visible)
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.visible = visible;
        }
    }

    fn alert(&mut self, message: &str) {
        tracing::debug!("alert: {}", message);
        self.alerts.push(message.to_string());
    }
}
