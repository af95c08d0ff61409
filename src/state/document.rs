//! UI document capability and its in-memory implementation

use std::{
    collections::HashMap,
    sync::Mutex,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A UI control as seen by the countdown controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Whether interaction with the control is blocked
    pub disabled: bool,
    /// Inner indicator label sub-element; `None` when the control lacks one
    pub indicator: Option<String>,
    /// Texts rendered since the document last collected them
    #[serde(skip)]
    written: Vec<String>,
}

impl Element {
    /// A button with an indicator label
    pub fn button(label: impl Into<String>) -> Self {
        Self {
            disabled: false,
            indicator: Some(label.into()),
            written: Vec::new(),
        }
    }

    /// A control without the indicator sub-element
    pub fn bare() -> Self {
        Self {
            disabled: false,
            indicator: None,
            written: Vec::new(),
        }
    }

    /// Write `text` into the indicator. Returns `false` if the element has
    /// no indicator.
    pub fn render(&mut self, text: impl Into<String>) -> bool {
        let Some(indicator) = self.indicator.as_mut() else {
            return false;
        };
        let text = text.into();
        *indicator = text.clone();
        self.written.push(text);
        true
    }
}

/// Element lookup by identifier, the only capability the countdown needs.
///
/// Implementations re-resolve the element on every call; callers never hold
/// a reference to an element between ticks.
pub trait Document: Send + Sync {
    /// Apply `f` to the element with `id`. Returns `false` if no element
    /// with that id exists.
    fn with_element(&self, id: &str, f: &mut dyn FnMut(&mut Element)) -> bool;
}

/// Snapshot of an element plus every text ever rendered into its indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: String,
    pub disabled: bool,
    pub indicator: Option<String>,
    pub renders: Vec<String>,
}

#[derive(Debug)]
struct Slot {
    element: Element,
    renders: Vec<String>,
}

/// Thread-safe in-memory document that records indicator renders
#[derive(Debug, Default)]
pub struct MemoryDocument {
    slots: Mutex<HashMap<String, Slot>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element, clearing its render history
    pub fn insert(&self, id: impl Into<String>, element: Element) {
        let id = id.into();
        match self.slots.lock() {
            Ok(mut slots) => {
                debug!("Registering element '{}'", id);
                slots.insert(id, Slot { element, renders: Vec::new() });
            }
            Err(e) => warn!("Failed to lock document: {}", e),
        }
    }

    /// Remove an element; returns whether it existed
    pub fn remove(&self, id: &str) -> bool {
        self.slots
            .lock()
            .map(|mut slots| slots.remove(id).is_some())
            .unwrap_or(false)
    }

    /// Current state of an element
    pub fn element(&self, id: &str) -> Option<Element> {
        self.slots.lock().ok()?.get(id).map(|slot| slot.element.clone())
    }

    /// Every text rendered into the element's indicator, oldest first
    pub fn renders(&self, id: &str) -> Vec<String> {
        self.slots
            .lock()
            .ok()
            .and_then(|slots| slots.get(id).map(|slot| slot.renders.clone()))
            .unwrap_or_default()
    }

    pub fn snapshot(&self, id: &str) -> Option<ElementSnapshot> {
        let slots = self.slots.lock().ok()?;
        slots.get(id).map(|slot| ElementSnapshot {
            id: id.to_string(),
            disabled: slot.element.disabled,
            indicator: slot.element.indicator.clone(),
            renders: slot.renders.clone(),
        })
    }
}

impl Document for MemoryDocument {
    fn with_element(&self, id: &str, f: &mut dyn FnMut(&mut Element)) -> bool {
        let mut slots = match self.slots.lock() {
            Ok(slots) => slots,
            Err(e) => {
                warn!("Failed to lock document: {}", e);
                return false;
            }
        };

        let Some(slot) = slots.get_mut(id) else {
            return false;
        };

        f(&mut slot.element);
        slot.renders.append(&mut slot.element.written);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_is_not_touched() {
        let doc = MemoryDocument::new();
        let mut called = false;
        assert!(!doc.with_element("nope", &mut |_: &mut Element| called = true));
        assert!(!called);
    }

    #[test]
    fn indicator_writes_are_recorded() {
        let doc = MemoryDocument::new();
        doc.insert("btn", Element::button("Send"));

        doc.with_element("btn", &mut |el: &mut Element| {
            el.render("00:01");
        });
        doc.with_element("btn", &mut |el: &mut Element| {
            el.render("00:00");
        });
        doc.with_element("btn", &mut |el: &mut Element| el.disabled = true);

        assert_eq!(doc.renders("btn"), vec!["00:01", "00:00"]);
        assert!(doc.element("btn").unwrap().disabled);
    }

    #[test]
    fn repeated_text_is_recorded_every_time() {
        let doc = MemoryDocument::new();
        doc.insert("btn", Element::button("00:05"));

        doc.with_element("btn", &mut |el: &mut Element| {
            el.render("00:05");
            el.render("00:05");
        });
        doc.with_element("btn", &mut |el: &mut Element| {
            el.render("00:05");
        });

        assert_eq!(doc.renders("btn"), vec!["00:05", "00:05", "00:05"]);
        assert_eq!(doc.element("btn").unwrap().indicator.as_deref(), Some("00:05"));
    }

    #[test]
    fn render_without_indicator_is_refused() {
        let doc = MemoryDocument::new();
        doc.insert("plain", Element::bare());

        let mut rendered = true;
        doc.with_element("plain", &mut |el: &mut Element| rendered = el.render("00:01"));

        assert!(!rendered);
        assert!(doc.renders("plain").is_empty());
    }

    #[test]
    fn remove_reports_existence() {
        let doc = MemoryDocument::new();
        doc.insert("btn", Element::bare());
        assert!(doc.remove("btn"));
        assert!(!doc.remove("btn"));
        assert!(doc.snapshot("btn").is_none());
    }
}
