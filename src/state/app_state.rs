//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{CountdownState, Element, ElementSnapshot, LabelPolicy, MemoryDocument};
use crate::{
    config::PanelSettings,
    tasks::{CountdownOutcome, CountdownRegistry, CountdownStatus},
};

/// Shared state behind the HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Injected panel configuration
    pub settings: PanelSettings,
    /// UI elements the countdowns drive
    pub document: Arc<MemoryDocument>,
    /// Countdowns currently ticking
    pub countdowns: CountdownRegistry,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with an empty document
    pub fn new(settings: PanelSettings) -> Self {
        Self {
            settings,
            document: Arc::new(MemoryDocument::new()),
            countdowns: CountdownRegistry::new(),
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    fn record_action(&self, action: String) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action);
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Register (or replace) a button in the document
    pub fn register_element(&self, id: &str, label: Option<String>) -> ElementSnapshot {
        info!("Registering element '{}'", id);
        let element = match label {
            Some(label) => Element::button(label),
            None => Element::bare(),
        };
        self.document.insert(id, element);
        self.record_action(format!("register:{}", id));

        ElementSnapshot {
            id: id.to_string(),
            disabled: false,
            indicator: self.document.element(id).and_then(|el| el.indicator),
            renders: Vec::new(),
        }
    }

    /// Remove an element; a countdown on it fails on its next tick
    pub fn remove_element(&self, id: &str) -> bool {
        let removed = self.document.remove(id);
        if removed {
            info!("Removed element '{}'", id);
            self.record_action(format!("remove:{}", id));
        }
        removed
    }

    pub fn element(&self, id: &str) -> Option<ElementSnapshot> {
        self.document.snapshot(id)
    }

    /// Start a countdown on an element, replacing any countdown already on it
    pub async fn start_countdown(&self, state: CountdownState, policy: LabelPolicy) -> CountdownStatus {
        let id = state.target_element_id.clone();
        let status = self.countdowns.start(self.document.clone(), state, policy).await;
        info!("Countdown on '{}': {:?}", id, status);
        self.record_action(format!("countdown:{}", id));
        status
    }

    pub async fn cancel_countdown(&self, id: &str) -> Option<CountdownOutcome> {
        let outcome = self.countdowns.cancel(id).await;
        if outcome.is_some() {
            self.record_action(format!("cancel:{}", id));
        }
        outcome
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn countdown_lifecycle_is_tracked() {
        let state = AppState::new(PanelSettings::default());
        state.register_element("otp", Some("Resend".into()));

        let status = state.start_countdown(CountdownState::new(30, "otp"), LabelPolicy::default()).await;
        assert_eq!(status, CountdownStatus::Running);
        assert_eq!(state.get_last_action().0.as_deref(), Some("countdown:otp"));

        assert_eq!(state.cancel_countdown("otp").await, Some(CountdownOutcome::Cancelled));
        assert_eq!(state.cancel_countdown("otp").await, None);
        assert!(!state.element("otp").unwrap().disabled);
    }

    #[test]
    fn bare_element_has_no_indicator() {
        let state = AppState::new(PanelSettings::default());
        let snapshot = state.register_element("plain", None);
        assert_eq!(snapshot.indicator, None);
        assert!(state.remove_element("plain"));
        assert!(!state.remove_element("plain"));
    }
}
