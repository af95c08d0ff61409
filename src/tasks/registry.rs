//! Registry of running countdowns, one per target element

use std::{collections::HashMap, sync::Arc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::countdown::{run_countdown, CountdownHandle, CountdownOutcome, CountdownStart};
use crate::state::{CountdownState, Document, LabelPolicy};

/// Immediate status of a countdown started through the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownStatus {
    Failed,
    Finished,
    Running,
}

/// Tracks running countdowns so two of them never drive the same element
#[derive(Debug, Default)]
pub struct CountdownRegistry {
    running: Mutex<HashMap<String, CountdownHandle>>,
}

impl CountdownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown, cancelling and awaiting any countdown already
    /// running on the same element first
    pub async fn start(
        &self,
        document: Arc<dyn Document>,
        state: CountdownState,
        policy: LabelPolicy,
    ) -> CountdownStatus {
        let mut running = self.running.lock().await;
        running.retain(|_, handle| !handle.is_finished());

        if let Some(previous) = running.remove(&state.target_element_id) {
            info!("Replacing countdown on '{}'", state.target_element_id);
            previous.cancel();
            let outcome = previous.wait().await;
            debug!("Previous countdown on '{}' ended: {:?}", state.target_element_id, outcome);
        }

        let id = state.target_element_id.clone();
        match run_countdown(document, state, policy) {
            CountdownStart::Failed => CountdownStatus::Failed,
            CountdownStart::Finished => CountdownStatus::Finished,
            CountdownStart::Running(handle) => {
                running.insert(id, handle);
                CountdownStatus::Running
            }
        }
    }

    /// Cancel the countdown on `id`. Returns `None` if nothing was running.
    pub async fn cancel(&self, id: &str) -> Option<CountdownOutcome> {
        let handle = {
            let mut running = self.running.lock().await;
            running.remove(id)?
        };

        if handle.is_finished() {
            debug!("Countdown on '{}' already ended, nothing to cancel", id);
            return None;
        }
        handle.cancel();
        Some(handle.wait().await)
    }

    /// Cancel every running countdown
    pub async fn cancel_all(&self) {
        let handles: Vec<CountdownHandle> = {
            let mut running = self.running.lock().await;
            running.drain().map(|(_, handle)| handle).collect()
        };

        info!("Cancelling {} countdown(s)", handles.len());
        for handle in handles {
            handle.cancel();
            handle.wait().await;
        }
    }

    /// Ids of countdowns still ticking, pruning the ones that ended
    pub async fn active(&self) -> Vec<String> {
        let mut running = self.running.lock().await;
        running.retain(|_, handle| !handle.is_finished());
        let mut ids: Vec<String> = running.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Latest state of the countdown on `id`, if still ticking
    pub async fn state_of(&self, id: &str) -> Option<CountdownState> {
        let running = self.running.lock().await;
        running
            .get(id)
            .filter(|handle| !handle.is_finished())
            .map(CountdownHandle::state)
    }
}
