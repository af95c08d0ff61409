//! Countdown button controller
//!
//! Disables a control, renders a live `MM:SS` countdown into its indicator
//! label once per second, then restores the default label and re-enables it.

use std::{sync::Arc, time::Duration};
use serde::{Deserialize, Serialize};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{CountdownState, Document, Element, LabelPolicy};

/// Delay between two ticks
pub const TICK: Duration = Duration::from_secs(1);

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Element or its indicator is missing; nothing further is scheduled
    Failed,
    /// Time was rendered and another tick is due
    Pending,
    /// Countdown exhausted; label restored and element re-enabled
    Finished,
}

/// How a countdown ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownOutcome {
    Completed,
    Failed,
    Cancelled,
}

/// Result of starting a countdown, available without awaiting
#[derive(Debug)]
pub enum CountdownStart {
    /// The first tick could not resolve the element or its indicator
    Failed,
    /// The first tick was also the terminal one
    Finished,
    /// More ticks are pending
    Running(CountdownHandle),
}

impl CountdownStart {
    /// `Some(false)` on failure, `Some(true)` on immediate completion and
    /// `None` while ticks are still pending
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Failed => Some(false),
            Self::Finished => Some(true),
            Self::Running(_) => None,
        }
    }
}

/// Owned handle to a running countdown
#[derive(Debug)]
pub struct CountdownHandle {
    target_element_id: String,
    cancel_tx: watch::Sender<bool>,
    state_rx: watch::Receiver<CountdownState>,
    task: JoinHandle<CountdownOutcome>,
}

impl CountdownHandle {
    pub fn target_element_id(&self) -> &str {
        &self.target_element_id
    }

    /// Latest state published by the countdown
    pub fn state(&self) -> CountdownState {
        self.state_rx.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Request cancellation. The element is restored before the task ends.
    pub fn cancel(&self) {
        if self.cancel_tx.send(true).is_err() {
            debug!("Countdown on '{}' already ended", self.target_element_id);
        }
    }

    /// Wait for the countdown to end
    pub async fn wait(self) -> CountdownOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => CountdownOutcome::Cancelled,
            Err(e) => {
                error!("Countdown task on '{}' failed: {}", self.target_element_id, e);
                CountdownOutcome::Failed
            }
        }
    }
}

/// Run one tick of the countdown against `document`.
///
/// The element is disabled before its indicator is looked up, so an element
/// lacking the indicator stays disabled.
pub fn tick(document: &dyn Document, state: &mut CountdownState, policy: LabelPolicy) -> TickOutcome {
    let id = state.target_element_id.clone();
    let mut outcome = TickOutcome::Failed;

    let found = document.with_element(&id, &mut |element: &mut Element| {
        element.disabled = true;

        if !element.render(state.indicator_text()) {
            return;
        }

        outcome = if state.advance(policy) {
            TickOutcome::Pending
        } else {
            TickOutcome::Finished
        };
    });

    if !found {
        debug!("Countdown target '{}' not found", id);
        return TickOutcome::Failed;
    }

    match outcome {
        TickOutcome::Failed => debug!("Countdown target '{}' has no indicator label", id),
        TickOutcome::Pending => debug!("Countdown '{}' rendered, {}s left", id, state.remaining_seconds),
        TickOutcome::Finished => {
            if !restore(document, &id, &state.default_label) {
                warn!("Countdown target '{}' vanished on its terminal tick", id);
                return TickOutcome::Failed;
            }
        }
    }

    outcome
}

/// Render `label` into the element's indicator and re-enable it
pub fn restore(document: &dyn Document, id: &str, label: &str) -> bool {
    let mut restored = false;
    document.with_element(id, &mut |element: &mut Element| {
        if element.render(label) {
            element.disabled = false;
            restored = true;
        }
    });
    restored
}

/// Start a countdown on `state.target_element_id`.
///
/// The first tick runs before this returns; later ticks run on a spawned
/// task, so this must be called from within a tokio runtime. Dropping the
/// returned handle detaches the countdown without stopping it.
pub fn run_countdown(
    document: Arc<dyn Document>,
    mut state: CountdownState,
    policy: LabelPolicy,
) -> CountdownStart {
    info!(
        "Starting countdown on '{}' for {}s",
        state.target_element_id, state.remaining_seconds
    );

    match tick(document.as_ref(), &mut state, policy) {
        TickOutcome::Failed => {
            warn!("Countdown on '{}' could not start", state.target_element_id);
            CountdownStart::Failed
        }
        TickOutcome::Finished => {
            info!("Countdown on '{}' finished on its first tick", state.target_element_id);
            CountdownStart::Finished
        }
        TickOutcome::Pending => {
            let (cancel_tx, cancel_rx) = watch::channel(false);
            let (state_tx, state_rx) = watch::channel(state.clone());
            let target_element_id = state.target_element_id.clone();

            let task = tokio::spawn(countdown_task(document, state, policy, cancel_rx, state_tx));

            CountdownStart::Running(CountdownHandle {
                target_element_id,
                cancel_tx,
                state_rx,
                task,
            })
        }
    }
}

/// Background loop driving every tick after the first
async fn countdown_task(
    document: Arc<dyn Document>,
    mut state: CountdownState,
    policy: LabelPolicy,
    mut cancel_rx: watch::Receiver<bool>,
    state_tx: watch::Sender<CountdownState>,
) -> CountdownOutcome {
    let mut interval = interval_at(Instant::now() + TICK, TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut cancellable = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match tick(document.as_ref(), &mut state, policy) {
                    TickOutcome::Pending => {
                        state_tx.send_replace(state.clone());
                    }
                    TickOutcome::Finished => {
                        state_tx.send_replace(state.clone());
                        info!("Countdown on '{}' completed", state.target_element_id);
                        return CountdownOutcome::Completed;
                    }
                    TickOutcome::Failed => {
                        warn!("Countdown on '{}' stopped: element unavailable", state.target_element_id);
                        return CountdownOutcome::Failed;
                    }
                }
            }

            changed = cancel_rx.changed(), if cancellable => {
                if changed.is_err() {
                    // Handle dropped, keep running detached
                    cancellable = false;
                    continue;
                }
                if *cancel_rx.borrow() {
                    info!("Cancelling countdown on '{}'", state.target_element_id);
                    if !restore(document.as_ref(), &state.target_element_id, &state.default_label) {
                        debug!("Cancelled countdown target '{}' no longer restorable", state.target_element_id);
                    }
                    return CountdownOutcome::Cancelled;
                }
            }
        }
    }
}
