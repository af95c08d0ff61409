//! Countdown state structure and tick formatting

use serde::{Deserialize, Serialize};

/// Label restored when a countdown ends and no other label was given
pub const DEFAULT_LABEL: &str = "Resend";

/// Clock icon markup placed in front of the remaining time
pub const CLOCK_ICON: &str = "<i class=\"fa fa-clock-o\"></i>&nbsp;&nbsp;";

/// How the caller's default label travels across ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Only the first tick sees the caller's label; later ticks fall back
    /// to [`DEFAULT_LABEL`]
    #[default]
    FirstTickOnly,
    /// The caller's label is restored on the terminal tick, however late
    Preserve,
}

/// Transient state of a running countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub remaining_seconds: u64,
    pub target_element_id: String,
    pub default_label: String,
}

impl CountdownState {
    /// Create a countdown state with the standard default label
    pub fn new(remaining_seconds: u64, target_element_id: impl Into<String>) -> Self {
        Self {
            remaining_seconds,
            target_element_id: target_element_id.into(),
            default_label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Override the label restored on the terminal tick
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Remaining time as `MM:SS`
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Indicator markup for the current tick
    pub fn indicator_text(&self) -> String {
        format!("{}{}", CLOCK_ICON, self.clock())
    }

    /// Consume one second. Returns `false` once the counter would drop
    /// below zero, leaving it at zero.
    pub fn decrement(&mut self) -> bool {
        match self.remaining_seconds.checked_sub(1) {
            Some(next) => {
                self.remaining_seconds = next;
                true
            }
            None => false,
        }
    }

    /// Move to the next tick under `policy`. The label is only touched when
    /// another tick follows.
    pub fn advance(&mut self, policy: LabelPolicy) -> bool {
        if !self.decrement() {
            return false;
        }
        if policy == LabelPolicy::FirstTickOnly {
            self.default_label = DEFAULT_LABEL.to_string();
        }
        true
    }
}

/// Format seconds as minutes and seconds, each padded to two digits
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_below_ten() {
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(125), "02:05");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn indicator_carries_clock_icon() {
        let state = CountdownState::new(59, "btn");
        assert_eq!(state.indicator_text(), format!("{}00:59", CLOCK_ICON));
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut state = CountdownState::new(1, "btn");
        assert!(state.decrement());
        assert_eq!(state.remaining_seconds, 0);
        assert!(!state.decrement());
        assert_eq!(state.remaining_seconds, 0);
    }

    #[test]
    fn advance_drops_custom_label_by_default() {
        let mut state = CountdownState::new(3, "btn").with_label("Send Again");
        state.advance(LabelPolicy::FirstTickOnly);
        assert_eq!(state.default_label, DEFAULT_LABEL);

        let mut state = CountdownState::new(3, "btn").with_label("Send Again");
        state.advance(LabelPolicy::Preserve);
        assert_eq!(state.default_label, "Send Again");
    }

    #[test]
    fn terminal_advance_keeps_label() {
        let mut state = CountdownState::new(0, "btn").with_label("Send Again");
        assert!(!state.advance(LabelPolicy::FirstTickOnly));
        assert_eq!(state.default_label, "Send Again");
    }
}
