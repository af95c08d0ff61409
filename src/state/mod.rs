//! State management module
//! 
//! This module contains the countdown state, the UI document capability and
//! the shared application state.

pub mod app_state;
pub mod countdown_state;
pub mod document;

// Re-export main types
pub use app_state::AppState;
pub use countdown_state::{format_clock, CountdownState, LabelPolicy, CLOCK_ICON, DEFAULT_LABEL};
pub use document::{Document, Element, ElementSnapshot, MemoryDocument};
