//! Panel Kit - helpers for an admin control panel
//! 
//! This library provides a cancellable countdown button controller, table
//! pagination and filter defaults, server message helpers and a typed form
//! tree, plus a small HTTP server exposing them.

pub mod config;
pub mod state;
pub mod api;
pub mod forms;
pub mod helpers;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, PanelSettings};
pub use state::{AppState, CountdownState, Document, LabelPolicy, MemoryDocument};
pub use api::create_router;
pub use tasks::{run_countdown, CountdownOutcome, CountdownStart};
pub use utils::signals::shutdown_signal;
