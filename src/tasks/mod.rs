//! Background tasks module
//! 
//! This module contains the countdown controller and the registry that keeps
//! track of countdowns running alongside the HTTP server.

pub mod countdown;
pub mod registry;

// Re-export main types
pub use countdown::{run_countdown, tick, CountdownHandle, CountdownOutcome, CountdownStart, TickOutcome};
pub use registry::{CountdownRegistry, CountdownStatus};
