//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::CountdownState,
    tasks::{CountdownOutcome, CountdownStatus},
};

/// Body of POST /elements/:id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterElementRequest {
    /// Initial indicator label
    #[serde(default)]
    pub label: Option<String>,
    /// Whether the element has an indicator label at all
    #[serde(default = "default_indicator")]
    pub indicator: bool,
}

fn default_indicator() -> bool {
    true
}

/// Body of POST /countdown/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCountdownRequest {
    pub seconds: u64,
    #[serde(default)]
    pub default_label: Option<String>,
    /// Keep the custom label until the terminal tick
    #[serde(default)]
    pub preserve_label: bool,
}

/// Response for countdown endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownResponse {
    pub element_id: String,
    pub status: CountdownStatus,
    pub state: Option<CountdownState>,
    pub timestamp: DateTime<Utc>,
}

impl CountdownResponse {
    pub fn new(element_id: String, status: CountdownStatus, state: Option<CountdownState>) -> Self {
        Self {
            element_id,
            status,
            state,
            timestamp: Utc::now(),
        }
    }
}

/// Response for DELETE /countdown/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    pub element_id: String,
    pub outcome: CountdownOutcome,
    pub timestamp: DateTime<Utc>,
}

/// Single message returned by the message endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageNumberResponse {
    pub page_number: u64,
}

/// Status response with settings and running countdowns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub app_name: String,
    pub api_url: String,
    pub table_length: u32,
    pub active_countdowns: Vec<String>,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
