//! Configuration and CLI argument handling

use clap::Parser;
use serde::{Deserialize, Serialize};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "panel-kit")]
#[command(about = "Countdown buttons, table defaults and form helpers for an admin control panel")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Base URL of the backend API the panel talks to
    #[arg(long, default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// Application name shown by the panel
    #[arg(long, default_value = "Elexify Industries Control Panel")]
    pub app_name: String,

    /// Rows per table page
    #[arg(short, long, default_value = "10")]
    pub table_length: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings injected into the application state at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSettings {
    pub api_url: String,
    pub app_name: String,
    pub table_length: u32,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            app_name: "Elexify Industries Control Panel".to_string(),
            table_length: 10,
        }
    }
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Settings handed to the application state
    pub fn settings(&self) -> PanelSettings {
        PanelSettings {
            api_url: self.api_url.trim_end_matches('/').to_string(),
            app_name: self.app_name.clone(),
            table_length: self.table_length.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_settings_defaults() {
        let config = Config::try_parse_from(["panel-kit"]).unwrap();
        assert_eq!(config.settings(), PanelSettings::default());
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn api_url_is_injected_without_trailing_slash() {
        let config = Config::try_parse_from([
            "panel-kit",
            "--api-url",
            "https://api.example.com/api/",
            "--table-length",
            "25",
            "-v",
        ])
        .unwrap();

        let settings = config.settings();
        assert_eq!(settings.api_url, "https://api.example.com/api");
        assert_eq!(settings.table_length, 25);
        assert_eq!(config.log_level(), "debug");
    }
}
