//! Configuration schema for the portal client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root config for the portal client.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PortalConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub toasts: ToastConfig,
    #[serde(default)]
    pub announcements: AnnouncementsConfig,
}

impl PortalConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> PortalConfigBuilder {
        PortalConfigBuilder::new()
    }
}

/// Builder for assembling a `PortalConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct PortalConfigBuilder {
    config: PortalConfig,
}

impl PortalConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: PortalConfig::default(),
        }
    }

    pub fn api(mut self, api: ApiConfig) -> Self {
        self.config.api = api;
        self
    }

    /// Shorthand for overriding only the backend base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.api.base_url = base_url.into();
        self
    }

    pub fn assistant(mut self, assistant: AssistantConfig) -> Self {
        self.config.assistant = assistant;
        self
    }

    pub fn toasts(mut self, toasts: ToastConfig) -> Self {
        self.config.toasts = toasts;
        self
    }

    pub fn announcements(mut self, announcements: AnnouncementsConfig) -> Self {
        self.config.announcements = announcements;
        self
    }

    pub fn build(self) -> PortalConfig {
        self.config
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token sent with every request when set.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Onboarding assistant pacing and limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantConfig {
    /// Delay before an action tag from a reply is handed to the host.
    #[serde(default = "default_action_delay_ms")]
    pub action_delay_ms: u64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Number of most recent transcript entries forwarded as history.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            action_delay_ms: default_action_delay_ms(),
            max_suggestions: default_max_suggestions(),
            history_window: default_history_window(),
        }
    }
}

impl AssistantConfig {
    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }
}

fn default_action_delay_ms() -> u64 {
    1500
}

fn default_max_suggestions() -> usize {
    4
}

fn default_history_window() -> usize {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToastConfig {
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
        }
    }
}

impl ToastConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

fn default_toast_duration_ms() -> u64 {
    5000
}

/// Defaults for the announcement board filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementsConfig {
    #[serde(default)]
    pub show_expired: bool,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for AnnouncementsConfig {
    fn default() -> Self {
        Self {
            show_expired: false,
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    10
}
