//! User settings stored as settings.json in the app data directory

use crate::constants::{BACKEND_URL_ENV, DEFAULT_BACKEND_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Backend
    pub backend_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Backend base URL: environment override, then settings file, then default.
    pub fn resolve_backend_url(&self) -> String {
        Self::pick_backend_url(std::env::var(BACKEND_URL_ENV).ok(), &self.backend_url)
    }

    fn pick_backend_url(env_value: Option<String>, configured: &str) -> String {
        if let Some(url) = env_value.filter(|u| !u.trim().is_empty()) {
            info!(url = %url, "Using backend URL from environment");
            return url.trim().to_string();
        }
        if configured.trim().is_empty() {
            DEFAULT_BACKEND_URL.to_string()
        } else {
            configured.trim().to_string()
        }
    }
}
