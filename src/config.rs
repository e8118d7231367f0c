//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_timeout() -> u64 { 30 }
fn default_user_agent() -> String { "LineupEditor/0.2".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server_url: String,
    #[serde(default)]
    pub api_token: String,
    /// Playlist opened on startup when set.
    #[serde(default)]
    pub default_playlist_id: Option<i64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Where bouquet export files land by default.
    #[serde(default)]
    pub export_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            api_token: String::new(),
            default_playlist_id: None,
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout(),
            export_dir: String::new(),
        }
    }
}

impl AppConfig {
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("lineup_editor");
        fs::create_dir_all(&path).ok();
        path.push("config.json");
        path
    }

    pub fn load() -> Self {
        let path = Self::config_path();

        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(config) = serde_json::from_str(&content) {
                    return config;
                }
            }
        }

        Self::default()
    }

    pub fn save(&self) {
        let path = Self::config_path();
        if let Ok(content) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, content);
        }
    }
}
