// Application settings
// Loaded from ~/.config/finmap/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Server URL used when nothing is configured. The mapping service ships
/// with this default binding in its own config.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Environment override for the server URL. Resolution order is
/// flag > env > settings file (the CLI applies the flag).
pub const SERVER_URL_ENV: &str = "FINMAP_SERVER_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the mapping service, no trailing slash.
    #[serde(rename = "server.url")]
    pub server_url: String,

    /// HTTP timeout in seconds for all requests.
    #[serde(rename = "server.timeoutSecs")]
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load settings, applying the env override on top of the file.
    /// Missing or unparseable files yield defaults.
    pub fn load() -> Self {
        let mut settings = settings_file_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default();
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                settings.server_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        settings
    }

    /// Load from an explicit path. `None` on any read or parse failure.
    pub fn load_from(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save to the default location, creating the parent directory.
    pub fn save(&self) -> Result<(), String> {
        let path = settings_file_path().ok_or("Could not determine config directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        fs::write(path, &contents).map_err(|e| format!("Failed to write settings file: {}", e))
    }
}

/// Returns the path to the settings file.
pub fn settings_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("finmap/settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://localhost:8080");
        assert_eq!(settings.timeout_secs, 30);
    }

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            server_url: "http://192.168.100.118:8080".into(),
            timeout_secs: 10,
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.server_url, "http://192.168.100.118:8080");
        assert_eq!(loaded.timeout_secs, 10);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"server.url":"http://example.test"}"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.server_url, "http://example.test");
        assert_eq!(loaded.timeout_secs, 30);
    }

    #[test]
    fn corrupt_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(Settings::load_from(&path).is_none());
    }

    #[test]
    fn settings_path_under_finmap() {
        let path = settings_file_path().unwrap();
        assert!(path.to_string_lossy().contains("finmap"));
        assert!(path.to_string_lossy().ends_with("settings.json"));
    }
}
