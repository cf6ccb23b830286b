// Configuration loading for the base API URL. The URL comes from the
// `SPEAKWRITE_API_URL` environment variable, or from a small JSON file
// in the user's home directory. Loaded once; the client captures the
// value at construction and never mutates it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable holding the base API URL.
pub const BASE_URL_ENV: &str = "SPEAKWRITE_API_URL";

/// Config file name, looked up in the user's home directory.
const CONFIG_FILE: &str = ".speakwrite.json";

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the SpeakWrite API, e.g.
    /// `https://applications.speakwrite.com/api/`.
    pub api_base_url: String,
}

impl Config {
    /// Load configuration from `SPEAKWRITE_API_URL`, falling back to the
    /// `.speakwrite.json` file in the home directory.
    pub fn load() -> Result<Self> {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                return Ok(Config { api_base_url: url });
            }
        }
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::from_file(&dir.join(CONFIG_FILE))
    }

    /// Load configuration from a JSON file of the form
    /// `{"api_base_url": "..."}`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|_| {
            Error::Config(format!(
                "no base URL configured: set {} or create {} containing {{\"api_base_url\": \"...\"}}",
                BASE_URL_ENV,
                path.display()
            ))
        })?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("invalid config file {}: {}", path.display(), e)))?;
        if config.api_base_url.trim().is_empty() {
            return Err(Error::Config(format!(
                "empty api_base_url in {}",
                path.display()
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_file_reads_base_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"api_base_url": "https://example.test/api/"}"#)
            .unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "https://example.test/api/");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::from_file(Path::new("/nonexistent/.speakwrite.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"api_base_url = oops").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_url_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"api_base_url": "  "}"#).unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
