//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.mindweave.toml` files.

use crate::cli::{Args, OutputFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".mindweave.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis service settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Analysis service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the service.
    #[serde(default = "default_url")]
    pub url: String,

    /// Path of the analysis endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds. Unset means no client-side timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            endpoint: default_endpoint(),
            timeout_seconds: None,
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_endpoint() -> String {
    "/api/analyze".to_string()
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format when `--format` is not given.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from `dir/.mindweave.toml`.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only when they were given.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref url) = args.server_url {
            self.server.url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.server.timeout_seconds = Some(timeout);
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://127.0.0.1:5000");
        assert_eq!(config.server.endpoint, "/api/analyze");
        assert!(config.server.timeout_seconds.is_none());
        assert_eq!(config.output.format, OutputFormat::Terminal);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[server]
url = "https://mindweave.example.com"
timeout_seconds = 45

[output]
format = "markdown"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.server.url, "https://mindweave.example.com");
        assert_eq!(config.server.endpoint, "/api/analyze");
        assert_eq!(config.server.timeout_seconds, Some(45));
        assert_eq!(config.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[output]"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.server.url, Config::default().server.url);
    }

    #[test]
    fn test_load_from_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::load_from_dir(temp_dir.path()).unwrap().is_none());

        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[server]\nendpoint = \"/v2/analyze\"\n",
        )
        .unwrap();
        let config = Config::load_from_dir(temp_dir.path()).unwrap().unwrap();
        assert_eq!(config.server.endpoint, "/v2/analyze");
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[server\nurl = ").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_cli_overrides_only_when_given() {
        let mut config = Config::default();
        config.server.timeout_seconds = Some(10);

        let args = Args::parse_from(["mindweave", "--server-url", "http://other:8080", "hi"]);
        config.merge_with_args(&args);
        assert_eq!(config.server.url, "http://other:8080");
        assert_eq!(config.server.timeout_seconds, Some(10));
        assert_eq!(config.output.format, OutputFormat::Terminal);

        let args = Args::parse_from(["mindweave", "--timeout", "3", "--format", "json", "hi"]);
        config.merge_with_args(&args);
        assert_eq!(config.server.timeout_seconds, Some(3));
        assert_eq!(config.output.format, OutputFormat::Json);
    }
}
