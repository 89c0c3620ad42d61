use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default origin of the todo service.
const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub server: ServerConfig,
  /// Custom title for the header (defaults to the server domain if not set)
  pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Base URL of the todo service
  #[serde(default = "default_server_url")]
  pub url: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      url: default_server_url(),
    }
  }
}

fn default_server_url() -> String {
  DEFAULT_SERVER_URL.to_string()
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./tdo.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/tdo/config.yaml
  ///
  /// Unlike a client that needs credentials, this one can run without any
  /// config file: everything defaults, including the server URL.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Config::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("tdo.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("tdo").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server.url, "http://localhost:5000");
    assert!(config.title.is_none());
  }

  #[test]
  fn test_parse_full() {
    let config = Config::parse(
      "server:\n  url: https://todos.example.com\ntitle: My todos\n",
    )
    .unwrap();
    assert_eq!(config.server.url, "https://todos.example.com");
    assert_eq!(config.title.as_deref(), Some("My todos"));
  }

  #[test]
  fn test_parse_empty_document_uses_defaults() {
    let config = Config::parse("{}").unwrap();
    assert_eq!(config.server.url, "http://localhost:5000");
  }

  #[test]
  fn test_parse_rejects_garbage() {
    assert!(Config::parse("server: [not, a, map]").is_err());
  }
}
