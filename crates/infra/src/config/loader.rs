//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `FANELLA_BASE_URL` is unset, falls back to loading from file
//! 3. Probes the working directory and the executable's directory
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FANELLA_BASE_URL`: Service URL including version prefix (required)
//! - `FANELLA_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `FANELLA_CLIENT_ID`: Client id for the client-credentials grant
//! - `FANELLA_CLIENT_SECRET`: Client secret for the client-credentials grant
//!
//! Missing credentials select the guest grant.
//!
//! ## File Locations
//! The loader searches `fanella.toml`, `fanella.json`, `config.toml` and
//! `config.json`, first in the current working directory, then next to the
//! executable.

use std::path::{Path, PathBuf};

use fanella_domain::{ClientConfig, Credentials, FanellaConfig, FanellaError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["fanella.toml", "fanella.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `FanellaError::Config` if configuration cannot be loaded from
/// either source or a value is malformed.
pub fn load() -> Result<FanellaConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `FanellaError::Config` if `FANELLA_BASE_URL` is missing or
/// `FANELLA_TIMEOUT_SECS` is not a number.
pub fn load_from_env() -> Result<FanellaConfig> {
    let base_url = env_var("FANELLA_BASE_URL")?;

    let mut client = ClientConfig::with_base_url(base_url);
    if let Ok(raw) = std::env::var("FANELLA_TIMEOUT_SECS") {
        client.timeout_secs = raw
            .parse::<u64>()
            .map_err(|e| FanellaError::Config(format!("Invalid timeout: {}", e)))?;
    }

    let credentials = Credentials::new(
        std::env::var("FANELLA_CLIENT_ID").unwrap_or_default(),
        std::env::var("FANELLA_CLIENT_SECRET").unwrap_or_default(),
    );

    Ok(FanellaConfig { client, credentials })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations. Format is detected by
/// file extension.
///
/// # Errors
/// Returns `FanellaError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<FanellaConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FanellaError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_path().ok_or_else(|| {
            FanellaError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FanellaError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<FanellaConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FanellaError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FanellaError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(FanellaError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file in the working directory, then next to the
/// executable.
pub fn find_config_path() -> Option<PathBuf> {
    let mut dirs = Vec::with_capacity(2);
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    find_in(&dirs)
}

fn find_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        FanellaError::Config(format!("Missing required environment variable: {}", key))
    })
}
