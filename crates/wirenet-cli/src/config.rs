//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};

use wirenet::{ConfigError, WirenetError, config::AppConfig};

use crate::error::CliError;

/// Configuration file looked up relative to the working directory.
const LOCAL_CONFIG_PATH: &str = "wirenet/config.toml";

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (wirenet/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be read or parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG_PATH);
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(system_config) = system_config_path() {
        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(&system_config);
        }
        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn system_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "wirenet", "wirenet")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from a TOML file
fn load_config_file(path: &Path) -> Result<AppConfig, CliError> {
    if !path.exists() {
        let err = WirenetError::from(ConfigError::MissingFile(path.to_path_buf()));
        return Err(err.into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|err| CliError::parse(path.display().to_string(), content.as_str(), &err))
}
