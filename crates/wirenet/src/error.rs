//! Error types for wirenet operations.
//!
//! The layout engine itself is total and never returns an error. Errors only
//! arise at the edges: validating [`LayoutOptions`](crate::config::LayoutOptions),
//! locating configuration files, and checking that an externally supplied
//! placement covers a [`Network`](crate::network::Network).

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for wirenet operations.
#[derive(Debug, Error)]
pub enum WirenetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),
}

/// Problems with layout configuration values or configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("grid step must be a positive finite number, got {0}")]
    InvalidGridStep(f64),

    #[error("viewport {width}x{height} leaves no room inside the 20-unit margin")]
    InvalidViewport { width: f64, height: f64 },
}
