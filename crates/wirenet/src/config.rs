//! Configuration types for wirenet layout.
//!
//! This module provides the options record read by the layout engine and the
//! configuration structures it is usually loaded from. Configuration types
//! implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Serializable layout settings with defaults.
//! - [`LayoutOptions`] - The read-only record consumed by one layout computation.
//!
//! # Example
//!
//! ```
//! # use wirenet::config::AppConfig;
//! let config = AppConfig::default();
//! let options = config.layout().to_options();
//! assert!(options.validate().is_ok());
//! assert!(!options.snap_to_grid());
//! ```

use serde::Deserialize;

use wirenet_core::geometry::{Bounds, Point, Size};

use crate::error::ConfigError;

/// Grid step used when none is configured.
pub const DEFAULT_GRID_STEP: f64 = 20.0;

/// Default canvas width.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;

/// Default canvas height.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 520.0;

/// Distance every placed node keeps from the viewport border.
pub const VIEWPORT_MARGIN: f64 = 20.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Layout settings as they appear in a configuration file.
///
/// Missing keys fall back to the engine defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    snap_to_grid: bool,
    grid_step: f64,
    viewport_width: f64,
    viewport_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            grid_step: DEFAULT_GRID_STEP,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl LayoutConfig {
    /// Converts the configuration into engine options.
    ///
    /// Values are not validated here; see [`LayoutOptions::validate`].
    pub fn to_options(&self) -> LayoutOptions {
        LayoutOptions::new()
            .with_snap_to_grid(self.snap_to_grid)
            .with_grid_step(self.grid_step)
            .with_viewport(Size::new(self.viewport_width, self.viewport_height))
    }
}

/// Options for a single layout computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    snap_to_grid: bool,
    grid_step: f64,
    viewport: Size,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            grid_step: DEFAULT_GRID_STEP,
            viewport: Size::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
        }
    }
}

impl LayoutOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables snapping final coordinates to the grid.
    pub fn with_snap_to_grid(mut self, snap_to_grid: bool) -> Self {
        self.snap_to_grid = snap_to_grid;
        self
    }

    /// Sets the grid step.
    pub fn with_grid_step(mut self, grid_step: f64) -> Self {
        self.grid_step = grid_step;
        self
    }

    /// Sets the viewport the drawing is normalized into.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    /// Returns whether coordinates are snapped to the grid.
    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    /// Returns the configured grid step.
    pub fn grid_step(&self) -> f64 {
        self.grid_step
    }

    /// Returns the viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Grid step the engine actually uses.
    ///
    /// Falls back to [`DEFAULT_GRID_STEP`] when the configured step is not a
    /// positive finite number, so that an unvalidated record cannot stall the
    /// engine.
    pub fn effective_grid_step(&self) -> f64 {
        if self.grid_step.is_finite() && self.grid_step > 0.0 {
            self.grid_step
        } else {
            DEFAULT_GRID_STEP
        }
    }

    /// Region every placed node is clamped into.
    pub fn placement_bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), self.viewport).shrink(VIEWPORT_MARGIN)
    }

    /// Snaps (when enabled) and clamps a point into the placement bounds.
    pub fn normalize_point(&self, point: Point) -> Point {
        let point = if self.snap_to_grid {
            point.snap(self.effective_grid_step())
        } else {
            point
        };
        point.clamp_within(self.placement_bounds())
    }

    /// Checks that the options describe a usable layout space.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGridStep`] for a non-positive or
    /// non-finite grid step and [`ConfigError::InvalidViewport`] when the
    /// viewport is not larger than twice the [`VIEWPORT_MARGIN`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_step.is_finite() && self.grid_step > 0.0) {
            return Err(ConfigError::InvalidGridStep(self.grid_step));
        }

        let width = self.viewport.width();
        let height = self.viewport.height();
        let minimum = 2.0 * VIEWPORT_MARGIN;
        if !(width.is_finite() && height.is_finite() && width > minimum && height > minimum) {
            return Err(ConfigError::InvalidViewport { width, height });
        }

        Ok(())
    }
}
