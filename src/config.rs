// SPDX-License-Identifier: GPL-3.0-only

//! Popup keyboard configuration.
//!
//! Settings are stored as JSON. Every field is optional; missing fields take
//! their defaults. Loading is permissive: out-of-range values are replaced by
//! their defaults and reported as warnings instead of failing the load.
//!
//! ```json
//! {
//!     "max_columns": 5,
//!     "column_order": "automatic",
//!     "divider_ratio": 0.2,
//!     "vertical_gap": 2.0,
//!     "top_padding": 4.0,
//!     "bottom_padding": 4.0
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::app_settings;
use crate::popup::{ColumnOrder, PlacementOptions};

// ============================================================================
// Error Handling Types
// ============================================================================

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error occurred while reading the config file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file path being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },
}

impl ConfigError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
            suggestion: Some("Check that the file exists and you have read permissions".into()),
        }
    }

    /// Creates a JSON parsing error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = source.line().into();
        Self::JsonError {
            source,
            file_path: None,
            line_number,
            suggestion: Some("Check the JSON syntax at the indicated line".into()),
        }
    }

    /// Creates a JSON parsing error with file path.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        match Self::json_error(source) {
            Self::JsonError {
                source,
                line_number,
                suggestion,
                ..
            } => Self::JsonError {
                source,
                file_path: Some(file_path.into()),
                line_number,
                suggestion,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError {
                source,
                file_path,
                suggestion,
            } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            ConfigError::JsonError {
                source,
                file_path,
                line_number,
                suggestion,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::JsonError { source, .. } => Some(source),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Popup keyboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Configuration format version.
    pub version: u64,
    /// Maximum number of popup key columns.
    pub max_columns: usize,
    /// Column distribution mode.
    pub column_order: ColumnOrder,
    /// Divider width as a fraction of key width, 0.0 for no dividers.
    pub divider_ratio: f32,
    /// Vertical gap between popup rows in pixels.
    pub vertical_gap: f32,
    /// Padding above the top row in pixels.
    pub top_padding: f32,
    /// Padding below the bottom row in pixels.
    pub bottom_padding: f32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            version: app_settings::CONFIG_VERSION,
            max_columns: app_settings::DEFAULT_MAX_COLUMNS,
            column_order: ColumnOrder::Automatic,
            divider_ratio: 0.0,
            vertical_gap: 0.0,
            top_padding: 0.0,
            bottom_padding: 0.0,
        }
    }
}

impl PopupConfig {
    /// Derives placement options for popup keys of the given width.
    pub fn placement_options(&self, key_width: f32) -> PlacementOptions {
        PlacementOptions {
            divider_width: (key_width * self.divider_ratio).floor(),
            vertical_gap: self.vertical_gap,
            top_padding: self.top_padding,
            bottom_padding: self.bottom_padding,
        }
    }

    /// Replaces out-of-range values with defaults, returning a warning for each.
    fn sanitize(&mut self) -> Vec<String> {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        if self.max_columns == 0 {
            warnings.push("max_columns must be at least 1, using default".to_string());
            self.max_columns = defaults.max_columns;
        }
        if !(0.0..1.0).contains(&self.divider_ratio) {
            warnings.push(format!(
                "divider_ratio {} outside [0, 1), disabling dividers",
                self.divider_ratio
            ));
            self.divider_ratio = defaults.divider_ratio;
        }
        for (name, value) in [
            ("vertical_gap", &mut self.vertical_gap),
            ("top_padding", &mut self.top_padding),
            ("bottom_padding", &mut self.bottom_padding),
        ] {
            if !value.is_finite() || *value < 0.0 {
                warnings.push(format!("{} must be a non-negative number, using 0", name));
                *value = 0.0;
            }
        }
        if self.version != app_settings::CONFIG_VERSION {
            warnings.push(format!(
                "Unknown config version {}, expected {}",
                self.version,
                app_settings::CONFIG_VERSION
            ));
        }

        warnings
    }
}

/// A loaded configuration together with the non-fatal issues found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: PopupConfig,
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Returns `true` if any warnings were collected while loading.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Loads the popup configuration from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<LoadedConfig, ConfigError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();

    let json = fs::read_to_string(path)
        .map_err(|e| ConfigError::io_error_with_path(e, display_path.clone()))?;
    let config: PopupConfig = serde_json::from_str(&json)
        .map_err(|e| ConfigError::json_error_with_path(e, display_path.clone()))?;

    tracing::info!("Loaded popup config from {}", display_path);
    Ok(finish_loading(config))
}

/// Parses the popup configuration from a JSON string.
pub fn config_from_string(json: &str) -> Result<LoadedConfig, ConfigError> {
    let config: PopupConfig = serde_json::from_str(json).map_err(ConfigError::json_error)?;
    Ok(finish_loading(config))
}

fn finish_loading(mut config: PopupConfig) -> LoadedConfig {
    let warnings = config.sanitize();
    for warning in &warnings {
        tracing::warn!("Popup config: {}", warning);
    }
    LoadedConfig { config, warnings }
}

// ============================================================================
// Tests
// ============================================================================
