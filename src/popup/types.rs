// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for the popup keyboard layout engine.
//!
//! This module defines the layout request handed in by the caller, the column
//! ordering modes, and the error type shared by every popup operation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::app_settings;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Error type for popup layout operations.
///
/// Follows the same context-field pattern as the configuration errors: every
/// variant carries enough information to explain what went wrong, and layout
/// failures include a suggestion for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupLayoutError {
    /// The requested columns cannot fit on the keyboard surface.
    InvalidLayout {
        /// Description of the problem
        message: String,
        /// Number of columns the popup needs
        requested_columns: usize,
        /// Number of columns available on both sides of the parent key
        available_columns: usize,
        /// Optional suggestion for fixing the request
        suggestion: Option<String>,
    },

    /// A per-key query was made with an index outside the popup.
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of keys in the popup
        key_count: usize,
    },

    /// Placement was given a different number of key contents than planned.
    ContentMismatch {
        /// Number of keys the plan was built for
        expected: usize,
        /// Number of content items supplied
        actual: usize,
    },
}

impl PopupLayoutError {
    /// Creates an error for a popup that does not fit beside the parent key.
    pub fn insufficient_space(requested_columns: usize, available_columns: usize) -> Self {
        Self::InvalidLayout {
            message: "Keyboard is too small to hold the popup keys".into(),
            requested_columns,
            available_columns,
            suggestion: Some(format!(
                "Reduce max_columns to {} or less, or move the popup",
                available_columns
            )),
        }
    }

    /// Creates an error for a request whose geometry cannot be laid out at all.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidLayout {
            message: message.into(),
            requested_columns: 0,
            available_columns: 0,
            suggestion: None,
        }
    }

    /// Creates an out-of-range error for a key index query.
    pub fn index_out_of_range(index: usize, key_count: usize) -> Self {
        Self::IndexOutOfRange { index, key_count }
    }

    /// Returns `true` if this is an `InvalidLayout` error.
    pub fn is_invalid_layout(&self) -> bool {
        matches!(self, Self::InvalidLayout { .. })
    }
}

impl fmt::Display for PopupLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopupLayoutError::InvalidLayout {
                message,
                requested_columns,
                available_columns,
                suggestion,
            } => {
                write!(f, "Invalid popup layout: {}", message)?;
                if *requested_columns > 0 {
                    write!(
                        f,
                        " (requested columns: {}, available: {})",
                        requested_columns, available_columns
                    )?;
                }
                if let Some(hint) = suggestion {
                    write!(f, "\n  Suggestion: {}", hint)?;
                }
            }
            PopupLayoutError::IndexOutOfRange { index, key_count } => {
                write!(
                    f,
                    "Popup key index {} out of range (popup has {} keys)",
                    index, key_count
                )?;
            }
            PopupLayoutError::ContentMismatch { expected, actual } => {
                write!(
                    f,
                    "Popup was planned for {} keys but {} were supplied",
                    expected, actual
                )?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for PopupLayoutError {}

// ============================================================================
// Request Types
// ============================================================================

/// How popup keys are distributed across the columns of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnOrder {
    /// Fan out from the anchor column, alternating right and left.
    #[default]
    Automatic,
    /// Keep keys in reading order, left to right.
    Fixed,
}

/// Input to the layout engine: how many popup keys and where they must fit.
///
/// All lengths share the coordinate space of the parent keyboard surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// Number of popup keys to place.
    pub key_count: usize,
    /// Hard cap on columns per row.
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,
    /// Width of every popup key.
    pub key_width: f32,
    /// Height of every popup key.
    pub key_height: f32,
    /// X coordinate of the parent key's center.
    pub parent_key_center_x: f32,
    /// Total usable width of the keyboard surface.
    pub keyboard_width: f32,
    /// Column distribution mode.
    #[serde(default)]
    pub column_order: ColumnOrder,
}

fn default_max_columns() -> usize {
    app_settings::DEFAULT_MAX_COLUMNS
}

impl LayoutRequest {
    /// Creates a request with the default (automatic) column order.
    pub fn new(
        key_count: usize,
        max_columns: usize,
        key_width: f32,
        key_height: f32,
        parent_key_center_x: f32,
        keyboard_width: f32,
    ) -> Self {
        Self {
            key_count,
            max_columns,
            key_width,
            key_height,
            parent_key_center_x,
            keyboard_width,
            column_order: ColumnOrder::Automatic,
        }
    }

    /// Sets the column order.
    pub fn with_column_order(mut self, column_order: ColumnOrder) -> Self {
        self.column_order = column_order;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_space_display() {
        let err = PopupLayoutError::insufficient_space(6, 5);
        let text = err.to_string();

        assert!(text.contains("too small"), "got: {}", text);
        assert!(text.contains("requested columns: 6, available: 5"));
        assert!(text.contains("Suggestion: Reduce max_columns to 5"));
        assert!(err.is_invalid_layout());
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = PopupLayoutError::index_out_of_range(9, 9);
        assert_eq!(
            err.to_string(),
            "Popup key index 9 out of range (popup has 9 keys)"
        );
        assert!(!err.is_invalid_layout());
    }

    /// Test: Requests deserialize with defaults for optional fields
    #[test]
    fn test_request_deserialize_defaults() {
        let json = r#"{
            "key_count": 3,
            "key_width": 10.0,
            "key_height": 12.0,
            "parent_key_center_x": 50.0,
            "keyboard_width": 100.0
        }"#;

        let request: LayoutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.key_count, 3);
        assert_eq!(request.max_columns, app_settings::DEFAULT_MAX_COLUMNS);
        assert_eq!(request.column_order, ColumnOrder::Automatic);
    }

    #[test]
    fn test_column_order_lowercase() {
        let order: ColumnOrder = serde_json::from_str(r#""fixed""#).unwrap();
        assert_eq!(order, ColumnOrder::Fixed);
        assert_eq!(
            serde_json::to_string(&ColumnOrder::Automatic).unwrap(),
            r#""automatic""#
        );
    }
}
