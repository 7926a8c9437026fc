// SPDX-License-Identifier: GPL-3.0-only

//! Pixel placement for popup keyboards.
//!
//! This module converts the relative columns and rows computed by
//! [`LayoutParameters`] into absolute rectangles inside the popup, plus the
//! optional dividers drawn between keys.
//!
//! # Usage
//!
//! When a long press is detected on a key that has popup keys:
//!
//! 1. Compute the layout with `LayoutParameters::new()`
//! 2. Attach the key contents with `place_keys()`
//! 3. Show the popup at `origin_x` on the parent keyboard
//!
//! Row 0 is the row nearest the parent key and is drawn at the bottom of the
//! popup. The anchor key sits `left_keys` columns in from the popup's left edge.

use serde::{Deserialize, Serialize};

use crate::popup::params::LayoutParameters;
use crate::popup::types::PopupLayoutError;

// ============================================================================
// Geometry Types
// ============================================================================

/// A simple rectangle for bounds calculations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rectangle {
    /// Creates a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the center X coordinate.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Returns the center Y coordinate.
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Spacing applied around and between popup keys, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementOptions {
    /// Width of the divider between adjacent keys, zero for no dividers.
    pub divider_width: f32,
    /// Vertical gap between rows; not added below the bottom row.
    pub vertical_gap: f32,
    /// Padding above the top row.
    pub top_padding: f32,
    /// Padding below the bottom row.
    pub bottom_padding: f32,
}

/// Which outer edges of the popup a key touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EdgeFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// A popup key with its final position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedKey<T> {
    /// Index of the key in placement order.
    pub index: usize,
    /// Row of the key, 0 being nearest the parent key.
    pub row: usize,
    /// Column relative to the anchor key.
    pub column: i32,
    /// Bounds inside the popup.
    pub bounds: Rectangle,
    /// Outer edges touched by this key.
    pub edges: EdgeFlags,
    /// Caller-supplied key content (label, code, icon, ...).
    pub content: T,
}

/// A fully placed popup keyboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupKeyboard<T> {
    /// Keys in placement order.
    pub keys: Vec<PlacedKey<T>>,
    /// Divider rectangles, empty when dividers are disabled.
    pub dividers: Vec<Rectangle>,
    /// Total popup width.
    pub width: f32,
    /// Total popup height, including padding.
    pub height: f32,
    /// X coordinate of the anchor key's center inside the popup.
    pub default_coord_x: f32,
    /// X coordinate of the popup's left edge on the parent keyboard.
    pub origin_x: f32,
    pub num_columns: usize,
    pub num_rows: usize,
}

impl<T> PopupKeyboard<T> {
    /// Returns the anchor (default) key.
    pub fn default_key(&self) -> Option<&PlacedKey<T>> {
        self.keys.first()
    }

    /// Returns the popup bounds on the parent keyboard.
    pub fn bounds_in_parent(&self) -> Rectangle {
        Rectangle::new(self.origin_x, 0.0, self.width, self.height)
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Places one content item per popup key.
///
/// `contents` must yield exactly `params.key_count()` items, in the same order
/// the layout was computed for.
///
/// # Errors
///
/// Returns [`PopupLayoutError::ContentMismatch`] if the number of contents
/// differs from the planned key count.
pub fn place_keys<T>(
    params: &LayoutParameters,
    options: &PlacementOptions,
    contents: impl IntoIterator<Item = T>,
) -> Result<PopupKeyboard<T>, PopupLayoutError> {
    let contents: Vec<T> = contents.into_iter().collect();
    if contents.len() != params.key_count() {
        return Err(PopupLayoutError::ContentMismatch {
            expected: params.key_count(),
            actual: contents.len(),
        });
    }

    let request = params.request();
    let key_width = request.key_width;
    let key_height = request.key_height;
    let row_height = key_height + options.vertical_gap;
    let column_width = key_width + options.divider_width;
    let default_x = params.left_keys() as f32 * column_width;
    let top_row_shift = params.top_row_offset() * column_width;
    let leftmost = -(params.left_keys() as i32);
    let rightmost = params.right_keys() as i32 - 1;

    let mut keys = Vec::with_capacity(contents.len());
    let mut dividers = Vec::new();

    for (index, content) in contents.into_iter().enumerate() {
        let column = params.column_of(index)?;
        let row = params.row_of(index)?;

        let mut x = column as f32 * column_width + default_x;
        if params.is_top_row(row) {
            x += top_row_shift;
        }
        let y = (params.num_rows() - 1 - row) as f32 * row_height + options.top_padding;

        if options.divider_width > 0.0 && column != 0 {
            let divider_x = if column > 0 {
                x - options.divider_width
            } else {
                x + key_width
            };
            dividers.push(Rectangle::new(divider_x, y, options.divider_width, key_height));
        }

        keys.push(PlacedKey {
            index,
            row,
            column,
            bounds: Rectangle::new(x, y, key_width, key_height),
            edges: EdgeFlags {
                top: row == params.num_rows() - 1,
                bottom: row == 0,
                left: column == leftmost,
                right: column == rightmost,
            },
            content,
        });
    }

    let default_coord_x = default_x + key_width / 2.0;
    let popup = PopupKeyboard {
        keys,
        dividers,
        width: params.num_columns() as f32 * column_width - options.divider_width,
        height: params.num_rows() as f32 * row_height - options.vertical_gap
            + options.top_padding
            + options.bottom_padding,
        default_coord_x,
        origin_x: request.parent_key_center_x - default_coord_x,
        num_columns: params.num_columns(),
        num_rows: params.num_rows(),
    };

    tracing::debug!(
        "Placed popup keyboard: {} keys, {}x{} px at x={}",
        popup.keys.len(),
        popup.width,
        popup.height,
        popup.origin_x
    );

    Ok(popup)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::types::LayoutRequest;

    fn symmetric(key_count: usize) -> LayoutParameters {
        LayoutParameters::new(LayoutRequest::new(key_count, 5, 10.0, 10.0, 50.0, 100.0)).unwrap()
    }

    fn labels(count: usize) -> Vec<String> {
        (1..=count).map(|n| n.to_string()).collect()
    }

    /// Test: Keys land on their columns, top row is centered
    #[test]
    fn test_place_9_keys() {
        let params = symmetric(9);
        let popup = place_keys(&params, &PlacementOptions::default(), labels(9)).unwrap();

        assert_eq!(popup.keys.len(), 9);
        assert_eq!(popup.width, 50.0);
        assert_eq!(popup.height, 20.0);
        assert_eq!(popup.default_coord_x, 25.0);
        assert_eq!(popup.origin_x, 25.0);
        assert!(popup.dividers.is_empty());

        let anchor = popup.default_key().unwrap();
        assert_eq!(anchor.content, "1");
        assert_eq!(anchor.bounds, Rectangle::new(20.0, 10.0, 10.0, 10.0));

        // Top row is shifted half a column to the left.
        assert_eq!(popup.keys[5].bounds.x, 15.0);
        assert_eq!(popup.keys[5].bounds.y, 0.0);
        assert_eq!(popup.keys[8].bounds.x, 35.0);
    }

    #[test]
    fn test_place_edge_flags() {
        let params = symmetric(9);
        let popup = place_keys(&params, &PlacementOptions::default(), labels(9)).unwrap();

        let anchor = popup.keys[0].edges;
        assert!(anchor.bottom && !anchor.top && !anchor.left && !anchor.right);
        assert!(popup.keys[4].edges.left);
        assert!(popup.keys[3].edges.right);
        assert!(popup.keys[5].edges.top);
    }

    /// Test: Dividers sit on the anchor side of every non-anchor key
    #[test]
    fn test_place_with_dividers() {
        let params = symmetric(3);
        let options = PlacementOptions {
            divider_width: 2.0,
            ..Default::default()
        };
        let popup = place_keys(&params, &options, ["a", "b", "c"]).unwrap();

        assert_eq!(popup.width, 34.0);
        assert_eq!(popup.keys[0].bounds.x, 12.0);
        assert_eq!(popup.keys[1].bounds.x, 24.0);
        assert_eq!(popup.keys[2].bounds.x, 0.0);
        assert_eq!(
            popup.dividers,
            vec![
                Rectangle::new(22.0, 0.0, 2.0, 10.0),
                Rectangle::new(10.0, 0.0, 2.0, 10.0),
            ]
        );
    }

    #[test]
    fn test_place_with_padding() {
        let params = symmetric(6);
        let options = PlacementOptions {
            vertical_gap: 1.0,
            top_padding: 3.0,
            bottom_padding: 4.0,
            ..Default::default()
        };
        let popup = place_keys(&params, &options, labels(6)).unwrap();

        assert_eq!(popup.height, 28.0);
        assert_eq!(popup.keys[0].bounds.y, 14.0);
        assert_eq!(popup.keys[5].bounds.y, 3.0);
        // Single key in the top row needs no centering.
        assert_eq!(popup.keys[5].bounds.x, popup.keys[0].bounds.x);
    }

    /// Test: Rows are spaced by the vertical gap and stay inside the popup
    #[test]
    fn test_place_with_vertical_gap() {
        let params = symmetric(9);
        let options = PlacementOptions {
            vertical_gap: 2.0,
            ..Default::default()
        };
        let popup = place_keys(&params, &options, labels(9)).unwrap();

        assert_eq!(popup.height, 22.0);
        let bottom = &popup.keys[0].bounds;
        assert_eq!(bottom.y, 12.0);
        assert_eq!(bottom.height, 10.0);
        assert!(bottom.y + bottom.height <= popup.height);
        assert_eq!(popup.keys[5].bounds.y, 0.0);
    }

    #[test]
    fn test_place_content_mismatch() {
        let params = symmetric(4);
        let result = place_keys(&params, &PlacementOptions::default(), labels(3));
        assert_eq!(
            result,
            Err(PopupLayoutError::ContentMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_rectangle_center() {
        let rect = Rectangle::new(100.0, 200.0, 50.0, 40.0);
        assert!((rect.center_x() - 125.0).abs() < f32::EPSILON);
        assert!((rect.center_y() - 220.0).abs() < f32::EPSILON);
    }
}
