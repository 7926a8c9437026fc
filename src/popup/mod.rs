// SPDX-License-Identifier: GPL-3.0-only

//! Popup ("more keys") keyboard layout.
//!
//! When a key with alternate characters is long-pressed, a small grid of popup
//! keys opens above it. This module decides how that grid is shaped and where
//! each key goes, given the room available on either side of the parent key.
//!
//! # Features
//!
//! - **Column split**: chooses columns, rows, and how many columns sit left and
//!   right of the anchor key, capping each side at the space available and
//!   moving the shortfall to the other side
//! - **Column assignment**: fans keys out from the anchor (automatic order) or
//!   keeps them in reading order (fixed order)
//! - **Top row centering**: flags partially filled top rows that need a half
//!   column shift
//! - **Placement**: pixel rectangles, dividers, and edge flags for every key
//! - **Caching**: thread-safe reuse of computed layouts
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use morekeys::popup::{LayoutParameters, LayoutRequest, PlacementOptions, place_keys};
//!
//! // Nine accented variants of 'e', parent key centered on a 100px keyboard
//! let request = LayoutRequest::new(9, 5, 10.0, 10.0, 50.0, 100.0);
//! let params = LayoutParameters::new(request)?;
//!
//! assert_eq!(params.num_columns(), 5);
//! assert_eq!(params.num_rows(), 2);
//! assert_eq!(params.column_of(1)?, 1);
//!
//! let labels = ["e", "é", "è", "ê", "ë", "ē", "ė", "ę", "ě"];
//! let popup = place_keys(&params, &PlacementOptions::default(), labels)?;
//! println!("Popup opens at x={} ({}x{})", popup.origin_x, popup.width, popup.height);
//! ```
//!
//! ## Error Handling
//!
//! Construction fails with `PopupLayoutError::InvalidLayout` when the popup
//! cannot fit beside the parent key. The caller should shrink `max_columns`,
//! move the popup, or not show it.
//!
//! ```rust,ignore
//! match LayoutParameters::new(request) {
//!     Ok(params) => show_popup(params),
//!     Err(PopupLayoutError::InvalidLayout { suggestion, .. }) => {
//!         tracing::warn!("Popup does not fit: {:?}", suggestion);
//!     }
//!     Err(e) => tracing::error!("Popup layout failed: {}", e),
//! }
//! ```

// Sub-modules
pub mod cache;
pub mod params;
pub mod placement;
pub mod types;

// Re-export public API - Error and request types
pub use types::{ColumnOrder, LayoutRequest, PopupLayoutError};

// Re-export public API - Layout engine
pub use params::LayoutParameters;

// Re-export public API - Placement
pub use placement::{
    place_keys, EdgeFlags, PlacedKey, PlacementOptions, PopupKeyboard, Rectangle,
};

// Re-export public API - Caching
pub use cache::PlanCache;

// ============================================================================
// Public API Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_COLUMNS: usize = 5;
    const WIDTH: f32 = 10.0;
    const HEIGHT: f32 = 10.0;

    fn layout(key_count: usize, x: f32, keyboard_width: f32) -> LayoutParameters {
        LayoutParameters::new(LayoutRequest::new(
            key_count,
            MAX_COLUMNS,
            WIDTH,
            HEIGHT,
            x,
            keyboard_width,
        ))
        .unwrap()
    }

    fn columns(params: &LayoutParameters) -> Vec<i32> {
        (0..params.key_count())
            .map(|n| params.column_of(n).unwrap())
            .collect()
    }

    /// Test: A single key is its own anchor
    #[test]
    fn test_single_key_symmetric() {
        let params = layout(1, 50.0, 100.0);
        assert_eq!(params.num_columns(), 1);
        assert_eq!(params.num_rows(), 1);
        assert_eq!(params.left_keys(), 0);
        assert_eq!(params.right_keys(), 1);
        assert_eq!(params.column_of(0), Ok(0));
        assert!(!params.top_row_needs_centering());
        assert_eq!(params.default_key_coord_x(), 0.0);
    }

    /// Test: Nine keys with room on both sides
    #[test]
    fn test_nine_keys_symmetric() {
        let params = layout(9, 50.0, 100.0);
        assert_eq!(params.num_columns(), 5);
        assert_eq!(params.num_rows(), 2);
        assert_eq!(params.left_keys(), 2);
        assert_eq!(params.right_keys(), 3);
        assert_eq!(columns(&params), vec![0, 1, -1, 2, -2, 0, 1, -1, 2]);
        assert!(params.top_row_needs_centering());
        assert_eq!(params.default_key_coord_x(), 20.0);
    }

    /// Test: Parent key on the left edge
    #[test]
    fn test_nine_keys_no_left_space() {
        let params = layout(9, 0.0, 100.0);
        assert_eq!(params.left_keys(), 0);
        assert_eq!(params.right_keys(), 5);
        assert_eq!(columns(&params), vec![0, 1, 2, 3, 4, 0, 1, 2, 3]);
        assert!(params.top_row_needs_centering());
        assert_eq!(params.default_key_coord_x(), 0.0);
    }

    /// Test: Parent key one cell from the right edge
    #[test]
    fn test_nine_keys_no_right_space() {
        let params = layout(9, 90.0, 100.0);
        assert_eq!(params.left_keys(), 4);
        assert_eq!(params.right_keys(), 1);
        assert_eq!(columns(&params), vec![0, -1, -2, -3, -4, 0, -1, -2, -3]);
        assert_eq!(params.default_key_coord_x(), 40.0);
    }

    /// Test: Six columns on a five-cell keyboard
    #[test]
    fn test_too_small_keyboard() {
        let result = LayoutParameters::new(LayoutRequest::new(10, 6, WIDTH, HEIGHT, 20.0, 50.0));
        assert!(matches!(
            result,
            Err(PopupLayoutError::InvalidLayout {
                requested_columns: 6,
                available_columns: 5,
                ..
            })
        ));
    }

    /// Test: A single key in the top row is already centered
    #[test]
    fn test_six_keys_symmetric() {
        let params = layout(6, 50.0, 100.0);
        assert_eq!(columns(&params), vec![0, 1, -1, 2, -2, 0]);
        assert!(!params.top_row_needs_centering());
    }

    /// Test: Up to max_columns keys fit in a single row
    #[test]
    fn test_single_row_up_to_max_columns() {
        for key_count in 1..=MAX_COLUMNS {
            let params = layout(key_count, 50.0, 100.0);
            assert_eq!(params.num_columns(), key_count);
            assert_eq!(params.num_rows(), 1);
            assert_eq!(params.left_keys() + params.right_keys(), key_count);
        }
    }

    /// Test: Layout, cache, and placement agree end to end
    #[test]
    fn test_cached_layout_places_keys() {
        let cache = PlanCache::default();
        let request = LayoutRequest::new(9, MAX_COLUMNS, WIDTH, HEIGHT, 50.0, 100.0);
        let params = cache.get_or_compute(&request).unwrap();

        let labels = ["e", "é", "è", "ê", "ë", "ē", "ė", "ę", "ě"];
        let popup = place_keys(&params, &PlacementOptions::default(), labels).unwrap();

        assert_eq!(popup.keys[0].content, "e");
        assert_eq!(popup.keys[0].bounds.x, params.default_key_coord_x());
        assert_eq!(popup.origin_x + popup.default_coord_x, 50.0);
    }
}
