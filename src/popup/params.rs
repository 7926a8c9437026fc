// SPDX-License-Identifier: GPL-3.0-only

//! Layout parameters for a popup keyboard.
//!
//! [`LayoutParameters`] turns a [`LayoutRequest`] into the numbers every later
//! step needs: how many columns and rows the popup uses, how many columns sit
//! on each side of the anchor (default) key, which relative column each key
//! occupies, and whether the partially filled top row needs re-centering.
//!
//! # Column split
//!
//! The anchor column always counts toward the right side. Ideally the right
//! side gets `num_columns / 2 + 1` columns and the left side the rest. When the
//! parent key sits near an edge of the keyboard, the short side is capped at the
//! whole key cells available there and its deficit moves to the other side.
//!
//! # Column assignment
//!
//! In automatic order each row fans out from the anchor: odd positions prefer
//! the right side, even positions prefer the left side, and a side whose budget
//! is used up hands the position to the other side. Every row restarts the fan
//! out with the same budgets.
//!
//! ```text
//! 9 keys, 5 columns, parent key centered:
//!
//!     [9] [7] [6] [8]        top row (4 keys, needs centering)
//! [5] [3] [1] [2] [4]        row 0, [1] is the anchor
//! ```

use serde::Serialize;

use crate::popup::types::{ColumnOrder, LayoutRequest, PopupLayoutError};

/// Derived layout numbers for one popup keyboard.
///
/// Computed once per request and read-only afterwards. The column of every key
/// is precomputed, so [`column_of`](Self::column_of) is a plain lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutParameters {
    #[serde(skip)]
    request: LayoutRequest,
    num_columns: usize,
    num_rows: usize,
    left_keys: usize,
    right_keys: usize,
    top_row_count: usize,
    top_row_needs_centering: bool,
    default_key_coord_x: f32,
    columns: Vec<i32>,
}

impl LayoutParameters {
    /// Computes the layout for a popup keyboard.
    ///
    /// # Errors
    ///
    /// Returns [`PopupLayoutError::InvalidLayout`] when the popup needs more
    /// columns than fit on both sides of the parent key, or when the request
    /// has no keys, no columns, or a non-positive key or keyboard width.
    pub fn new(request: LayoutRequest) -> Result<Self, PopupLayoutError> {
        validate_request(&request)?;

        let num_columns = request.max_columns.min(request.key_count);
        let num_rows = request.key_count.div_ceil(num_columns);

        let left_space = whole_cells(request.parent_key_center_x, request.key_width);
        let right_space = whole_cells(
            request.keyboard_width - request.parent_key_center_x,
            request.key_width,
        );
        let available_columns = left_space.saturating_add(right_space);
        if available_columns < num_columns {
            tracing::warn!(
                "Popup with {} columns does not fit beside parent key at x={} ({} + {} cells)",
                num_columns,
                request.parent_key_center_x,
                left_space,
                right_space
            );
            return Err(PopupLayoutError::insufficient_space(
                num_columns,
                available_columns,
            ));
        }

        let (left_keys, right_keys) = split_columns(num_columns, left_space, right_space)?;

        let top_row_count = request.key_count - num_columns * (num_rows - 1);
        let top_row_needs_centering =
            num_rows > 1 && top_row_count < num_columns && top_row_count % 2 == 0;

        let columns = match request.column_order {
            ColumnOrder::Automatic => {
                let row = fan_out_row(num_columns, left_keys, right_keys);
                (0..request.key_count).map(|n| row[n % num_columns]).collect()
            }
            ColumnOrder::Fixed => (0..request.key_count)
                .map(|n| {
                    let col = n % num_columns;
                    if num_rows > 1 && n / num_columns == num_rows - 1 {
                        fixed_top_row_column(col, top_row_count, left_keys, right_keys)
                    } else {
                        col as i32 - left_keys as i32
                    }
                })
                .collect(),
        };

        tracing::debug!(
            "Computed popup layout: {} keys in {} columns x {} rows (left {}, right {}, {:?})",
            request.key_count,
            num_columns,
            num_rows,
            left_keys,
            right_keys,
            request.column_order
        );

        Ok(Self {
            request,
            num_columns,
            num_rows,
            left_keys,
            right_keys,
            top_row_count,
            top_row_needs_centering,
            default_key_coord_x: left_keys as f32 * request.key_width,
            columns,
        })
    }

    /// Returns the request this layout was computed from.
    pub fn request(&self) -> &LayoutRequest {
        &self.request
    }

    /// Returns the number of popup keys.
    pub fn key_count(&self) -> usize {
        self.request.key_count
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns strictly left of the anchor column.
    pub fn left_keys(&self) -> usize {
        self.left_keys
    }

    /// Returns the number of columns at or right of the anchor column.
    pub fn right_keys(&self) -> usize {
        self.right_keys
    }

    /// Returns the number of keys in the outermost row.
    pub fn top_row_count(&self) -> usize {
        self.top_row_count
    }

    /// Returns `true` if the partially filled top row needs visual re-centering.
    pub fn top_row_needs_centering(&self) -> bool {
        self.top_row_needs_centering
    }

    /// Returns the X offset of the anchor key from the left edge of the popup.
    pub fn default_key_coord_x(&self) -> f32 {
        self.default_key_coord_x
    }

    /// Returns the relative column of a key (0 is the anchor column, negative
    /// is left of it).
    ///
    /// # Errors
    ///
    /// Returns [`PopupLayoutError::IndexOutOfRange`] if `index` is not a key
    /// of this popup.
    pub fn column_of(&self, index: usize) -> Result<i32, PopupLayoutError> {
        self.columns
            .get(index)
            .copied()
            .ok_or_else(|| PopupLayoutError::index_out_of_range(index, self.key_count()))
    }

    /// Returns the row of a key, 0 being the row nearest the parent key.
    pub fn row_of(&self, index: usize) -> Result<usize, PopupLayoutError> {
        if index >= self.key_count() {
            return Err(PopupLayoutError::index_out_of_range(index, self.key_count()));
        }
        Ok(index / self.num_columns)
    }

    /// Returns the relative columns of all keys in placement order.
    pub fn columns(&self) -> &[i32] {
        &self.columns
    }

    /// Returns `true` if `row` is the outermost row of a multi-row popup.
    pub fn is_top_row(&self, row: usize) -> bool {
        self.num_rows > 1 && row == self.num_rows - 1
    }

    /// Returns the horizontal shift, in columns, that centers the top row.
    ///
    /// Zero unless [`top_row_needs_centering`](Self::top_row_needs_centering).
    /// The shift moves the midpoint of the top row's span toward the anchor
    /// column without pushing any key past the popup's outer columns.
    pub fn top_row_offset(&self) -> f32 {
        if !self.top_row_needs_centering {
            return 0.0;
        }

        let start = (self.num_rows - 1) * self.num_columns;
        let top_row = &self.columns[start..];
        let (Some(min), Some(max)) = (
            top_row.iter().copied().min(),
            top_row.iter().copied().max(),
        ) else {
            return 0.0;
        };

        let lowest = (-(self.left_keys as i32) - min) as f32;
        let highest = (self.right_keys as i32 - 1 - max) as f32;
        (-(min + max) as f32 / 2.0).clamp(lowest, highest)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Rejects requests the column arithmetic is undefined for.
fn validate_request(request: &LayoutRequest) -> Result<(), PopupLayoutError> {
    if request.key_count == 0 {
        return Err(PopupLayoutError::invalid_request("Popup has no keys"));
    }
    if request.max_columns == 0 {
        return Err(PopupLayoutError::invalid_request(
            "Maximum column count must be at least 1",
        ));
    }
    if !request.key_width.is_finite() || request.key_width <= 0.0 {
        return Err(PopupLayoutError::invalid_request(format!(
            "Key width must be positive, got {}",
            request.key_width
        )));
    }
    if !request.keyboard_width.is_finite() || request.keyboard_width <= 0.0 {
        return Err(PopupLayoutError::invalid_request(format!(
            "Keyboard width must be positive, got {}",
            request.keyboard_width
        )));
    }
    if !request.parent_key_center_x.is_finite() {
        return Err(PopupLayoutError::invalid_request(
            "Parent key position must be finite",
        ));
    }
    Ok(())
}

/// Number of whole key cells that fit in `length`; negative lengths hold none.
fn whole_cells(length: f32, key_width: f32) -> usize {
    let cells = (length / key_width).floor();
    if cells <= 0.0 { 0 } else { cells as usize }
}

/// Splits `num_columns` into (left, right) budgets around the anchor column.
///
/// The right budget includes the anchor column and is never below 1.
fn split_columns(
    num_columns: usize,
    left_space: usize,
    right_space: usize,
) -> Result<(usize, usize), PopupLayoutError> {
    let ideal_right = num_columns / 2 + 1;
    let ideal_left = num_columns - ideal_right;
    let right_cap = right_space.max(1);

    let (left_keys, right_keys) = if ideal_left > left_space {
        (left_space, num_columns - left_space)
    } else if ideal_right > right_cap {
        (num_columns - right_cap, right_cap)
    } else {
        (ideal_left, ideal_right)
    };

    // Both sides short at once would mean the capacity check let it through.
    if left_keys > left_space || right_keys > right_cap || left_keys + right_keys != num_columns {
        return Err(PopupLayoutError::insufficient_space(
            num_columns,
            left_space.saturating_add(right_space),
        ));
    }

    Ok((left_keys, right_keys))
}

/// Relative columns for one row in automatic order.
fn fan_out_row(num_columns: usize, left_keys: usize, right_keys: usize) -> Vec<i32> {
    let mut row = Vec::with_capacity(num_columns);
    row.push(0);

    let mut next_right = 1;
    let mut next_left = 1;
    for position in 1..num_columns {
        let take_right = if position % 2 == 1 {
            next_right < right_keys
        } else {
            next_left > left_keys
        };

        if take_right {
            row.push(next_right as i32);
            next_right += 1;
        } else {
            row.push(-(next_left as i32));
            next_left += 1;
        }
    }

    row
}

/// Relative column for a top-row key in fixed order.
///
/// The top row is centered on the anchor (extra key on the right for even
/// counts), then shifted as a whole to stay inside the popup's columns.
fn fixed_top_row_column(
    col: usize,
    top_row_count: usize,
    left_keys: usize,
    right_keys: usize,
) -> i32 {
    let lead = ((top_row_count - 1) / 2) as i32;
    let first = -lead;
    let last = top_row_count as i32 - 1 - lead;
    let rightmost = right_keys as i32 - 1;
    let leftmost = -(left_keys as i32);

    let shift = if last > rightmost {
        rightmost - last
    } else if first < leftmost {
        leftmost - first
    } else {
        0
    };

    col as i32 - lead + shift
}

// ============================================================================
// Tests
// ============================================================================
