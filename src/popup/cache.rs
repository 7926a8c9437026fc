// SPDX-License-Identifier: GPL-3.0-only

//! Shared cache of computed popup layouts.
//!
//! Long-pressing the same key repeatedly produces the same [`LayoutRequest`]
//! every time. [`PlanCache`] keeps the computed [`LayoutParameters`] behind an
//! `Arc` so repeated lookups skip the computation. The cache is read-mostly and
//! can be shared between threads.
//!
//! Failed layouts are never cached. When the cache reaches its capacity it is
//! cleared wholesale; plans are cheap to recompute.

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::app_settings;
use crate::popup::params::LayoutParameters;
use crate::popup::types::{ColumnOrder, LayoutRequest, PopupLayoutError};

/// Cache key: the full request with floats compared by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PlanKey {
    key_count: usize,
    max_columns: usize,
    key_width: u32,
    key_height: u32,
    parent_key_center_x: u32,
    keyboard_width: u32,
    column_order: ColumnOrder,
}

impl From<&LayoutRequest> for PlanKey {
    fn from(request: &LayoutRequest) -> Self {
        Self {
            key_count: request.key_count,
            max_columns: request.max_columns,
            key_width: request.key_width.to_bits(),
            key_height: request.key_height.to_bits(),
            parent_key_center_x: request.parent_key_center_x.to_bits(),
            keyboard_width: request.keyboard_width.to_bits(),
            column_order: request.column_order,
        }
    }
}

/// Thread-safe cache of popup layouts keyed by request.
#[derive(Debug)]
pub struct PlanCache {
    plans: RwLock<FxHashMap<PlanKey, Arc<LayoutParameters>>>,
    capacity: usize,
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(app_settings::PLAN_CACHE_CAPACITY)
    }
}

impl PlanCache {
    /// Creates an empty cache holding at most `capacity` plans.
    pub fn new(capacity: usize) -> Self {
        Self {
            plans: RwLock::new(FxHashMap::default()),
            capacity: capacity.max(1),
        }
    }

    /// Returns the cached layout for `request`, computing it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`LayoutParameters::new`]; nothing is cached
    /// in that case.
    pub fn get_or_compute(
        &self,
        request: &LayoutRequest,
    ) -> Result<Arc<LayoutParameters>, PopupLayoutError> {
        let key = PlanKey::from(request);

        if let Some(plan) = self
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::trace!("Popup layout cache hit for {} keys", request.key_count);
            return Ok(Arc::clone(plan));
        }

        let plan = Arc::new(LayoutParameters::new(*request)?);

        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        if plans.len() >= self.capacity && !plans.contains_key(&key) {
            tracing::debug!("Popup layout cache full ({} plans), clearing", plans.len());
            plans.clear();
        }
        // Another thread may have inserted the same plan meanwhile; keep theirs.
        let plan = plans.entry(key).or_insert(plan);
        Ok(Arc::clone(plan))
    }

    /// Returns the number of cached plans.
    pub fn len(&self) -> usize {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no plans are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached plan.
    pub fn clear(&self) {
        self.plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
