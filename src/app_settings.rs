// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Configuration format version.
pub const CONFIG_VERSION: u64 = 1;

/// Default maximum number of popup key columns.
pub const DEFAULT_MAX_COLUMNS: usize = 5;

/// Maximum number of layouts held by the default plan cache.
pub const PLAN_CACHE_CAPACITY: usize = 256;

/// Default log directive for the command-line front end.
pub const DEFAULT_LOG_DIRECTIVE: &str = "morekeys=info";
