// SPDX-License-Identifier: GPL-3.0-only

//! MoreKeys - popup keyboard layout for soft keyboards
//!
//! This crate computes the layout of the popup ("more keys") keyboard that
//! opens when a key with alternate characters is long-pressed on a soft
//! keyboard.
//!
//! # Architecture
//!
//! The crate consists of a library and a small command-line front end:
//!
//! 1. **Library** (`morekeys`): a pure layout engine. Given the number of popup
//!    keys and the geometry around the parent key, it decides columns, rows,
//!    the column of every key, and where the popup opens.
//!
//! 2. **CLI** (`morekeys` binary): reads a layout request as JSON and prints the
//!    placed popup keyboard, for inspecting layouts outside a running keyboard.
//!
//! # Modules
//!
//! - `popup`: Layout engine, pixel placement, and layout cache
//! - `app_settings`: Centralized application constants
//! - `config`: Popup settings loaded from JSON

pub mod app_settings;
pub mod config;
pub mod popup;

pub use crate::popup::{LayoutParameters, LayoutRequest, PopupLayoutError};
