//! Core types for Trattoria.
//!
//! This module provides type-safe wrappers for catalog IDs, prices and menu
//! records.

pub mod id;
pub mod menu;
pub mod price;

pub use id::MenuItemId;
pub use menu::MenuItem;
pub use price::{CurrencyCode, Price};
