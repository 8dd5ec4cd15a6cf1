//! Trattoria Core - Shared domain library.
//!
//! This crate provides the state shared by the Trattoria components:
//! - `site` - Axum server rendering the menu and the page-session cart
//! - `web` - Browser client driving scroll effects and overlays
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no HTTP
//! clients, no DOM access. Time is passed in explicitly, so everything here
//! runs the same natively and on `wasm32`.
//!
//! # Modules
//!
//! - [`types`] - Catalog IDs, prices and menu records
//! - [`cart`] - Cart store with id-keyed lines and derived totals
//! - [`scroll`] - Scroll offset to header/back-to-top/nav/parallax state
//! - [`debounce`] - Leading/trailing rate limiter driven by explicit instants
//! - [`counter`] - Count-up schedule for the stats section
//! - [`toggle`] - Cart panel and mobile nav overlays with scroll locking

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod counter;
pub mod debounce;
pub mod scroll;
pub mod toggle;
pub mod types;

pub use cart::{Cart, CartAction, CartError, CartLineItem, CartTotals};
pub use types::*;
