//! Thai Orchid Core - Shared types library.
//!
//! This crate provides common types used across the Thai Orchid components:
//! - `storefront` - Menu, cart and checkout session service
//! - `integration-tests` - End-to-end checkout flow tests
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no timers,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, checkout statuses, and the
//!   phone/card values collected during checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
