//! Showcase Core - Shared catalog types.
//!
//! This crate provides the domain types used by every Showcase component:
//! - `storefront` - The catalog page, its live sessions and the product loader
//! - `integration-tests` - End-to-end tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no templates.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, prices, categories and stock

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
