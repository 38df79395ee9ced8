//! Core types for Showcase.
//!
//! This module provides type-safe wrappers for common catalog concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use category::{Category, CategoryFilter};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::StockStatus;
