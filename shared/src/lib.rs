//! Shared domain types for the StockTag workspace
//!
//! Types that cross crate boundaries live here:
//! - [`models`] - asset records, print jobs, label sizes, suggestions
//! - [`util`] - small helpers (timestamps)

pub mod models;
pub mod util;
