//! # shopbook-core
//!
//! Core data structures for the shopbook order manager.
//!
//! This crate provides the types the rest of shopbook operates on:
//! - [`Order`] - A purchase order with its line items and custom columns
//! - [`OrderItem`] - A line item with fixed fields and a custom field map
//! - [`CustomColumn`] and [`ColumnType`] - User-declared extra columns
//! - [`FieldValue`] - The text-or-number value stored in a custom field
//!
//! ## Example
//!
//! ```rust
//! use shopbook_core::{ColumnType, Order};
//!
//! let mut order = Order::new("AutoTech Inc.");
//! order.add_column("Size", ColumnType::Text, None).unwrap();
//!
//! assert_eq!(order.items()[0].custom_field("Size").unwrap().to_string(), "");
//!
//! order.remove_column("Size");
//! assert!(order.items()[0].custom_field("Size").is_none());
//! ```

pub mod column;
pub mod error;
pub mod item;
pub mod money;
pub mod order;
pub mod value;

// Re-exports for convenience
pub use column::{ColumnType, CustomColumn};
pub use error::{Error, Result, ValidationError};
pub use item::OrderItem;
pub use money::{format_currency, format_fixed};
pub use order::{Order, OrderStatus};
pub use value::FieldValue;

/// Currency symbol used by [`format_currency`]
pub const CURRENCY_SYMBOL: &str = "\u{20b9}";
