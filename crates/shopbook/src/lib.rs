//! # shopbook
//!
//! Order management for a parts shop: purchase orders with user-defined
//! custom columns, some of which compute their value from a formula.
//!
//! ## Features
//!
//! - Orders with line items and a custom column registry
//! - Formula columns such as `{quantity} * {Custom Rate}`, evaluated per line
//! - Order totals and editor cell rendering
//!
//! ## Example
//!
//! ```rust
//! use shopbook::prelude::*;
//!
//! let mut order = Order::new("AutoTech Inc.");
//! order.add_column("Width", ColumnType::Number, None).unwrap();
//! order
//!     .add_column("Area", ColumnType::Formula, Some("{quantity} * {Width}"))
//!     .unwrap();
//!
//! order.item_mut(0).unwrap().quantity = 3.0;
//! order.set_custom_field(0, "Width", "2.5").unwrap();
//!
//! let calc = order.calculate();
//! assert_eq!(calc.lines[0].formula("Area"), Some(7.5));
//!
//! let area = order.column("Area").unwrap();
//! assert_eq!(render_cell(area, &order.items()[0]), "7.50");
//! ```

pub mod calculation;
pub mod display;
pub mod prelude;

// Re-export calculation types
pub use calculation::{
    CalculationOptions, CalculationStats, LineValues, OrderCalculation, OrderCalculationExt,
};
pub use display::{parse_number_strict, render_cell};

// Re-export core types
pub use shopbook_core::{
    format_currency, format_fixed, ColumnType, CustomColumn, Error, FieldValue, Order, OrderItem,
    OrderStatus, Result, ValidationError, CURRENCY_SYMBOL,
};

// Re-export formula types
pub use shopbook_formula::{
    evaluate, parse_expression, references, try_evaluate, EvaluationOptions, Formula,
    FormulaError, FormulaResult, Row, RowFields,
};
