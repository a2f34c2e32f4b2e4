//! Prelude module - common imports for shopbook users
//!
//! ```rust
//! use shopbook::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculationOptions,
    CalculationStats,
    // Column types
    ColumnType,
    CustomColumn,

    // Error types
    Error,
    FieldValue,
    // Formula types
    EvaluationOptions,
    Formula,
    FormulaError,
    // Main types
    Order,
    OrderCalculation,
    // Extension traits
    OrderCalculationExt,
    OrderItem,
    OrderStatus,
    Result,
    Row,
    ValidationError,
};

pub use crate::display::{parse_number_strict, render_cell};
pub use crate::{evaluate, format_currency, format_fixed, try_evaluate};
