//! # shopbook-formula
//!
//! Formula engine for shopbook's custom columns.
//!
//! A formula column holds text such as `{quantity} * {Custom Rate}`. For
//! each order line the engine:
//! - Substitutes every `{key}` placeholder with the line's value for `key`
//! - Rejects the result unless it is plain arithmetic
//! - Parses and evaluates it (`+ - * /`, parentheses, unary signs)
//!
//! [`evaluate`] never fails: every problem yields `0`. [`try_evaluate`]
//! reports what went wrong instead.
//!
//! ## Example
//!
//! ```rust
//! use shopbook_core::OrderItem;
//! use shopbook_formula::evaluate;
//!
//! let item = OrderItem::default()
//!     .with_quantity(4.0)
//!     .with_custom_field("Custom Rate", "2.5");
//!
//! assert_eq!(evaluate("{quantity} * {Custom Rate}", &item), 10.0);
//! assert_eq!(evaluate("{quantity} / 0", &item), 0.0);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod placeholder;
pub mod row;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{
    evaluate, evaluate_expr, evaluate_with_options, try_evaluate, try_evaluate_with_options,
    EvaluationOptions, Formula,
};
pub use parser::{parse_expression, parse_expression_with_depth, DEFAULT_MAX_DEPTH};
pub use placeholder::{is_allowed_expression, placeholders, references, substitute, Placeholder};
pub use row::{coerce, parse_float_prefix, render_number, resolve, Row, RowFields};
