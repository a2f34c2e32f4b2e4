//! Formula evaluator
//!
//! Evaluation runs in four steps: substitute placeholders, check the result
//! is plain arithmetic, parse it, and compute it. The character check runs
//! after substitution so that neither field names nor field values can add
//! anything but arithmetic to the expression.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::parser::{parse_expression_with_depth, DEFAULT_MAX_DEPTH};
use crate::placeholder::{is_allowed_expression, references, substitute};
use crate::row::RowFields;
use shopbook_core::CustomColumn;

/// Options for formula evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Maximum expression tree height: parentheses, unary signs and chained
    /// binary operators all count (default: 256)
    pub max_depth: usize,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Evaluate a formula against a row, falling back to `0` on any failure
///
/// A result of `0` does not tell a computed zero apart from a rejected
/// formula; use [`try_evaluate`] when that matters.
///
/// Runs of signs are read as one binary operator followed by unary signs,
/// so `5--2` is `7` and `5++2` is `7`. This keeps `{a} - {b}` meaningful
/// when `b` holds a negative number; there is no increment or decrement
/// operator that would make these a syntax error.
pub fn evaluate<R: RowFields + ?Sized>(formula: &str, row: &R) -> f64 {
    evaluate_with_options(formula, row, &EvaluationOptions::default())
}

/// Evaluate a formula with custom options, falling back to `0`
pub fn evaluate_with_options<R: RowFields + ?Sized>(
    formula: &str,
    row: &R,
    options: &EvaluationOptions,
) -> f64 {
    match try_evaluate_with_options(formula, row, options) {
        Ok(value) => value,
        Err(FormulaError::EmptyFormula) => 0.0,
        Err(e) => {
            tracing::debug!(formula, error = %e, "formula evaluation failed, using 0");
            0.0
        }
    }
}

/// Evaluate a formula against a row, reporting why it failed
pub fn try_evaluate<R: RowFields + ?Sized>(formula: &str, row: &R) -> FormulaResult<f64> {
    try_evaluate_with_options(formula, row, &EvaluationOptions::default())
}

/// Evaluate a formula with custom options, reporting why it failed
pub fn try_evaluate_with_options<R: RowFields + ?Sized>(
    formula: &str,
    row: &R,
    options: &EvaluationOptions,
) -> FormulaResult<f64> {
    if formula.is_empty() {
        return Err(FormulaError::EmptyFormula);
    }

    let expression = substitute(formula, row);
    if !is_allowed_expression(&expression) {
        return Err(FormulaError::DisallowedCharacters(expression));
    }

    let ast = parse_expression_with_depth(&expression, options.max_depth)?;
    let value = evaluate_expr(&ast);
    if !value.is_finite() {
        return Err(FormulaError::NonFinite(value));
    }

    Ok(value)
}

/// Compute a parsed expression
///
/// Plain IEEE arithmetic: dividing by zero yields an infinity or NaN rather
/// than an error.
pub fn evaluate_expr(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(n) => *n,

        Expr::BinaryOp { op, left, right } => {
            let l = evaluate_expr(left);
            let r = evaluate_expr(right);
            match op {
                BinaryOperator::Add => l + r,
                BinaryOperator::Subtract => l - r,
                BinaryOperator::Multiply => l * r,
                BinaryOperator::Divide => l / r,
            }
        }

        Expr::UnaryOp { op, operand } => {
            let n = evaluate_expr(operand);
            match op {
                UnaryOperator::Negate => -n,
                UnaryOperator::Plus => n,
            }
        }
    }
}

/// A formula bound to its evaluation options
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    text: String,
    options: EvaluationOptions,
}

impl Formula {
    /// Create a formula with default options
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: EvaluationOptions::default(),
        }
    }

    /// Formula of a custom column, if it is a formula column
    pub fn from_column(column: &CustomColumn) -> Option<Self> {
        column
            .is_formula()
            .then(|| Self::new(column.formula_text()))
    }

    /// Set evaluation options
    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    /// Formula text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Keys this formula references
    pub fn references(&self) -> Vec<String> {
        references(&self.text)
    }

    /// Evaluate against a row, falling back to `0`
    pub fn evaluate<R: RowFields + ?Sized>(&self, row: &R) -> f64 {
        evaluate_with_options(&self.text, row, &self.options)
    }

    /// Evaluate against a row, reporting failures
    pub fn try_evaluate<R: RowFields + ?Sized>(&self, row: &R) -> FormulaResult<f64> {
        try_evaluate_with_options(&self.text, row, &self.options)
    }
}
