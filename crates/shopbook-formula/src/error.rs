//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Reasons a formula did not produce a number
///
/// [`crate::evaluate`] folds all of these into `0`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula text is empty
    #[error("Formula is empty")]
    EmptyFormula,

    /// Substituted expression contains something other than arithmetic
    #[error("Expression contains disallowed characters: '{0}'")]
    DisallowedCharacters(String),

    /// Arithmetic syntax error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parentheses or signs nested too deeply
    #[error("Expression nested deeper than {0} levels")]
    TooDeep(usize),

    /// Result is infinite or NaN
    #[error("Result is not a finite number: {0}")]
    NonFinite(f64),
}
