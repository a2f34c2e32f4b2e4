//! Custom column types

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// How a custom column's cells are typed and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnType {
    /// Free text
    #[default]
    Text,
    /// Plain number
    Number,
    /// Number shown as money
    Currency,
    /// Computed per line from a formula; never stored
    Formula,
}

impl ColumnType {
    /// Lower-case name used by the editor
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Currency => "currency",
            ColumnType::Formula => "formula",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ColumnType::Text),
            "number" => Ok(ColumnType::Number),
            "currency" => Ok(ColumnType::Currency),
            "formula" => Ok(ColumnType::Formula),
            _ => Err(Error::UnknownColumnType(s.to_string())),
        }
    }
}

/// A user-declared column on an order
///
/// The name is both the header shown in the editor and the key that
/// formulas use to reference the column (`{Name}`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomColumn {
    /// Column name, unique per order ignoring case
    pub name: String,
    /// Column type
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub column_type: ColumnType,
    /// Formula text, only for [`ColumnType::Formula`]
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub formula: Option<String>,
}

impl CustomColumn {
    /// Create a column. A formula given for a non-formula type is dropped.
    pub fn new(name: impl Into<String>, column_type: ColumnType, formula: Option<&str>) -> Self {
        let formula = match column_type {
            ColumnType::Formula => formula.map(str::to_string),
            _ => None,
        };
        Self {
            name: name.into(),
            column_type,
            formula,
        }
    }

    /// Create a text column
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text, None)
    }

    /// Create a formula column
    pub fn formula(name: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Formula,
            formula: Some(formula.into()),
        }
    }

    /// Formula text, or an empty string when there is none
    pub fn formula_text(&self) -> &str {
        self.formula.as_deref().unwrap_or("")
    }

    /// Check if values in this column are computed
    pub fn is_formula(&self) -> bool {
        self.column_type == ColumnType::Formula
    }

    /// Check if values in this column are entered as numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self.column_type, ColumnType::Number | ColumnType::Currency)
    }

    /// Check if this column has the given name, ignoring case
    pub fn is_named(&self, name: &str) -> bool {
        same_name(&self.name, name)
    }
}

/// Case-insensitive column name comparison
pub fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
