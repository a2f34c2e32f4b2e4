//! Order calculation
//!
//! Computes every formula cell of an order along with line amounts and
//! totals. Formula cells never fail: a formula that cannot be evaluated
//! contributes `0` and is counted in [`CalculationStats::fallbacks`].
//!
//! # Example
//!
//! ```rust
//! use shopbook::prelude::*;
//!
//! let mut order = Order::new("AutoTech Inc.");
//! order
//!     .add_column("Broken", ColumnType::Formula, Some("{quantity} +"))
//!     .unwrap();
//!
//! let calc = order.calculate();
//! assert_eq!(calc.lines[0].formula("Broken"), Some(0.0));
//! assert_eq!(calc.stats.fallbacks, 1);
//! ```

use crate::{EvaluationOptions, Formula, FormulaError, Order};

/// Options for order calculation
#[derive(Debug, Clone, Default)]
pub struct CalculationOptions {
    /// Options passed to every formula evaluation
    pub evaluation: EvaluationOptions,
}

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Number of formula cells evaluated
    pub formula_cells: usize,
    /// Number of formula cells that fell back to 0
    pub fallbacks: usize,
}

/// Computed values for one line item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineValues {
    /// Quantity × rate
    pub amount: f64,
    /// Formula column values in column order
    pub formulas: Vec<(String, f64)>,
}

impl LineValues {
    /// Value of a formula column by exact name
    pub fn formula(&self, name: &str) -> Option<f64> {
        self.formulas
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }
}

/// Result of calculating an order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderCalculation {
    /// One entry per line item, in item order
    pub lines: Vec<LineValues>,
    /// Sum of line amounts
    pub subtotal: f64,
    /// Order total
    pub total: f64,
    /// Run statistics
    pub stats: CalculationStats,
}

/// Extension trait for Order to add calculation methods
pub trait OrderCalculationExt {
    /// Calculate the order with default options
    fn calculate(&self) -> OrderCalculation;

    /// Calculate the order with custom options
    fn calculate_with_options(&self, options: &CalculationOptions) -> OrderCalculation;
}

impl OrderCalculationExt for Order {
    fn calculate(&self) -> OrderCalculation {
        self.calculate_with_options(&CalculationOptions::default())
    }

    fn calculate_with_options(&self, options: &CalculationOptions) -> OrderCalculation {
        let formulas: Vec<(&str, Formula)> = self
            .formula_columns()
            .filter_map(|column| {
                Formula::from_column(column)
                    .map(|f| (column.name.as_str(), f.with_options(options.evaluation)))
            })
            .collect();

        let mut stats = CalculationStats::default();
        let mut lines = Vec::with_capacity(self.items().len());

        for (row, item) in self.items().iter().enumerate() {
            let mut values = Vec::with_capacity(formulas.len());
            for (name, formula) in &formulas {
                stats.formula_cells += 1;
                let value = match formula.try_evaluate(item) {
                    Ok(value) => value,
                    Err(FormulaError::EmptyFormula) => 0.0,
                    Err(e) => {
                        tracing::warn!(
                            order = %self.order_id,
                            row,
                            column = name,
                            formula = formula.text(),
                            error = %e,
                            "formula fell back to 0"
                        );
                        stats.fallbacks += 1;
                        0.0
                    }
                };
                values.push((name.to_string(), value));
            }
            lines.push(LineValues {
                amount: item.amount(),
                formulas: values,
            });
        }

        tracing::debug!(
            order = %self.order_id,
            formula_cells = stats.formula_cells,
            fallbacks = stats.fallbacks,
            "order calculated"
        );

        OrderCalculation {
            lines,
            subtotal: self.subtotal(),
            total: self.total(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnType, OrderItem};
    use pretty_assertions::assert_eq;

    fn order() -> Order {
        let mut order = Order::new("AutoTech Inc.").with_id("ORD-1");
        order.item_mut(0).unwrap().quantity = 10.0;
        order.item_mut(0).unwrap().rate = 15.0;
        order.push_item(OrderItem::new("AutoTech Inc.").with_quantity(5.0).with_rate(8.5));
        order
    }

    #[test]
    fn test_calculate_without_columns() {
        let calc = order().calculate();
        assert_eq!(calc.lines.len(), 2);
        assert_eq!(calc.lines[0].amount, 150.0);
        assert_eq!(calc.lines[1].amount, 42.5);
        assert!(calc.lines[0].formulas.is_empty());
        assert_eq!(calc.subtotal, 192.5);
        assert_eq!(calc.total, 192.5);
        assert_eq!(calc.stats, CalculationStats::default());
    }

    #[test]
    fn test_calculate_formula_columns() {
        let mut order = order();
        order.add_column("Width", ColumnType::Number, None).unwrap();
        order
            .add_column("Area", ColumnType::Formula, Some("{quantity} * {Width}"))
            .unwrap();
        order
            .add_column("Double", ColumnType::Formula, Some("{rate} * 2"))
            .unwrap();
        order.set_custom_field(0, "Width", "3").unwrap();

        let calc = order.calculate();
        assert_eq!(
            calc.lines[0].formulas,
            vec![("Area".to_string(), 30.0), ("Double".to_string(), 30.0)]
        );
        // Width is still empty on the second line
        assert_eq!(calc.lines[1].formula("Area"), Some(0.0));
        assert_eq!(calc.lines[1].formula("Double"), Some(17.0));
        assert_eq!(calc.stats.formula_cells, 4);
        assert_eq!(calc.stats.fallbacks, 0);
    }

    #[test]
    fn test_formula_columns_do_not_change_totals() {
        let mut order = order();
        order
            .add_column("Bonus", ColumnType::Formula, Some("1000"))
            .unwrap();
        assert_eq!(order.calculate().total, 192.5);
    }

    #[test]
    fn test_calculate_counts_fallbacks() {
        let mut order = order();
        order
            .add_column("Ratio", ColumnType::Formula, Some("{rate} / 0"))
            .unwrap();
        order.add_column("Blank", ColumnType::Formula, Some("")).unwrap();

        let calc = order.calculate();
        assert_eq!(calc.lines[0].formula("Ratio"), Some(0.0));
        assert_eq!(calc.lines[0].formula("Blank"), Some(0.0));
        // Empty formulas are 0 by definition, not a fallback
        assert_eq!(calc.stats.formula_cells, 4);
        assert_eq!(calc.stats.fallbacks, 2);
    }

    #[test]
    fn test_calculate_with_options() {
        let mut order = order();
        order
            .add_column("Nested", ColumnType::Formula, Some("(({quantity}))"))
            .unwrap();

        let calc = order.calculate();
        assert_eq!(calc.lines[0].formula("Nested"), Some(10.0));

        let options = CalculationOptions {
            evaluation: EvaluationOptions { max_depth: 1 },
        };
        let calc = order.calculate_with_options(&options);
        assert_eq!(calc.lines[0].formula("Nested"), Some(0.0));
        assert_eq!(calc.stats.fallbacks, 2);
    }
}
