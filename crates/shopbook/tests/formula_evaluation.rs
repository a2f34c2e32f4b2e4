//! Tests for formula evaluation against order lines

use pretty_assertions::assert_eq;
use shopbook::prelude::*;
use shopbook::{references, FormulaResult};

fn eval_with(formula: &str, row: &Row) -> f64 {
    evaluate(formula, row)
}

/// Formulas without placeholders ignore the row
#[test]
fn test_evaluate_constant_formula() {
    let rows = [
        Row::new(),
        Row::new().with_fixed("quantity", 7.0),
        Row::new().with_custom("Width", "abc"),
    ];
    for row in &rows {
        assert_eq!(eval_with("2 + 2", row), 4.0);
    }
}

/// A fixed numeric field wins over a custom field of the same name
#[test]
fn test_evaluate_fixed_field_priority() {
    let item = OrderItem::default()
        .with_quantity(5.0)
        .with_custom_field("quantity", "999");
    assert_eq!(evaluate("{quantity}", &item), 5.0);
}

#[test]
fn test_evaluate_custom_field() {
    let item = OrderItem::default().with_custom_field("Width", "3");
    assert_eq!(evaluate("{Width} * 2", &item), 6.0);
    assert_eq!(evaluate("{ Width } * 2", &item), 6.0);
}

#[test]
fn test_evaluate_missing_key() {
    assert_eq!(evaluate("{nonexistent} + 10", &OrderItem::default()), 10.0);
    assert_eq!(eval_with("{nonexistent} + 10", &Row::new()), 10.0);
}

#[test]
fn test_evaluate_permissive_custom_values() {
    let item = OrderItem::default().with_custom_field("Size", "12cm");
    assert_eq!(evaluate("{Size}", &item), 12.0);

    let item = OrderItem::default().with_custom_field("Size", "cm");
    assert_eq!(evaluate("{Size}", &item), 0.0);
}

#[test]
fn test_evaluate_rejects_injection() {
    let row = Row::new().with_custom("x", "1");
    assert_eq!(eval_with("{x}; alert(1)", &row), 0.0);

    let strict: FormulaResult<f64> = try_evaluate("{x}; alert(1)", &row);
    assert_eq!(
        strict,
        Err(FormulaError::DisallowedCharacters("1; alert(1)".to_string()))
    );
}

#[test]
fn test_evaluate_failures_return_zero() {
    let row = Row::new().with_fixed("quantity", 4.0);
    for formula in ["{quantity} / 0", "0 / 0", "(1 + 2", "1 +* 2", "{}", "{open", ""] {
        assert_eq!(eval_with(formula, &row), 0.0, "formula {:?}", formula);
    }
}

#[test]
fn test_evaluate_rich_formulas() {
    let item = OrderItem::default()
        .with_quantity(4.0)
        .with_rate(12.5)
        .with_custom_field("Custom Rate", "2.5")
        .with_custom_field("Discount", 10.0);

    assert_eq!(evaluate("{quantity} * {Custom Rate}", &item), 10.0);
    assert_eq!(evaluate("({quantity} * {rate}) - {Discount}", &item), 40.0);
    assert_eq!(evaluate("-{rate} + {quantity} * -1", &item), -16.5);
    assert_eq!(evaluate("{rate} / {quantity} / 2", &item), 1.5625);
}

#[test]
fn test_evaluate_negative_substitution() {
    let item = OrderItem::default().with_custom_field("Offset", "-2");
    assert_eq!(evaluate("10 - {Offset}", &item), 12.0);
    assert_eq!(evaluate("10 * {Offset}", &item), -20.0);
}

#[test]
fn test_formula_references() {
    assert_eq!(
        references("{quantity} * { Custom Rate } + {quantity}"),
        vec!["quantity".to_string(), "Custom Rate".to_string()]
    );
}

/// Very long operator chains are rejected instead of exhausting the stack
#[test]
fn test_evaluate_long_chains() {
    let row = Row::new().with_fixed("quantity", 2.0);

    let sum = format!("1{}", "+1".repeat(20_000));
    assert_eq!(eval_with(&sum, &row), 0.0);
    assert!(matches!(
        try_evaluate(&sum, &row),
        Err(FormulaError::TooDeep(_))
    ));

    let placeholders = format!("{{quantity}}{}", " + {quantity}".repeat(2_000));
    assert_eq!(eval_with(&placeholders, &row), 0.0);

    let product = format!("1{}", " * {quantity}".repeat(10));
    assert_eq!(eval_with(&product, &row), 1024.0);
}
