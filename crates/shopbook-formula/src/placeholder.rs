//! Placeholder extraction and substitution
//!
//! A placeholder is `{` followed by one or more characters other than `}`,
//! then `}`. The text between the braces, trimmed, is the lookup key, so
//! `{ Custom Rate }` and `{Custom Rate}` reference the same field.

use crate::row::{render_number, resolve, RowFields};
use ahash::AHashSet;
use lazy_regex::{regex, regex_is_match};

/// One placeholder occurrence in a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Full token including braces, e.g. `{ Width }`
    pub token: &'a str,
    /// Trimmed key, e.g. `Width`
    pub key: &'a str,
}

/// All placeholders in order of appearance, duplicates included
pub fn placeholders(formula: &str) -> Vec<Placeholder<'_>> {
    regex!(r"\{[^}]+\}")
        .find_iter(formula)
        .map(|m| {
            let token = m.as_str();
            Placeholder {
                token,
                key: token[1..token.len() - 1].trim(),
            }
        })
        .collect()
}

/// Distinct keys referenced by a formula, in order of first appearance
pub fn references(formula: &str) -> Vec<String> {
    let mut seen = AHashSet::new();
    placeholders(formula)
        .into_iter()
        .filter(|p| seen.insert(p.key))
        .map(|p| p.key.to_string())
        .collect()
}

/// Replace every placeholder with the row's value for its key
///
/// Placeholders are handled one at a time in order of appearance, each
/// replacing every occurrence of its exact token text in the expression
/// built so far.
pub fn substitute<R: RowFields + ?Sized>(formula: &str, row: &R) -> String {
    let mut expression = formula.to_string();
    for placeholder in placeholders(formula) {
        let value = resolve(row, placeholder.key);
        expression = expression.replace(placeholder.token, &render_number(value));
    }
    expression
}

/// Check that an expression holds only digits, `+ - * / ( ) .` and whitespace
///
/// An empty string does not pass.
pub fn is_allowed_expression(expression: &str) -> bool {
    regex_is_match!(r"^[-0-9+*/().\s]+$", expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholders() {
        let found = placeholders("{quantity} * { Custom Rate } + {quantity}");
        let keys: Vec<&str> = found.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec!["quantity", "Custom Rate", "quantity"]);
        assert_eq!(found[1].token, "{ Custom Rate }");
    }

    #[test]
    fn test_placeholders_malformed() {
        assert!(placeholders("{}").is_empty());
        assert!(placeholders("2 + 2").is_empty());
        assert!(placeholders("{open").is_empty());

        // An opening brace inside a placeholder is part of the key
        let found = placeholders("{{a}}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "{a");
    }

    #[test]
    fn test_references_are_distinct() {
        assert_eq!(
            references("{rate} * {quantity} - {rate}"),
            vec!["rate".to_string(), "quantity".to_string()]
        );
    }

    #[test]
    fn test_substitute() {
        let row = Row::new()
            .with_fixed("quantity", 5.0)
            .with_custom("Custom Rate", "2.5");

        assert_eq!(substitute("{quantity} * {Custom Rate}", &row), "5 * 2.5");
        assert_eq!(substitute("{ quantity }+{quantity}", &row), "5+5");
        assert_eq!(substitute("{missing} + 10", &row), "0 + 10");
        assert_eq!(substitute("2 + 2", &row), "2 + 2");
    }

    #[test]
    fn test_substitute_handles_tokens_in_order() {
        // The first token also rewrites the tail of the second, leaving a stray brace
        let row = Row::new().with_custom("ab", "5");
        assert_eq!(substitute("{ab} + {z{ab}", &row), "5 + {z5");
    }

    #[test]
    fn test_substitute_negative_values() {
        let row = Row::new().with_custom("discount", "-2");
        assert_eq!(substitute("10 - {discount}", &row), "10 - -2");
    }

    #[test]
    fn test_allowed_expression() {
        assert!(is_allowed_expression("1 + 2.5 * (3 - 4) / 5"));
        assert!(is_allowed_expression("  \t\n"));
        assert!(!is_allowed_expression(""));
        assert!(!is_allowed_expression("1; alert(1)"));
        assert!(!is_allowed_expression("2 ^ 3"));
        assert!(!is_allowed_expression("{x}"));
        assert!(!is_allowed_expression("Infinity"));
        assert!(!is_allowed_expression("1e5"));
    }
}
