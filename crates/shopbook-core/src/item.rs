//! Order line items

use crate::value::FieldValue;
use ahash::AHashMap;

/// A single line of an order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OrderItem {
    /// Part number
    pub part_no: String,
    /// Description
    pub description: String,
    /// Quantity ordered
    pub quantity: f64,
    /// Unit rate
    pub rate: f64,
    /// Supplier the part is bought from
    pub purchased_from: String,
    /// Free-form notes
    pub notes: String,
    /// Values for the order's custom columns, keyed by column name
    #[cfg_attr(feature = "serde", serde(default))]
    pub custom_fields: AHashMap<String, FieldValue>,
}

impl OrderItem {
    /// Create a blank line: quantity 1, rate 0
    pub fn new(purchased_from: impl Into<String>) -> Self {
        Self {
            part_no: String::new(),
            description: String::new(),
            quantity: 1.0,
            rate: 0.0,
            purchased_from: purchased_from.into(),
            notes: String::new(),
            custom_fields: AHashMap::new(),
        }
    }

    /// Set the part number
    pub fn with_part_no(mut self, part_no: impl Into<String>) -> Self {
        self.part_no = part_no.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the quantity
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the rate
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set a custom field
    pub fn with_custom_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.custom_fields.insert(name.into(), value.into());
        self
    }

    /// Line amount (quantity × rate)
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }

    /// Look up a fixed numeric field by its editor name
    ///
    /// Only `quantity` and `rate` are numeric; the match is exact.
    pub fn fixed_number(&self, key: &str) -> Option<f64> {
        match key {
            "quantity" => Some(self.quantity),
            "rate" => Some(self.rate),
            _ => None,
        }
    }

    /// Get a custom field value
    pub fn custom_field(&self, name: &str) -> Option<&FieldValue> {
        self.custom_fields.get(name)
    }

    /// Set a custom field value, returning the previous one
    pub fn set_custom_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.custom_fields.insert(name.into(), value.into())
    }
}

impl Default for OrderItem {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let item = OrderItem::new("AutoTech Inc.");
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.rate, 0.0);
        assert_eq!(item.purchased_from, "AutoTech Inc.");
        assert!(item.custom_fields.is_empty());
    }

    #[test]
    fn test_amount() {
        let item = OrderItem::default().with_quantity(10.0).with_rate(8.5);
        assert_eq!(item.amount(), 85.0);
    }

    #[test]
    fn test_fixed_number_only_for_numeric_fields() {
        let item = OrderItem::default()
            .with_part_no("AT-001")
            .with_quantity(5.0)
            .with_rate(2.0);

        assert_eq!(item.fixed_number("quantity"), Some(5.0));
        assert_eq!(item.fixed_number("rate"), Some(2.0));
        assert_eq!(item.fixed_number("Quantity"), None);
        assert_eq!(item.fixed_number("partNo"), None);
        assert_eq!(item.fixed_number("notes"), None);
    }

    #[test]
    fn test_custom_fields() {
        let mut item = OrderItem::default().with_custom_field("Width", "3");
        assert_eq!(item.custom_field("Width"), Some(&FieldValue::from("3")));

        let previous = item.set_custom_field("Width", 4.0);
        assert_eq!(previous, Some(FieldValue::from("3")));
        assert_eq!(item.custom_field("Width"), Some(&FieldValue::Number(4.0)));
        assert_eq!(item.custom_field("width"), None);
    }
}
