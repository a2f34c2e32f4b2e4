//! Orders and the custom column registry
//!
//! An order owns its custom columns and its line items. The two are kept in
//! step: every item carries exactly one custom field entry per declared
//! column, which [`Order::add_column`], [`Order::remove_column`] and the item
//! operations maintain.

use crate::column::{ColumnType, CustomColumn};
use crate::error::{Error, Result, ValidationError};
use crate::item::OrderItem;
use crate::value::FieldValue;
use chrono::{Local, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

/// Order workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStatus {
    #[default]
    Pending,
    Packed,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in workflow order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

/// A purchase order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", from = "OrderRecord"))]
pub struct Order {
    /// Order identifier (`ORD-<millis>`)
    pub order_id: String,
    /// Supplier the order is addressed to
    pub order_to: String,
    /// Order date
    pub order_date: NaiveDate,
    /// Note printed under the items
    pub footer_note: String,
    /// Workflow status
    pub status: OrderStatus,
    items: Vec<OrderItem>,
    custom_columns: Vec<CustomColumn>,
}

/// Deserialized form of [`Order`], before the column invariants are applied
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    order_id: String,
    order_to: String,
    order_date: NaiveDate,
    #[serde(default)]
    footer_note: String,
    #[serde(default)]
    status: OrderStatus,
    #[serde(default)]
    items: Vec<OrderItem>,
    #[serde(default)]
    custom_columns: Vec<CustomColumn>,
}

#[cfg(feature = "serde")]
impl From<OrderRecord> for Order {
    /// Blank and duplicate column names are dropped, and every item is
    /// fitted to the remaining columns. An order without items gets one.
    fn from(record: OrderRecord) -> Self {
        let mut order = Order {
            order_id: record.order_id,
            order_to: record.order_to,
            order_date: record.order_date,
            footer_note: record.footer_note,
            status: record.status,
            items: Vec::new(),
            custom_columns: Vec::new(),
        };

        for column in record.custom_columns {
            let name = column.name.trim().to_string();
            if name.is_empty() || order.column(&name).is_some() {
                tracing::warn!(column = %column.name, "dropping invalid custom column");
                continue;
            }
            order.custom_columns.push(CustomColumn { name, ..column });
        }
        for item in record.items {
            order.push_item(item);
        }
        if order.items.is_empty() {
            order.add_item();
        }

        order
    }
}

impl Order {
    /// Create a new pending order dated today with one blank line
    pub fn new(order_to: impl Into<String>) -> Self {
        let order_to = order_to.into();
        Self {
            order_id: format!("ORD-{}", Utc::now().timestamp_millis()),
            order_date: Local::now().date_naive(),
            items: vec![OrderItem::new(order_to.clone())],
            order_to,
            footer_note: String::new(),
            status: OrderStatus::Pending,
            custom_columns: Vec::new(),
        }
    }

    /// Set the order id
    pub fn with_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = order_id.into();
        self
    }

    /// Set the order date
    pub fn with_date(mut self, order_date: NaiveDate) -> Self {
        self.order_date = order_date;
        self
    }

    // === Custom columns ===

    /// Declared custom columns, in display order
    pub fn columns(&self) -> &[CustomColumn] {
        &self.custom_columns
    }

    /// Find a custom column by name, ignoring case
    pub fn column(&self, name: &str) -> Option<&CustomColumn> {
        self.custom_columns.iter().find(|c| c.is_named(name))
    }

    /// Iterate over formula columns
    pub fn formula_columns(&self) -> impl Iterator<Item = &CustomColumn> {
        self.custom_columns.iter().filter(|c| c.is_formula())
    }

    /// Declare a new custom column
    ///
    /// The name is trimmed. Fails if it is blank or already declared
    /// (ignoring case); the order is unchanged on failure. On success every
    /// existing item gets an empty entry for the new column.
    pub fn add_column(
        &mut self,
        name: &str,
        column_type: ColumnType,
        formula: Option<&str>,
    ) -> Result<&CustomColumn> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyColumnName.into());
        }
        if self.column(name).is_some() {
            return Err(ValidationError::DuplicateColumnName(name.to_string()).into());
        }

        for item in &mut self.items {
            item.custom_fields.insert(name.to_string(), FieldValue::empty());
        }
        self.custom_columns.push(CustomColumn::new(name, column_type, formula));
        tracing::debug!(column = name, %column_type, "custom column added");

        let index = self.custom_columns.len() - 1;
        Ok(&self.custom_columns[index])
    }

    /// Remove a custom column by exact name
    ///
    /// Also deletes the column's entry from every item. Returns `None` and
    /// leaves the order unchanged if no column has that name.
    pub fn remove_column(&mut self, name: &str) -> Option<CustomColumn> {
        let index = self.custom_columns.iter().position(|c| c.name == name)?;
        let removed = self.custom_columns.remove(index);
        for item in &mut self.items {
            item.custom_fields.remove(name);
        }
        tracing::debug!(column = name, "custom column removed");
        Some(removed)
    }

    // === Items ===

    /// Line items, in display order
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Get a line item for editing
    pub fn item_mut(&mut self, index: usize) -> Option<&mut OrderItem> {
        self.items.get_mut(index)
    }

    /// Append a blank line supplied by the order's supplier
    pub fn add_item(&mut self) -> &mut OrderItem {
        let item = OrderItem::new(self.order_to.clone());
        self.push_item(item)
    }

    /// Append an item, fitting its custom fields to the declared columns
    ///
    /// Missing entries are added empty; entries for undeclared names are
    /// dropped.
    pub fn push_item(&mut self, mut item: OrderItem) -> &mut OrderItem {
        let columns = &self.custom_columns;
        item.custom_fields.retain(|name, _| columns.iter().any(|c| &c.name == name));
        for column in columns {
            item.custom_fields
                .entry(column.name.clone())
                .or_insert_with(FieldValue::empty);
        }
        self.items.push(item);
        let index = self.items.len() - 1;
        &mut self.items[index]
    }

    /// Remove a line item. An order always keeps at least one.
    pub fn remove_item(&mut self, index: usize) -> Result<OrderItem> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::ItemOutOfBounds { index, len });
        }
        if len <= 1 {
            return Err(ValidationError::LastItem.into());
        }
        Ok(self.items.remove(index))
    }

    /// Set a custom field on one item
    ///
    /// The column must be declared on this order. Formula columns are
    /// computed, so writing to them is allowed but has no effect on display.
    pub fn set_custom_field(
        &mut self,
        index: usize,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<()> {
        let len = self.items.len();
        let column = self
            .custom_columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        let item = self
            .items
            .get_mut(index)
            .ok_or(Error::ItemOutOfBounds { index, len })?;
        item.set_custom_field(column.name.clone(), value);
        Ok(())
    }

    // === Totals ===

    /// Sum of line amounts
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(OrderItem::amount).sum()
    }

    /// Order total. No tax or discount is applied, so this equals the subtotal.
    pub fn total(&self) -> f64 {
        self.subtotal()
    }
}
