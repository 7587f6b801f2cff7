use chrono::NaiveDateTime;
use processing::{
    table::{Cell, Row},
    value_path::{render_cell, render_optional},
};
use serde_json::Value;

use crate::timestamp::format_order_date;

fn cell(value: &Option<Value>) -> Cell {
    render_optional(value.as_ref())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderRow {
    pub order_id: Option<Value>,
    pub customer_reference: Option<Value>,
    pub order_date: Option<NaiveDateTime>,
    pub total_price: Option<Value>,
    pub currency: Option<Value>,
    pub source: Option<Value>,
}

impl Row for OrderRow {
    const COLUMNS: &'static [&'static str] = &[
        "order_id",
        "customer_reference",
        "order_date",
        "total_price",
        "currency",
        "source",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            cell(&self.order_id),
            cell(&self.customer_reference),
            self.order_date.as_ref().map(format_order_date),
            cell(&self.total_price),
            cell(&self.currency),
            cell(&self.source),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomerRow {
    pub customer_reference: Option<Value>,
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub email: Option<Value>,
}

impl Row for CustomerRow {
    const COLUMNS: &'static [&'static str] =
        &["customer_reference", "first_name", "last_name", "email"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            cell(&self.customer_reference),
            cell(&self.first_name),
            cell(&self.last_name),
            cell(&self.email),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderItemRow {
    pub order_id: Option<Value>,
    pub product_id: Option<Value>,
    pub variant_id: Option<Value>,
    pub sku: Option<Value>,
    pub quantity: Option<Value>,
    pub subtotal: Option<Value>,
    pub total: Option<Value>,
}

impl Row for OrderItemRow {
    const COLUMNS: &'static [&'static str] = &[
        "order_id",
        "product_id",
        "variant_id",
        "sku",
        "quantity",
        "subtotal",
        "total",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            cell(&self.order_id),
            cell(&self.product_id),
            cell(&self.variant_id),
            cell(&self.sku),
            cell(&self.quantity),
            cell(&self.subtotal),
            cell(&self.total),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiscountRow {
    pub order_id: Option<Value>,
    pub discount_code: Option<Value>,
    pub discount_type: Option<Value>,
    pub discount_value: Option<Value>,
}

impl Row for DiscountRow {
    const COLUMNS: &'static [&'static str] =
        &["order_id", "discount_code", "discount_type", "discount_value"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            cell(&self.order_id),
            cell(&self.discount_code),
            cell(&self.discount_type),
            cell(&self.discount_value),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShippingRow {
    pub order_id: Option<Value>,
    pub city: Option<Value>,
    pub country: Option<Value>,
    pub postcode: Option<Value>,
    pub address_line1: Option<Value>,
    pub address_line2: Option<Value>,
}

impl Row for ShippingRow {
    const COLUMNS: &'static [&'static str] = &[
        "order_id",
        "city",
        "country",
        "postcode",
        "address_line1",
        "address_line2",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            cell(&self.order_id),
            cell(&self.city),
            cell(&self.country),
            cell(&self.postcode),
            cell(&self.address_line1),
            cell(&self.address_line2),
        ]
    }
}

/// Renders an order id for log lines, where an absent id still needs a placeholder.
pub fn display_order_id(order_id: &Option<Value>) -> String {
    order_id
        .as_ref()
        .and_then(render_cell)
        .unwrap_or_else(|| "<missing>".to_string())
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn order_cells_follow_column_order() {
        let row = OrderRow {
            order_id: Some(json!("ORD-1")),
            customer_reference: Some(json!("CUST-1")),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(10, 0, 0)),
            total_price: Some(json!(59.5)),
            currency: Some(json!("GBP")),
            source: None,
        };

        assert_eq!(row.cells().len(), OrderRow::COLUMNS.len());
        assert_eq!(
            row.cells(),
            vec![
                Some("ORD-1".to_string()),
                Some("CUST-1".to_string()),
                Some("2024-01-01 10:00:00".to_string()),
                Some("59.5".to_string()),
                Some("GBP".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn every_row_type_has_one_cell_per_column() {
        assert_eq!(CustomerRow::default().cells().len(), CustomerRow::COLUMNS.len());
        assert_eq!(OrderItemRow::default().cells().len(), OrderItemRow::COLUMNS.len());
        assert_eq!(DiscountRow::default().cells().len(), DiscountRow::COLUMNS.len());
        assert_eq!(ShippingRow::default().cells().len(), ShippingRow::COLUMNS.len());
    }

    #[test]
    fn explicit_null_renders_as_absent() {
        let row = DiscountRow {
            order_id: Some(json!("ORD-1")),
            discount_value: Some(Value::Null),
            ..Default::default()
        };
        assert_eq!(row.cells()[3], None);
    }

    #[test]
    fn missing_order_id_has_placeholder() {
        assert_eq!(display_order_id(&None), "<missing>");
        assert_eq!(display_order_id(&Some(json!(17))), "17");
    }
}
