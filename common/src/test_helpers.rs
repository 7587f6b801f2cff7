//! Shared Test Helpers for Cross-Crate Use
//!
//! This module provides order event fixtures and scratch directories that are
//! used by both the `processing` and `ecom` test suites.
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds one order event envelope (`{"event_payload": {"order": {...}}}`).
///
/// Only the keys that are explicitly set are emitted, so tests can exercise
/// missing-key tolerance by simply not calling a setter.
#[derive(Debug, Clone, Default)]
pub struct OrderEventBuilder {
    order: Map<String, Value>,
    line_items: Vec<Value>,
    discounts: Vec<Value>,
}

impl OrderEventBuilder {
    pub fn new(order_id: &str) -> Self {
        let mut builder = Self::default();
        builder.order.insert("orderId".into(), json!(order_id));
        builder
    }

    pub fn placed_at(mut self, placed_at: impl Into<Value>) -> Self {
        self.order.insert("placedAt".into(), placed_at.into());
        self
    }

    pub fn total(mut self, total: impl Into<Value>) -> Self {
        self.order.insert("amounts".into(), json!({ "total": total.into() }));
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.order.insert("currency".into(), json!(currency));
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.order.insert("source".into(), json!(source));
        self
    }

    pub fn customer(mut self, reference: &str, first: &str, last: &str, email: &str) -> Self {
        self.order.insert("customerReference".into(), json!(reference));
        self.order.insert(
            "customerDetails".into(),
            json!({ "firstName": first, "lastName": last, "email": email }),
        );
        self
    }

    pub fn line_item(mut self, product_id: &str, quantity: i64, subtotal: f64, total: f64) -> Self {
        self.line_items.push(json!({
            "productId": product_id,
            "variantId": format!("{product_id}-v"),
            "sku": format!("SKU-{product_id}"),
            "quantity": quantity,
            "amounts": { "subtotal": subtotal, "total": total }
        }));
        self
    }

    pub fn discount(mut self, code: &str, kind: &str, value: impl Into<Value>) -> Self {
        self.discounts
            .push(json!({ "code": code, "type": kind, "value": value.into() }));
        self
    }

    pub fn shipping(mut self, city: &str, country: &str, postcode: &str, line1: &str) -> Self {
        self.order.insert(
            "shippingDetails".into(),
            json!({ "address": {
                "city": city,
                "country": country,
                "postcode": postcode,
                "line1": line1
            }}),
        );
        self
    }

    /// Sets an arbitrary key on the order object, overriding earlier setters.
    pub fn raw(mut self, key: &str, value: Value) -> Self {
        self.order.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Value {
        let mut order = self.order;
        if !self.line_items.is_empty() {
            order.insert("lineItems".into(), Value::Array(self.line_items));
        }
        if !self.discounts.is_empty() {
            order.insert("appliedDiscounts".into(), Value::Array(self.discounts));
        }
        json!({ "event_payload": { "order": Value::Object(order) } })
    }
}

/// Two orders: the first with two line items and one discount, the second with neither.
pub fn orders_document() -> Value {
    json!([
        OrderEventBuilder::new("ORD-1")
            .placed_at("2024-01-01T10:00:00.000000")
            .total(59.5)
            .currency("GBP")
            .source("web")
            .customer("CUST-1", "Ada", "Lovelace", "ada@example.com")
            .line_item("P-1", 1, 20.0, 20.0)
            .line_item("P-2", 2, 40.0, 39.5)
            .discount("WELCOME", "percentage", 10)
            .shipping("London", "GB", "N1 9GU", "1 Analytical Way")
            .build(),
        OrderEventBuilder::new("ORD-2")
            .placed_at("2024-01-02T08:30:00.250000")
            .total(12)
            .currency("GBP")
            .source("app")
            .customer("CUST-2", "Charles", "Babbage", "charles@example.com")
            .shipping("Cambridge", "GB", "CB2 1TN", "2 Engine Row")
            .build(),
    ])
}

/// A scratch directory holding an input document and receiving output files.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn write_json(&self, name: &str, document: &Value) -> PathBuf {
        let body = serde_json::to_string_pretty(document).expect("fixture serializes");
        self.write_raw(name, &body)
    }

    pub fn write_raw(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    pub fn read_output(&self, file_name: &str) -> String {
        fs::read_to_string(self.output_dir().join(file_name)).expect("output file exists")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
