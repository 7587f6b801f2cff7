use common::config::NormalizerConfig;
use processing::{
    executable_utils::RecordNormalizer,
    table::{IntoTables, Requirement, Table},
    value_path::{ValuePath, render_cell},
};
use serde_json::Value;

use crate::{
    model::{CustomerRow, DiscountRow, OrderItemRow, OrderRow, ShippingRow, display_order_id},
    timestamp::{PlacedAt, parse_placed_at},
};

const ORDER_PATH: &[&str] = &["event_payload", "order"];

/// Flattened views accumulated over one batch of order events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedOrders {
    pub orders: Vec<OrderRow>,
    pub customers: Vec<CustomerRow>,
    pub order_items: Vec<OrderItemRow>,
    pub discounts: Vec<DiscountRow>,
    pub shipping: Vec<ShippingRow>,
}

impl IntoTables for NormalizedOrders {
    fn into_tables(self) -> Vec<Table> {
        vec![
            Table::from_rows("orders", &self.orders),
            Table::from_distinct_rows("customers", &self.customers),
            Table::from_rows("order_items", &self.order_items),
            Table::from_rows("discounts", &self.discounts).with_requirement(Requirement::Optional),
            Table::from_rows("shipping", &self.shipping),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderNormalizer {
    config: NormalizerConfig,
}

impl OrderNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Appends every view extracted from one order event to `out`.
    pub fn normalize_record(&self, record: &Value, out: &mut NormalizedOrders) {
        let order = record.path(ORDER_PATH);
        let order_id = order.field("orderId").cloned();

        out.orders.push(self.order_row(order, &order_id));
        out.customers.push(customer_row(order));

        for item in order.items("lineItems") {
            out.order_items.push(self.order_item_row(item, &order_id));
        }
        for discount in order.items("appliedDiscounts") {
            out.discounts.push(discount_row(discount, &order_id));
        }

        out.shipping.push(shipping_row(order, &order_id));
    }

    fn order_row(&self, order: &Value, order_id: &Option<Value>) -> OrderRow {
        let zone = self.config.epoch_timezone;
        let raw_date = order.lookup("placedAt");

        let placed_at = parse_placed_at(raw_date, zone);
        match placed_at {
            PlacedAt::Epoch(_) => tracing::warn!(
                "Converted numeric timestamp for order {} using {} time",
                display_order_id(order_id),
                zone
            ),
            PlacedAt::Invalid => tracing::warn!(
                "Invalid timestamp format for order {}: {}",
                display_order_id(order_id),
                raw_date.and_then(render_cell).unwrap_or_default()
            ),
            PlacedAt::Missing | PlacedAt::Formatted(_) => {}
        }

        OrderRow {
            order_id: order_id.clone(),
            customer_reference: order.field("customerReference").cloned(),
            order_date: placed_at.value(),
            total_price: self.amount(order.branch("amounts"), "total"),
            currency: order.field("currency").cloned(),
            source: order.field("source").cloned(),
        }
    }

    fn order_item_row(&self, item: &Value, order_id: &Option<Value>) -> OrderItemRow {
        let amounts = item.branch("amounts");
        OrderItemRow {
            order_id: order_id.clone(),
            product_id: item.field("productId").cloned(),
            variant_id: item.field("variantId").cloned(),
            sku: item.field("sku").cloned(),
            quantity: item.field("quantity").cloned(),
            subtotal: self.amount(amounts, "subtotal"),
            total: self.amount(amounts, "total"),
        }
    }

    /// A missing amount key defaults to zero when configured; an explicit `null` stays absent.
    fn amount(&self, amounts: &Value, key: &str) -> Option<Value> {
        match amounts.lookup(key) {
            None if self.config.default_missing_amounts_to_zero => Some(Value::from(0)),
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        }
    }
}

impl RecordNormalizer for OrderNormalizer {
    type Output = NormalizedOrders;

    fn normalize(&self, records: &[Value]) -> NormalizedOrders {
        let mut out = NormalizedOrders::default();
        for record in records {
            self.normalize_record(record, &mut out);
        }
        tracing::debug!(
            orders = out.orders.len(),
            order_items = out.order_items.len(),
            discounts = out.discounts.len(),
            "Normalized order events"
        );
        out
    }
}

fn customer_row(order: &Value) -> CustomerRow {
    let details = order.branch("customerDetails");
    CustomerRow {
        customer_reference: order.field("customerReference").cloned(),
        first_name: details.field("firstName").cloned(),
        last_name: details.field("lastName").cloned(),
        email: details.field("email").cloned(),
    }
}

fn discount_row(discount: &Value, order_id: &Option<Value>) -> DiscountRow {
    DiscountRow {
        order_id: order_id.clone(),
        discount_code: discount.field("code").cloned(),
        discount_type: discount.field("type").cloned(),
        discount_value: discount.field("value").cloned(),
    }
}

fn shipping_row(order: &Value, order_id: &Option<Value>) -> ShippingRow {
    let address = order.path(&["shippingDetails", "address"]);
    ShippingRow {
        order_id: order_id.clone(),
        city: address.field("city").cloned(),
        country: address.field("country").cloned(),
        postcode: address.field("postcode").cloned(),
        address_line1: address.field("line1").cloned(),
        address_line2: address.field("line2").cloned(),
    }
}
