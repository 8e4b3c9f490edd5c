//! Order Model
//!
//! An order carries three independent status axes. Nothing couples them:
//! `status = COMPLETED` with `payment_status = PENDING` is a valid state.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::store::StoreSummary;

/// Order lifecycle: PENDING → PROCESSING → COMPLETED, or → CANCELED
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Canceled,
}

/// PENDING → PAID / FAILED / REFUNDED
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// UNFULFILLED → PARTIAL / FULFILLED / RETURNED
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum FulfillmentStatus {
    #[default]
    Unfulfilled,
    Partial,
    Fulfilled,
    Returned,
}

/// Customer contact copied onto the order at creation time.
///
/// Never re-synced from the customer record afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    #[cfg_attr(feature = "db", sqlx(rename = "customer_name"))]
    #[validate(length(min = 1, max = 200, code = "customer_name"))]
    pub name: String,
    #[cfg_attr(feature = "db", sqlx(rename = "customer_email"))]
    #[validate(email(code = "customer_email"))]
    pub email: String,
    #[cfg_attr(feature = "db", sqlx(rename = "customer_phone"))]
    pub phone: Option<String>,
    #[cfg_attr(feature = "db", sqlx(rename = "customer_address"))]
    pub address: Option<String>,
    #[cfg_attr(feature = "db", sqlx(rename = "customer_city"))]
    pub city: Option<String>,
    #[cfg_attr(feature = "db", sqlx(rename = "customer_state"))]
    pub state: Option<String>,
    #[cfg_attr(feature = "db", sqlx(rename = "customer_zip"))]
    pub zip: Option<String>,
    #[cfg_attr(feature = "db", sqlx(rename = "customer_country"))]
    pub country: Option<String>,
}

/// Order line, a point-in-time snapshot of the product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_image: Option<String>,
    pub sku: Option<String>,
    pub quantity: i64,
    /// Unit price at time of purchase (minor units)
    pub price: i64,
    /// `price × quantity`
    pub total: i64,
}

/// Order aggregate
///
/// `items` and `store` are loaded separately and skipped by the row mapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub workspace_id: i64,
    pub store_id: i64,
    /// Human-readable `ORD-YYMMDD-NNNN`
    pub order_number: String,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub customer: CustomerContact,
    pub subtotal: i64,
    pub shipping: i64,
    pub tax: i64,
    pub discount: i64,
    /// `subtotal + shipping + tax - discount`, not clamped
    pub total: i64,
    pub currency: String,
    pub payment_method: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub paid_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub canceled_at: Option<i64>,
    pub notes: Option<String>,
    pub cancel_reason: Option<String>,
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
    pub source: String,
    pub created_at: i64,
    pub updated_at: i64,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub store: Option<StoreSummary>,
}

/// Requested order line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: i64,
    #[validate(range(min = 1, code = "item_quantity"))]
    pub quantity: i64,
    /// Caller-supplied unit price, used instead of the live catalog price
    #[validate(range(min = 0, code = "item_price"))]
    pub price: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub store_id: i64,
    #[validate(nested)]
    pub customer: CustomerContact,
    #[validate(length(min = 1, code = "order_empty"), nested)]
    pub items: Vec<OrderItemInput>,
    #[validate(range(min = 0, code = "order_amount"))]
    pub shipping: Option<i64>,
    #[validate(range(min = 0, code = "order_amount"))]
    pub tax: Option<i64>,
    #[validate(range(min = 0, code = "order_amount"))]
    pub discount: Option<i64>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub source: Option<String>,
}

/// Partial status / tracking update
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
    pub paid_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub canceled_at: Option<i64>,
    pub cancel_reason: Option<String>,
    pub notes: Option<String>,
    pub tracking_number: Option<String>,
    pub tracking_url: Option<String>,
}

/// Order counters for one workspace, optionally one store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub pending_orders: i64,
    pub completed_orders: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> CustomerContact {
        CustomerContact {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            address: None,
            city: None,
            state: None,
            zip: None,
            country: None,
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Canceled).unwrap(),
            "\"CANCELED\""
        );
        assert_eq!(
            serde_json::from_str::<PaymentStatus>("\"PAID\"").unwrap(),
            PaymentStatus::Paid
        );
        assert_eq!(
            serde_json::to_string(&FulfillmentStatus::default()).unwrap(),
            "\"UNFULFILLED\""
        );
    }

    #[test]
    fn test_order_create_deserializes_camel_case() {
        let json = r#"{
            "storeId": 7,
            "customer": {"name": "Ada", "email": "ada@example.com", "zip": "10001"},
            "items": [{"productId": 1, "quantity": 2, "price": 1500}],
            "shipping": 500,
            "paymentMethod": "card"
        }"#;
        let input: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(input.store_id, 7);
        assert_eq!(input.customer.zip.as_deref(), Some("10001"));
        assert_eq!(input.items[0].price, 1500);
        assert_eq!(input.shipping, Some(500));
        assert!(input.tax.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_order_create_rejects_bad_lines() {
        let mut input = OrderCreate {
            store_id: 1,
            customer: contact(),
            items: vec![],
            shipping: None,
            tax: None,
            discount: None,
            payment_method: None,
            notes: None,
            source: None,
        };
        assert!(input.validate().is_err());

        input.items.push(OrderItemInput {
            product_id: 1,
            quantity: 0,
            price: 100,
        });
        assert!(input.validate().is_err());

        input.items[0].quantity = 1;
        input.discount = Some(-1);
        assert!(input.validate().is_err());

        input.discount = Some(0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_customer_contact_requires_email() {
        let mut c = contact();
        c.email = "not-an-email".to_string();
        assert!(c.validate().is_err());
    }
}
