//! Order and logistics DTOs.

use chrono::NaiveDateTime;
use plumcot_core::{CouponId, OrderId, OrderStatus, PaymentMethod, ShippingStatus, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// One line of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub product: Product,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Checkout payload; the cart contents become the order lines server-side.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub payment_method: PaymentMethod,
    pub shipping_carrier: String,
    pub shipping_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_membership: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_id: Option<CouponId>,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub shipping_address: String,
    pub items: Vec<OrderItem>,
    pub shipping: Option<ShippingInfo>,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub applied_coupon_id: Option<CouponId>,
    #[serde(default)]
    pub deleted_by_user: bool,
    #[serde(default)]
    pub deleted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Shipment tracking record for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub id: i64,
    pub order_id: OrderId,
    pub carrier: String,
    pub tracking_number: Option<String>,
    pub status: ShippingStatus,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
