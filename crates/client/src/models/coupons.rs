//! Coupon DTOs.

use chrono::NaiveDateTime;
use plumcot_core::{CouponId, OrderId, ProductId, UserCouponId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a coupon's discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Flat amount off.
    Amount,
    /// Percentage off.
    Percent,
}

/// A coupon definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub valid_from: Option<NaiveDateTime>,
    pub valid_to: Option<NaiveDateTime>,
    pub min_spend: Decimal,
    pub active: bool,
    pub allowed_product_id: Option<ProductId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for creating a coupon.
#[derive(Debug, Clone, Serialize)]
pub struct NewCoupon {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_spend: Option<Decimal>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_product_id: Option<ProductId>,
}

/// Partial coupon update; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CouponUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_spend: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_product_id: Option<ProductId>,
}

/// A coupon held by a shopper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCoupon {
    pub id: UserCouponId,
    pub user_id: UserId,
    pub status: String,
    pub used_order_id: Option<OrderId>,
    pub coupon: Coupon,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
