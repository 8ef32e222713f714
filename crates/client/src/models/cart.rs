//! Shopping cart DTOs.

use chrono::NaiveDateTime;
use plumcot_core::{CartItemId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use super::Product;

/// A shopper's cart with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for adding or updating a cart line.
#[derive(Debug, Clone, Serialize)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub quantity: i64,
}
