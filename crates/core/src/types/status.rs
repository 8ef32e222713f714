//! Status enums for various entities.
//!
//! All variants serialize to the backend's lowercase wire names.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Shipment status reported by logistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShippingStatus {
    #[default]
    Created,
    InTransit,
    Delivered,
    Returned,
}

impl ShippingStatus {
    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Returned => "returned",
        }
    }
}

/// Payment method selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cod,
    Alipay,
    Wechat,
    BankCard,
}

/// Moderation status of a product review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    #[default]
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Author role of a customer-service chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).expect("serializes"),
            "\"cancelled\""
        );
        let status: OrderStatus = serde_json::from_str("\"paid\"").expect("valid status");
        assert_eq!(status, OrderStatus::Paid);
    }

    #[test]
    fn test_shipping_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ShippingStatus::InTransit).expect("serializes"),
            "\"in_transit\""
        );
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankCard).expect("serializes"),
            "\"bank_card\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cod).expect("serializes"),
            "\"cod\""
        );
    }

    #[test]
    fn test_review_status_query_names() {
        assert_eq!(ReviewStatus::Approved.as_str(), "approved");
        assert_eq!(
            serde_json::to_string(&ReviewStatus::Pending).expect("serializes"),
            "\"pending\""
        );
    }

    #[test]
    fn test_chat_role_wire_names() {
        let role: ChatRole = serde_json::from_str("\"assistant\"").expect("valid role");
        assert_eq!(role, ChatRole::Assistant);
        assert_eq!(ChatRole::User.as_str(), "user");
    }
}
