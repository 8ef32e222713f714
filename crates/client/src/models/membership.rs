//! Membership, plan, and card DTOs.

use chrono::NaiveDateTime;
use plumcot_core::{MembershipCardId, MembershipId, MembershipPlanId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shopper's membership record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub level: String,
    pub plan_id: Option<MembershipPlanId>,
    pub balance: Decimal,
    pub status: String,
    pub extra_info: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for opening a membership.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewMembership {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<MembershipPlanId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<String>,
}

/// Partial membership update; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MembershipUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<MembershipPlanId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<String>,
}

/// A membership plan on offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: MembershipPlanId,
    pub code: String,
    pub name: String,
    pub discount_percent: Decimal,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for creating a plan.
#[derive(Debug, Clone, Serialize)]
pub struct NewMembershipPlan {
    pub code: String,
    pub name: String,
    pub discount_percent: Decimal,
    pub active: bool,
}

/// Partial plan update; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MembershipPlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// A prepaid membership card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipCard {
    pub id: MembershipCardId,
    pub card_no: String,
    pub plan_id: MembershipPlanId,
    pub user_id: Option<UserId>,
    pub balance: Decimal,
    pub status: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for creating a card.
#[derive(Debug, Clone, Serialize)]
pub struct NewMembershipCard {
    pub card_no: String,
    pub plan_id: MembershipPlanId,
    pub balance: Decimal,
    pub published: bool,
}

/// Partial card update; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MembershipCardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}
