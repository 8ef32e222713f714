//! Product review DTOs.

use chrono::NaiveDateTime;
use plumcot_core::{ProductId, ReviewId, ReviewStatus, UserId};
use serde::{Deserialize, Serialize};

use super::Page;

/// A product review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Star rating, 1-5.
    pub rating: f64,
    pub content: Option<String>,
    pub status: ReviewStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One page of reviews.
pub type ReviewPage = Page<Review>;

/// Payload for creating a review.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Partial review update; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
