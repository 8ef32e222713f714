//! Wire DTOs for the shop backend.
//!
//! Field names and optionality mirror the backend's JSON schemas; server
//! timestamps arrive as naive ISO datetimes and money fields as JSON
//! numbers.

pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod coupons;
pub mod knowledge;
pub mod membership;
pub mod orders;
pub mod reviews;
pub mod users;

pub use addresses::{Address, AddressUpdate, NewAddress};
pub use cart::{Cart, CartItem, NewCartItem};
pub use catalog::{
    Category, CategoryUpdate, CustomerServiceChannels, NewCategory, NewProduct, Product,
    ProductPage, ProductUpdate,
};
pub use chat::{
    AdminChatFilter, ChatHistory, ChatHistoryCleared, ChatMessage, HistoryFilter,
    MessageRetracted, NewChatMessage,
};
pub use coupons::{Coupon, CouponUpdate, DiscountType, NewCoupon, UserCoupon};
pub use knowledge::{
    DatabaseImport, KnowledgeChunk, KnowledgeDocument, KnowledgeDocumentUpdate,
    NewKnowledgeDocument, UrlImport,
};
pub use membership::{
    Membership, MembershipCard, MembershipCardUpdate, MembershipPlan, MembershipPlanUpdate,
    MembershipUpdate, NewMembership, NewMembershipCard, NewMembershipPlan,
};
pub use orders::{NewOrder, Order, OrderItem, ShippingInfo};
pub use reviews::{NewReview, Review, ReviewPage, ReviewUpdate};
pub use users::{NewUser, UserProfile, UserUpdate};

use serde::{Deserialize, Serialize};

/// One page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: i64,
    /// Page size the backend applied.
    pub page_size: i64,
}
