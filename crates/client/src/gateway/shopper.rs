//! Shopper-facing API surface.
//!
//! Every method here targets the shopper backend (`/api`). Ordinary calls
//! run in the `Storefront` category; customer-service chat runs in
//! `Conversation` (`ConversationUpload` when attachments are present)
//! because first use can wait on backend model warm-up.

use reqwest::Method;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::instrument;

use plumcot_core::{
    AddressId, CartItemId, ChatMessageId, OrderId, ProductId, ReviewId, ReviewStatus, UserId,
};

use crate::error::GatewayError;
use crate::models::users::LoginRequest;
use crate::models::{
    Address, AddressUpdate, Cart, Category, ChatHistory, ChatHistoryCleared, ChatMessage,
    CustomerServiceChannels, HistoryFilter, Membership, MembershipCard, MembershipPlan,
    MembershipUpdate, MessageRetracted, NewAddress, NewCartItem, NewChatMessage, NewMembership,
    NewOrder, NewReview, NewUser, Order, Product, ProductPage, Review, ReviewPage, ReviewUpdate,
    ShippingInfo, UserCoupon, UserProfile, UserUpdate,
};
use crate::policy::CallCategory;

use super::GatewayClient;
use super::multipart::{self, ChatAttachments};

impl GatewayClient {
    // =========================================================================
    // Catalog
    // =========================================================================

    /// Browse the catalog, optionally filtered by search text and category.
    pub async fn products(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Result<ProductPage, GatewayError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        if let Some(search) = search {
            query.push(("search", search.to_owned()));
        }
        if let Some(category) = category {
            query.push(("category", category.to_owned()));
        }
        self.get_json_query(CallCategory::Storefront, "/products/", &query)
            .await
    }

    /// Fetch one product.
    pub async fn product(&self, product_id: ProductId) -> Result<Product, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/products/{product_id}"))
            .await
    }

    /// List product categories.
    pub async fn categories(&self) -> Result<Vec<Category>, GatewayError> {
        self.get_json(CallCategory::Storefront, "/products/categories")
            .await
    }

    /// Customer-service channels advertised for a product.
    pub async fn customer_service_channels(
        &self,
        product_id: ProductId,
    ) -> Result<CustomerServiceChannels, GatewayError> {
        self.get_json(
            CallCategory::Storefront,
            &format!("/products/{product_id}/customer-service"),
        )
        .await
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Fetch a shopper's cart.
    pub async fn cart(&self, user_id: UserId) -> Result<Cart, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/carts/{user_id}"))
            .await
    }

    /// Add a line to the cart; returns the updated cart.
    pub async fn add_cart_item(
        &self,
        user_id: UserId,
        item: &NewCartItem,
    ) -> Result<Cart, GatewayError> {
        self.post_json(
            CallCategory::Storefront,
            &format!("/carts/{user_id}/items"),
            item,
        )
        .await
    }

    /// Replace a cart line; returns the updated cart.
    pub async fn update_cart_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        item: &NewCartItem,
    ) -> Result<Cart, GatewayError> {
        self.put_json(
            CallCategory::Storefront,
            &format!("/carts/{user_id}/items/{item_id}"),
            item,
        )
        .await
    }

    /// Remove one cart line; returns the updated cart.
    pub async fn remove_cart_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<Cart, GatewayError> {
        let builder = self
            .builder(
                CallCategory::Storefront,
                Method::DELETE,
                &format!("/carts/{user_id}/items/{item_id}"),
            )
            .await;
        self.dispatch(CallCategory::Storefront, builder).await
    }

    /// Empty the cart; returns the now-empty cart.
    pub async fn clear_cart(&self, user_id: UserId) -> Result<Cart, GatewayError> {
        let builder = self
            .builder(
                CallCategory::Storefront,
                Method::DELETE,
                &format!("/carts/{user_id}/items"),
            )
            .await;
        self.dispatch(CallCategory::Storefront, builder).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order from the current cart contents.
    #[instrument(skip(self, order), fields(user_id = %user_id))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        order: &NewOrder,
    ) -> Result<Order, GatewayError> {
        self.post_json(CallCategory::Storefront, &format!("/orders/{user_id}"), order)
            .await
    }

    /// List a shopper's orders.
    pub async fn orders(&self, user_id: UserId) -> Result<Vec<Order>, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/orders/{user_id}"))
            .await
    }

    /// Fetch one order with its lines and shipment.
    pub async fn order_detail(&self, order_id: OrderId) -> Result<Order, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/orders/detail/{order_id}"))
            .await
    }

    /// Hide an order from the shopper's history.
    pub async fn delete_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<(), GatewayError> {
        self.delete_unit(
            CallCategory::Storefront,
            &format!("/orders/{user_id}/{order_id}"),
        )
        .await
    }

    /// Shipment tracking for an order.
    pub async fn logistics(&self, order_id: OrderId) -> Result<ShippingInfo, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/logistics/{order_id}"))
            .await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Fetch a user record.
    pub async fn user(&self, user_id: UserId) -> Result<UserProfile, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/users/{user_id}"))
            .await
    }

    /// Register a new shopper account.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn register_user(&self, user: &NewUser) -> Result<UserProfile, GatewayError> {
        self.post_json(CallCategory::Storefront, "/users/register", user)
            .await
    }

    /// Log in with a username or email.
    #[instrument(skip(self, password), fields(identity = %identity))]
    pub async fn login(
        &self,
        identity: &str,
        password: &SecretString,
    ) -> Result<UserProfile, GatewayError> {
        let payload = LoginRequest {
            identity: identity.to_owned(),
            password: password.expose_secret().to_owned(),
        };
        self.post_json(CallCategory::Storefront, "/users/login", &payload)
            .await
    }

    /// Update profile fields.
    pub async fn update_user(
        &self,
        user_id: UserId,
        update: &UserUpdate,
    ) -> Result<UserProfile, GatewayError> {
        self.put_json(CallCategory::Storefront, &format!("/users/{user_id}"), update)
            .await
    }

    /// Delete a shopper account.
    pub async fn delete_user(&self, user_id: UserId) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Storefront, &format!("/users/{user_id}"))
            .await
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    /// List a shopper's saved addresses.
    pub async fn addresses(&self, user_id: UserId) -> Result<Vec<Address>, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/addresses/{user_id}"))
            .await
    }

    /// Save a new address.
    pub async fn create_address(
        &self,
        user_id: UserId,
        address: &NewAddress,
    ) -> Result<Address, GatewayError> {
        self.post_json(
            CallCategory::Storefront,
            &format!("/addresses/{user_id}"),
            address,
        )
        .await
    }

    /// Update a saved address.
    pub async fn update_address(
        &self,
        user_id: UserId,
        address_id: AddressId,
        update: &AddressUpdate,
    ) -> Result<Address, GatewayError> {
        self.put_json(
            CallCategory::Storefront,
            &format!("/addresses/{user_id}/{address_id}"),
            update,
        )
        .await
    }

    /// Delete a saved address.
    pub async fn delete_address(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<(), GatewayError> {
        self.delete_unit(
            CallCategory::Storefront,
            &format!("/addresses/{user_id}/{address_id}"),
        )
        .await
    }

    // =========================================================================
    // Memberships
    // =========================================================================

    /// Fetch a shopper's membership.
    pub async fn membership(&self, user_id: UserId) -> Result<Membership, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/memberships/{user_id}"))
            .await
    }

    /// Open a membership.
    pub async fn create_membership(
        &self,
        user_id: UserId,
        membership: &NewMembership,
    ) -> Result<Membership, GatewayError> {
        self.post_json(
            CallCategory::Storefront,
            &format!("/memberships/{user_id}"),
            membership,
        )
        .await
    }

    /// Update a membership.
    pub async fn update_membership(
        &self,
        user_id: UserId,
        update: &MembershipUpdate,
    ) -> Result<Membership, GatewayError> {
        self.put_json(
            CallCategory::Storefront,
            &format!("/memberships/{user_id}"),
            update,
        )
        .await
    }

    /// Add balance to a membership.
    pub async fn recharge_membership(
        &self,
        user_id: UserId,
        amount: Decimal,
    ) -> Result<Membership, GatewayError> {
        self.post_json(
            CallCategory::Storefront,
            &format!("/memberships/{user_id}/recharge"),
            &serde_json::json!({ "amount": amount }),
        )
        .await
    }

    /// Membership plans on offer.
    pub async fn membership_plans(&self) -> Result<Vec<MembershipPlan>, GatewayError> {
        self.get_json(CallCategory::Storefront, "/memberships/plans")
            .await
    }

    /// Prepaid cards currently published for sale.
    pub async fn published_membership_cards(
        &self,
    ) -> Result<Vec<MembershipCard>, GatewayError> {
        self.get_json(CallCategory::Storefront, "/memberships/cards/published")
            .await
    }

    /// Cards bound to a shopper.
    pub async fn my_membership_cards(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MembershipCard>, GatewayError> {
        self.get_json(
            CallCategory::Storefront,
            &format!("/memberships/{user_id}/cards"),
        )
        .await
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// Coupons held by a shopper.
    pub async fn user_coupons(&self, user_id: UserId) -> Result<Vec<UserCoupon>, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/coupons/{user_id}"))
            .await
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// Leave a review on a product.
    pub async fn create_review(
        &self,
        product_id: ProductId,
        user_id: UserId,
        review: &NewReview,
    ) -> Result<Review, GatewayError> {
        self.post_json(
            CallCategory::Storefront,
            &format!("/reviews/products/{product_id}/users/{user_id}"),
            review,
        )
        .await
    }

    /// Reviews of a product in a given moderation status.
    pub async fn product_reviews(
        &self,
        product_id: ProductId,
        status: ReviewStatus,
        page: i64,
        page_size: i64,
    ) -> Result<ReviewPage, GatewayError> {
        let query = [
            ("status", status.as_str().to_owned()),
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        self.get_json_query(
            CallCategory::Storefront,
            &format!("/reviews/products/{product_id}"),
            &query,
        )
        .await
    }

    /// Aggregate rating statistics for a product.
    pub async fn product_review_stats(
        &self,
        product_id: ProductId,
    ) -> Result<Value, GatewayError> {
        self.get_json(
            CallCategory::Storefront,
            &format!("/reviews/products/{product_id}/stats"),
        )
        .await
    }

    /// Fetch one review.
    pub async fn review(&self, review_id: ReviewId) -> Result<Review, GatewayError> {
        self.get_json(CallCategory::Storefront, &format!("/reviews/{review_id}"))
            .await
    }

    /// Reviews written by a shopper, optionally filtered by status.
    pub async fn user_reviews(
        &self,
        user_id: UserId,
        status: Option<ReviewStatus>,
        page: i64,
        page_size: i64,
    ) -> Result<ReviewPage, GatewayError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_owned()));
        }
        self.get_json_query(
            CallCategory::Storefront,
            &format!("/reviews/users/{user_id}"),
            &query,
        )
        .await
    }

    /// Edit an own review.
    pub async fn update_review(
        &self,
        review_id: ReviewId,
        user_id: UserId,
        update: &ReviewUpdate,
    ) -> Result<Review, GatewayError> {
        self.put_json(
            CallCategory::Storefront,
            &format!("/reviews/{review_id}/users/{user_id}"),
            update,
        )
        .await
    }

    /// Delete an own review.
    pub async fn delete_review(
        &self,
        review_id: ReviewId,
        user_id: UserId,
    ) -> Result<(), GatewayError> {
        self.delete_unit(
            CallCategory::Storefront,
            &format!("/reviews/{review_id}/users/{user_id}"),
        )
        .await
    }

    // =========================================================================
    // Customer-service chat
    // =========================================================================

    /// Send a chat message; resolves with the assistant's reply.
    #[instrument(skip(self, message, model), fields(user_id = %user_id))]
    pub async fn send_chat(
        &self,
        user_id: UserId,
        product_id: Option<ProductId>,
        message: &str,
        model: Option<&str>,
    ) -> Result<ChatMessage, GatewayError> {
        let payload = NewChatMessage {
            user_id,
            product_id,
            message: message.to_owned(),
            model: model.map(str::to_owned),
        };
        self.post_json(CallCategory::Conversation, "/customer-service/chat", &payload)
            .await
    }

    /// Send a chat message with binary attachments; resolves with the
    /// assistant's reply.
    #[instrument(skip(self, message, attachments, model), fields(user_id = %user_id))]
    pub async fn send_chat_with_attachments(
        &self,
        user_id: UserId,
        product_id: Option<ProductId>,
        message: &str,
        attachments: ChatAttachments,
        model: Option<&str>,
    ) -> Result<ChatMessage, GatewayError> {
        let fields = multipart::chat_fields(user_id, product_id, message, attachments, model);
        self.post_multipart(
            CallCategory::ConversationUpload,
            "/customer-service/chat/upload",
            fields,
        )
        .await
    }

    /// Retrieve conversation history, optionally bounded and limited.
    pub async fn chat_history(
        &self,
        user_id: UserId,
        product_id: ProductId,
        filter: &HistoryFilter,
    ) -> Result<ChatHistory, GatewayError> {
        let mut query = Vec::new();
        if let Some(start) = &filter.start {
            query.push(("start", start.clone()));
        }
        if let Some(end) = &filter.end {
            query.push(("end", end.clone()));
        }
        if let Some(limit) = filter.limit {
            query.push(("limit", limit.to_string()));
        }
        self.get_json_query(
            CallCategory::Storefront,
            &format!("/customer-service/history/{user_id}/{product_id}"),
            &query,
        )
        .await
    }

    /// Clear a conversation; reports how many messages were removed.
    pub async fn clear_chat(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<ChatHistoryCleared, GatewayError> {
        let builder = self
            .builder(
                CallCategory::Storefront,
                Method::DELETE,
                &format!("/customer-service/history/{user_id}/{product_id}"),
            )
            .await;
        self.dispatch(CallCategory::Storefront, builder).await
    }

    /// Retract one own message from a conversation.
    pub async fn retract_chat_message(
        &self,
        message_id: ChatMessageId,
        user_id: UserId,
    ) -> Result<MessageRetracted, GatewayError> {
        let builder = self
            .builder(
                CallCategory::Storefront,
                Method::DELETE,
                &format!("/customer-service/message/{message_id}"),
            )
            .await
            .query(&[("user_id", user_id.to_string())]);
        self.dispatch(CallCategory::Storefront, builder).await
    }

    /// Probe whether the AI assistant is available and which models it
    /// serves.
    pub async fn assistant_status(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Storefront, "/customer-service/status")
            .await
    }
}
