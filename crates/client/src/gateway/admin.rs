//! Administrator API surface.
//!
//! Every method here targets the admin backend (`/adminapi`) and carries
//! the installed credential. Document ingestion runs in the
//! `AdminIngestion` category; everything else, statistics included, runs
//! in `Admin`. Dashboard, cache, and log payloads are free-form reports
//! and stay loosely typed.

use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use plumcot_core::{
    CategoryId, ChatMessageId, CouponId, DocumentId, MembershipCardId, MembershipPlanId, OrderId,
    OrderStatus, ProductId, ReviewId, ReviewStatus, RuleId, ShippingStatus, UserId,
};

use crate::error::GatewayError;
use crate::models::{
    AdminChatFilter, Category, CategoryUpdate, ChatMessage, Coupon, CouponUpdate,
    DatabaseImport, KnowledgeChunk, KnowledgeDocument, KnowledgeDocumentUpdate, Membership,
    MembershipCard, MembershipCardUpdate, MembershipPlan, MembershipPlanUpdate,
    MembershipUpdate, NewCategory, NewCoupon, NewKnowledgeDocument, NewMembership,
    NewMembershipCard, NewMembershipPlan, NewProduct, NewUser, Order, Product, ProductPage,
    ProductUpdate, ReviewPage, ShippingInfo, UrlImport, UserCoupon, UserProfile, UserUpdate,
};
use crate::policy::CallCategory;

use super::GatewayClient;
use super::multipart::{self, Attachment};

impl GatewayClient {
    // =========================================================================
    // Session
    // =========================================================================

    /// Probe the admin API; the cheapest way to validate a credential.
    pub async fn admin_status(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/status").await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// List every user account.
    pub async fn admin_users(&self) -> Result<Vec<UserProfile>, GatewayError> {
        self.get_json(CallCategory::Admin, "/users").await
    }

    /// Create a user account.
    pub async fn admin_create_user(&self, user: &NewUser) -> Result<UserProfile, GatewayError> {
        self.post_json(CallCategory::Admin, "/users", user).await
    }

    /// Update a user account.
    pub async fn admin_update_user(
        &self,
        user_id: UserId,
        update: &UserUpdate,
    ) -> Result<UserProfile, GatewayError> {
        self.put_json(CallCategory::Admin, &format!("/users/{user_id}"), update)
            .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List product categories.
    pub async fn admin_categories(&self) -> Result<Vec<Category>, GatewayError> {
        self.get_json(CallCategory::Admin, "/categories").await
    }

    /// Create a category.
    pub async fn admin_create_category(
        &self,
        category: &NewCategory,
    ) -> Result<Category, GatewayError> {
        self.post_json(CallCategory::Admin, "/categories", category)
            .await
    }

    /// Rename a category.
    pub async fn admin_update_category(
        &self,
        category_id: CategoryId,
        update: &CategoryUpdate,
    ) -> Result<Category, GatewayError> {
        self.put_json(
            CallCategory::Admin,
            &format!("/categories/{category_id}"),
            update,
        )
        .await
    }

    /// Delete a category.
    pub async fn admin_delete_category(
        &self,
        category_id: CategoryId,
    ) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Admin, &format!("/categories/{category_id}"))
            .await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Search the catalog with admin visibility.
    pub async fn admin_products(
        &self,
        search: Option<&str>,
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
        self.get_json_query(CallCategory::Admin, "/products", &query)
            .await
    }

    /// Create a product.
    pub async fn admin_create_product(
        &self,
        product: &NewProduct,
    ) -> Result<Product, GatewayError> {
        self.post_json(CallCategory::Admin, "/products", product)
            .await
    }

    /// Update a product.
    pub async fn admin_update_product(
        &self,
        product_id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, GatewayError> {
        self.put_json(CallCategory::Admin, &format!("/products/{product_id}"), update)
            .await
    }

    /// Attach a product image; returns the updated product.
    #[instrument(skip(self, image), fields(product_id = %product_id))]
    pub async fn admin_upload_product_image(
        &self,
        product_id: ProductId,
        image: Attachment,
    ) -> Result<Product, GatewayError> {
        self.post_multipart(
            CallCategory::Admin,
            &format!("/products/{product_id}/image"),
            multipart::image_fields(image),
        )
        .await
    }

    /// Delete a product.
    pub async fn admin_delete_product(&self, product_id: ProductId) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Admin, &format!("/products/{product_id}"))
            .await
    }

    /// Create many products in one call.
    pub async fn admin_bulk_create_products(
        &self,
        products: &[NewProduct],
    ) -> Result<Vec<Product>, GatewayError> {
        self.post_json(CallCategory::Admin, "/products/bulk", products)
            .await
    }

    // =========================================================================
    // Orders and logistics
    // =========================================================================

    /// List every order.
    pub async fn admin_orders(&self) -> Result<Vec<Order>, GatewayError> {
        self.get_json(CallCategory::Admin, "/orders").await
    }

    /// Transition an order's status.
    pub async fn admin_update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, GatewayError> {
        let builder = self
            .builder(
                CallCategory::Admin,
                Method::PUT,
                &format!("/orders/{order_id}/status"),
            )
            .await
            .query(&[("status_value", status.as_str())]);
        self.dispatch(CallCategory::Admin, builder).await
    }

    /// Transition a shipment's status, optionally setting a tracking number.
    pub async fn admin_update_logistics(
        &self,
        order_id: OrderId,
        status: ShippingStatus,
        tracking_number: Option<&str>,
    ) -> Result<ShippingInfo, GatewayError> {
        let mut query = vec![("status_value", status.as_str().to_owned())];
        if let Some(tracking_number) = tracking_number {
            query.push(("tracking_number", tracking_number.to_owned()));
        }
        let builder = self
            .builder(
                CallCategory::Admin,
                Method::PUT,
                &format!("/logistics/{order_id}"),
            )
            .await
            .query(&query);
        self.dispatch(CallCategory::Admin, builder).await
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Store-wide counters.
    pub async fn admin_stats(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/stats").await
    }

    /// Dashboard headline figures.
    pub async fn admin_dashboard_statistics(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/statistics/dashboard")
            .await
    }

    /// Sales figures over the trailing `days`.
    pub async fn admin_sales_statistics(&self, days: i64) -> Result<Value, GatewayError> {
        self.get_json_query(
            CallCategory::Admin,
            "/statistics/sales",
            &[("days", days.to_string())],
        )
        .await
    }

    /// Per-product sales figures.
    pub async fn admin_product_statistics(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/statistics/products")
            .await
    }

    /// User growth and activity figures.
    pub async fn admin_user_statistics(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/statistics/users").await
    }

    /// Products at or below the stock threshold.
    pub async fn admin_stock_alerts(&self, threshold: i64) -> Result<Value, GatewayError> {
        self.get_json_query(
            CallCategory::Admin,
            "/stock-alerts",
            &[("threshold", threshold.to_string())],
        )
        .await
    }

    /// Stock-level distribution, optionally against a custom threshold.
    pub async fn admin_stock_statistics(
        &self,
        threshold: Option<i64>,
    ) -> Result<Value, GatewayError> {
        let mut query = Vec::new();
        if let Some(threshold) = threshold {
            query.push(("threshold", threshold.to_string()));
        }
        self.get_json_query(CallCategory::Admin, "/stock-alerts/statistics", &query)
            .await
    }

    // =========================================================================
    // Review moderation
    // =========================================================================

    /// List reviews for moderation, optionally scoped to a product or
    /// status.
    pub async fn admin_reviews(
        &self,
        product_id: Option<ProductId>,
        status: Option<ReviewStatus>,
        page: i64,
        page_size: i64,
    ) -> Result<ReviewPage, GatewayError> {
        let mut query = vec![
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
        ];
        if let Some(product_id) = product_id {
            query.push(("product_id", product_id.to_string()));
        }
        if let Some(status) = status {
            query.push(("status", status.as_str().to_owned()));
        }
        self.get_json_query(CallCategory::Admin, "/reviews", &query)
            .await
    }

    /// Remove a review.
    pub async fn admin_delete_review(&self, review_id: ReviewId) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Admin, &format!("/reviews/{review_id}"))
            .await
    }

    // =========================================================================
    // Chat moderation
    // =========================================================================

    /// List chat messages matching the filter.
    pub async fn admin_chats(
        &self,
        filter: &AdminChatFilter,
    ) -> Result<Vec<ChatMessage>, GatewayError> {
        let mut query = Vec::new();
        if let Some(user_id) = filter.user_id {
            query.push(("user_id", user_id.to_string()));
        }
        if let Some(product_id) = filter.product_id {
            query.push(("product_id", product_id.to_string()));
        }
        if let Some(role) = filter.role {
            query.push(("role", role.as_str().to_owned()));
        }
        if let Some(q) = &filter.q {
            query.push(("q", q.clone()));
        }
        if let Some(limit) = filter.limit {
            query.push(("limit", limit.to_string()));
        }
        self.get_json_query(CallCategory::Admin, "/chats", &query)
            .await
    }

    /// Remove one chat message.
    pub async fn admin_delete_chat_message(
        &self,
        message_id: ChatMessageId,
    ) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Admin, &format!("/chats/{message_id}"))
            .await
    }

    /// Remove a whole conversation, optionally scoped to one product.
    pub async fn admin_delete_conversation(
        &self,
        user_id: UserId,
        product_id: Option<ProductId>,
    ) -> Result<(), GatewayError> {
        let mut query = vec![("user_id", user_id.to_string())];
        if let Some(product_id) = product_id {
            query.push(("product_id", product_id.to_string()));
        }
        let builder = self
            .builder(CallCategory::Admin, Method::DELETE, "/chats/conversation")
            .await
            .query(&query);
        self.dispatch_unit(CallCategory::Admin, builder).await
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// List coupon definitions.
    pub async fn admin_coupons(&self) -> Result<Vec<Coupon>, GatewayError> {
        self.get_json(CallCategory::Admin, "/coupons").await
    }

    /// Create a coupon.
    pub async fn admin_create_coupon(&self, coupon: &NewCoupon) -> Result<Coupon, GatewayError> {
        self.post_json(CallCategory::Admin, "/coupons", coupon).await
    }

    /// Update a coupon.
    pub async fn admin_update_coupon(
        &self,
        coupon_id: CouponId,
        update: &CouponUpdate,
    ) -> Result<Coupon, GatewayError> {
        self.put_json(CallCategory::Admin, &format!("/coupons/{coupon_id}"), update)
            .await
    }

    /// Delete a coupon.
    pub async fn admin_delete_coupon(&self, coupon_id: CouponId) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Admin, &format!("/coupons/{coupon_id}"))
            .await
    }

    /// Hand a coupon to one shopper.
    pub async fn admin_assign_coupon(
        &self,
        coupon_id: CouponId,
        user_id: UserId,
    ) -> Result<UserCoupon, GatewayError> {
        let builder = self
            .builder(
                CallCategory::Admin,
                Method::POST,
                &format!("/coupons/{coupon_id}/assign/{user_id}"),
            )
            .await;
        self.dispatch(CallCategory::Admin, builder).await
    }

    /// Hand a coupon to many shoppers at once.
    pub async fn admin_assign_coupon_bulk(
        &self,
        coupon_id: CouponId,
        user_ids: &[UserId],
    ) -> Result<Value, GatewayError> {
        self.post_json(
            CallCategory::Admin,
            &format!("/coupons/{coupon_id}/assign/bulk"),
            &serde_json::json!({ "user_ids": user_ids }),
        )
        .await
    }

    // =========================================================================
    // Auto-issue rules
    // =========================================================================

    /// List automatic coupon issue rules.
    pub async fn admin_auto_issue_rules(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/coupons/auto-issue/rules")
            .await
    }

    /// Create an issue rule.
    pub async fn admin_create_auto_issue_rule(&self, rule: &Value) -> Result<Value, GatewayError> {
        self.post_json(CallCategory::Admin, "/coupons/auto-issue/rules", rule)
            .await
    }

    /// Update an issue rule.
    pub async fn admin_update_auto_issue_rule(
        &self,
        rule_id: RuleId,
        rule: &Value,
    ) -> Result<Value, GatewayError> {
        self.put_json(
            CallCategory::Admin,
            &format!("/coupons/auto-issue/rules/{rule_id}"),
            rule,
        )
        .await
    }

    /// Delete an issue rule.
    pub async fn admin_delete_auto_issue_rule(&self, rule_id: RuleId) -> Result<(), GatewayError> {
        self.delete_unit(
            CallCategory::Admin,
            &format!("/coupons/auto-issue/rules/{rule_id}"),
        )
        .await
    }

    /// Replace the global auto-issue configuration.
    pub async fn admin_set_auto_issue_config(&self, config: &Value) -> Result<Value, GatewayError> {
        self.post_json(CallCategory::Admin, "/coupons/auto-issue/config", config)
            .await
    }

    // =========================================================================
    // Memberships
    // =========================================================================

    /// List every membership.
    pub async fn admin_memberships(&self) -> Result<Vec<Membership>, GatewayError> {
        self.get_json(CallCategory::Admin, "/memberships").await
    }

    /// Open a membership on a shopper's behalf.
    pub async fn admin_create_membership(
        &self,
        user_id: UserId,
        membership: &NewMembership,
    ) -> Result<Membership, GatewayError> {
        self.post_json(
            CallCategory::Admin,
            &format!("/memberships/{user_id}"),
            membership,
        )
        .await
    }

    /// Update a shopper's membership.
    pub async fn admin_update_membership(
        &self,
        user_id: UserId,
        update: &MembershipUpdate,
    ) -> Result<Membership, GatewayError> {
        self.put_json(
            CallCategory::Admin,
            &format!("/memberships/{user_id}"),
            update,
        )
        .await
    }

    /// Close a shopper's membership.
    pub async fn admin_delete_membership(&self, user_id: UserId) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Admin, &format!("/memberships/{user_id}"))
            .await
    }

    // =========================================================================
    // Membership plans
    // =========================================================================

    /// List membership plans.
    pub async fn admin_membership_plans(&self) -> Result<Vec<MembershipPlan>, GatewayError> {
        self.get_json(CallCategory::Admin, "/membership-plans").await
    }

    /// Create a plan.
    pub async fn admin_create_membership_plan(
        &self,
        plan: &NewMembershipPlan,
    ) -> Result<MembershipPlan, GatewayError> {
        self.post_json(CallCategory::Admin, "/membership-plans", plan)
            .await
    }

    /// Update a plan.
    pub async fn admin_update_membership_plan(
        &self,
        plan_id: MembershipPlanId,
        update: &MembershipPlanUpdate,
    ) -> Result<MembershipPlan, GatewayError> {
        self.put_json(
            CallCategory::Admin,
            &format!("/membership-plans/{plan_id}"),
            update,
        )
        .await
    }

    /// Delete a plan.
    pub async fn admin_delete_membership_plan(
        &self,
        plan_id: MembershipPlanId,
    ) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Admin, &format!("/membership-plans/{plan_id}"))
            .await
    }

    // =========================================================================
    // Membership cards
    // =========================================================================

    /// List prepaid cards.
    pub async fn admin_membership_cards(&self) -> Result<Vec<MembershipCard>, GatewayError> {
        self.get_json(CallCategory::Admin, "/membership-cards").await
    }

    /// Create a card.
    pub async fn admin_create_membership_card(
        &self,
        card: &NewMembershipCard,
    ) -> Result<MembershipCard, GatewayError> {
        self.post_json(CallCategory::Admin, "/membership-cards", card)
            .await
    }

    /// Update a card.
    pub async fn admin_update_membership_card(
        &self,
        card_id: MembershipCardId,
        update: &MembershipCardUpdate,
    ) -> Result<MembershipCard, GatewayError> {
        self.put_json(
            CallCategory::Admin,
            &format!("/membership-cards/{card_id}"),
            update,
        )
        .await
    }

    /// Delete a card.
    pub async fn admin_delete_membership_card(
        &self,
        card_id: MembershipCardId,
    ) -> Result<(), GatewayError> {
        self.delete_unit(CallCategory::Admin, &format!("/membership-cards/{card_id}"))
            .await
    }

    // =========================================================================
    // Knowledge base
    // =========================================================================

    /// List knowledge-base documents, optionally scoped by category and
    /// active flag.
    pub async fn knowledge_documents(
        &self,
        category: Option<&str>,
        active: Option<bool>,
    ) -> Result<Vec<KnowledgeDocument>, GatewayError> {
        let mut query = Vec::new();
        if let Some(category) = category {
            let trimmed = category.trim();
            if !trimmed.is_empty() {
                query.push(("category", trimmed.to_owned()));
            }
        }
        // Only an explicit flag narrows the listing; absent means all.
        if let Some(active) = active {
            query.push(("active", active.to_string()));
        }
        self.get_json_query(CallCategory::Admin, "/knowledge-base/documents", &query)
            .await
    }

    /// Create a document by hand.
    pub async fn knowledge_create_document(
        &self,
        document: &NewKnowledgeDocument,
    ) -> Result<KnowledgeDocument, GatewayError> {
        self.post_json(CallCategory::Admin, "/knowledge-base/documents", document)
            .await
    }

    /// Fetch one document.
    pub async fn knowledge_document(
        &self,
        document_id: DocumentId,
    ) -> Result<KnowledgeDocument, GatewayError> {
        self.get_json(
            CallCategory::Admin,
            &format!("/knowledge-base/documents/{document_id}"),
        )
        .await
    }

    /// Update a document; content changes re-chunk server-side.
    pub async fn knowledge_update_document(
        &self,
        document_id: DocumentId,
        update: &KnowledgeDocumentUpdate,
    ) -> Result<KnowledgeDocument, GatewayError> {
        self.put_json(
            CallCategory::Admin,
            &format!("/knowledge-base/documents/{document_id}"),
            update,
        )
        .await
    }

    /// Delete a document and its chunks.
    pub async fn knowledge_delete_document(
        &self,
        document_id: DocumentId,
    ) -> Result<(), GatewayError> {
        self.delete_unit(
            CallCategory::Admin,
            &format!("/knowledge-base/documents/{document_id}"),
        )
        .await
    }

    /// Inspect a document's indexed chunks.
    pub async fn knowledge_document_chunks(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<KnowledgeChunk>, GatewayError> {
        self.get_json(
            CallCategory::Admin,
            &format!("/knowledge-base/documents/{document_id}/chunks"),
        )
        .await
    }

    /// Upload a document file for parsing and embedding. Runs in the
    /// ingestion category; parsing large files is slow.
    #[instrument(skip(self, file, title, category, tags))]
    pub async fn knowledge_upload_document(
        &self,
        file: Attachment,
        title: Option<&str>,
        category: Option<&str>,
        tags: Option<&str>,
    ) -> Result<KnowledgeDocument, GatewayError> {
        let fields = multipart::document_fields(file, title, category, tags);
        self.post_multipart(
            CallCategory::AdminIngestion,
            "/knowledge-base/documents/upload",
            fields,
        )
        .await
    }

    /// Import a document from a URL.
    pub async fn knowledge_import_from_url(
        &self,
        import: &UrlImport,
    ) -> Result<KnowledgeDocument, GatewayError> {
        self.post_json(
            CallCategory::AdminIngestion,
            "/knowledge-base/documents/from-url",
            import,
        )
        .await
    }

    /// Import rows of a backend table as a document.
    pub async fn knowledge_import_from_database(
        &self,
        import: &DatabaseImport,
    ) -> Result<KnowledgeDocument, GatewayError> {
        self.post_json(
            CallCategory::AdminIngestion,
            "/knowledge-base/documents/from-database",
            import,
        )
        .await
    }

    /// Semantic search over the indexed chunks.
    pub async fn knowledge_search(
        &self,
        query: &str,
        top_k: i64,
        category: Option<&str>,
    ) -> Result<Vec<KnowledgeChunk>, GatewayError> {
        let mut params = vec![
            ("query", query.to_owned()),
            ("top_k", top_k.to_string()),
        ];
        if let Some(category) = category {
            params.push(("category", category.to_owned()));
        }
        let builder = self
            .builder(CallCategory::Admin, Method::POST, "/knowledge-base/search")
            .await
            .query(&params);
        self.dispatch(CallCategory::Admin, builder).await
    }

    /// Rebuild the vector index from scratch.
    pub async fn knowledge_rebuild_index(&self) -> Result<Value, GatewayError> {
        let builder = self
            .builder(
                CallCategory::AdminIngestion,
                Method::POST,
                "/knowledge-base/rebuild-index",
            )
            .await;
        self.dispatch(CallCategory::AdminIngestion, builder).await
    }

    // =========================================================================
    // Cache management
    // =========================================================================

    /// Backend cache health and key counts.
    pub async fn admin_cache_status(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/cache/status").await
    }

    /// Flush the backend cache.
    pub async fn admin_clear_cache(&self) -> Result<Value, GatewayError> {
        let builder = self
            .builder(CallCategory::Admin, Method::POST, "/cache/clear")
            .await;
        self.dispatch(CallCategory::Admin, builder).await
    }

    /// Drop cache keys matching a pattern.
    pub async fn admin_delete_cache_pattern(
        &self,
        pattern: &str,
    ) -> Result<Value, GatewayError> {
        let builder = self
            .builder(
                CallCategory::Admin,
                Method::DELETE,
                &format!("/cache/{pattern}"),
            )
            .await;
        self.dispatch(CallCategory::Admin, builder).await
    }

    // =========================================================================
    // Log inspection
    // =========================================================================

    /// List backend log files.
    pub async fn admin_log_files(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/logs/files").await
    }

    /// Aggregate log statistics.
    pub async fn admin_log_stats(&self) -> Result<Value, GatewayError> {
        self.get_json(CallCategory::Admin, "/logs/stats").await
    }

    /// Read a log file, newest lines first by default.
    pub async fn admin_read_log_file(
        &self,
        filename: &str,
        lines: i64,
        level: Option<&str>,
        search: Option<&str>,
        reverse: bool,
    ) -> Result<Value, GatewayError> {
        let mut query = vec![
            ("lines", lines.to_string()),
            ("reverse", reverse.to_string()),
        ];
        if let Some(level) = level {
            query.push(("level", level.to_owned()));
        }
        if let Some(search) = search {
            query.push(("search", search.to_owned()));
        }
        self.get_json_query(CallCategory::Admin, &format!("/logs/read/{filename}"), &query)
            .await
    }

    /// Truncate a log file.
    pub async fn admin_clear_log_file(&self, filename: &str) -> Result<Value, GatewayError> {
        let builder = self
            .builder(
                CallCategory::Admin,
                Method::DELETE,
                &format!("/logs/clear/{filename}"),
            )
            .await;
        self.dispatch(CallCategory::Admin, builder).await
    }
}
