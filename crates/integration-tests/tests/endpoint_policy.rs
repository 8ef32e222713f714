//! Endpoint policy table checks.
//!
//! The category table is the single place base paths and timeouts live;
//! these assertions pin the values bit-for-bit.

use std::time::Duration;

use plumcot_client::CallCategory;

// =============================================================================
// Timeout Tiers
// =============================================================================

#[test]
fn test_every_category_has_its_configured_timeout() {
    let expected = [
        (CallCategory::Storefront, Duration::from_secs(30)),
        (CallCategory::Conversation, Duration::from_secs(300)),
        (CallCategory::ConversationUpload, Duration::from_secs(300)),
        (CallCategory::Admin, Duration::from_secs(30)),
        (CallCategory::AdminIngestion, Duration::from_secs(120)),
    ];

    assert_eq!(expected.len(), CallCategory::ALL.len());
    for (category, timeout) in expected {
        assert_eq!(category.timeout(), timeout, "timeout for {category:?}");
    }
}

#[test]
fn test_conversational_categories_share_the_long_deadline() {
    assert_eq!(
        CallCategory::Conversation.timeout(),
        CallCategory::ConversationUpload.timeout()
    );
}

// =============================================================================
// Logical Backends
// =============================================================================

#[test]
fn test_shopper_categories_target_the_shopper_api() {
    for category in [
        CallCategory::Storefront,
        CallCategory::Conversation,
        CallCategory::ConversationUpload,
    ] {
        assert_eq!(category.base_path(), "/api");
        assert!(!category.requires_admin_auth());
    }
}

#[test]
fn test_admin_categories_target_the_admin_api_and_authenticate() {
    for category in [CallCategory::Admin, CallCategory::AdminIngestion] {
        assert_eq!(category.base_path(), "/adminapi");
        assert!(category.requires_admin_auth());
    }
}
