//! Endpoint policy: one category per outbound call.
//!
//! Every call the gateway issues is assigned exactly one [`CallCategory`]
//! before dispatch. The category fixes the logical backend (base path), the
//! per-call timeout, and whether the administrator credential is attached.
//! The mapping is immutable at runtime; these constants are the only place
//! the values live.

use std::time::Duration;

/// Logical class of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallCategory {
    /// Ordinary shopper-facing calls.
    Storefront,
    /// Customer-service chat. First use can trigger model warm-up on the
    /// backend, so the deadline is generous.
    Conversation,
    /// Chat submissions carrying image/file/audio attachments.
    ConversationUpload,
    /// Ordinary administrator calls, statistics queries included.
    Admin,
    /// Document ingestion: upload, parsing, and embedding.
    AdminIngestion,
}

impl CallCategory {
    /// Every category, for table-driven checks.
    pub const ALL: [Self; 5] = [
        Self::Storefront,
        Self::Conversation,
        Self::ConversationUpload,
        Self::Admin,
        Self::AdminIngestion,
    ];

    /// Base path of the logical backend this category targets.
    #[must_use]
    pub const fn base_path(self) -> &'static str {
        match self {
            Self::Storefront | Self::Conversation | Self::ConversationUpload => "/api",
            Self::Admin | Self::AdminIngestion => "/adminapi",
        }
    }

    /// Deadline applied to each call in this category.
    #[must_use]
    pub const fn timeout(self) -> Duration {
        match self {
            Self::Storefront | Self::Admin => Duration::from_secs(30),
            Self::Conversation | Self::ConversationUpload => Duration::from_secs(300),
            Self::AdminIngestion => Duration::from_secs(120),
        }
    }

    /// Whether calls in this category carry the administrator credential.
    #[must_use]
    pub const fn requires_admin_auth(self) -> bool {
        matches!(self, Self::Admin | Self::AdminIngestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_table() {
        let expected = [
            (CallCategory::Storefront, 30),
            (CallCategory::Conversation, 300),
            (CallCategory::ConversationUpload, 300),
            (CallCategory::Admin, 30),
            (CallCategory::AdminIngestion, 120),
        ];
        for (category, seconds) in expected {
            assert_eq!(
                category.timeout(),
                Duration::from_secs(seconds),
                "timeout for {category:?}"
            );
        }
    }

    #[test]
    fn test_base_path_table() {
        for category in CallCategory::ALL {
            let expected = if category.requires_admin_auth() {
                "/adminapi"
            } else {
                "/api"
            };
            assert_eq!(category.base_path(), expected, "base path for {category:?}");
        }
    }

    #[test]
    fn test_admin_auth_only_on_admin_paths() {
        assert!(CallCategory::Admin.requires_admin_auth());
        assert!(CallCategory::AdminIngestion.requires_admin_auth());
        assert!(!CallCategory::Storefront.requires_admin_auth());
        assert!(!CallCategory::Conversation.requires_admin_auth());
        assert!(!CallCategory::ConversationUpload.requires_admin_auth());
    }

    #[test]
    fn test_all_lists_every_category_once() {
        let mut seen = std::collections::HashSet::new();
        for category in CallCategory::ALL {
            assert!(seen.insert(category), "{category:?} listed twice");
        }
        assert_eq!(seen.len(), 5);
    }
}
