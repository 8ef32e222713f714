//! Shopper identity.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Display name used before an identity is resolved and after logout.
pub const DEFAULT_DISPLAY_NAME: &str = "Guest";

/// The shopper account the storefront acts on behalf of.
///
/// An absent `id` means the shopper is anonymous: either bootstrap has not
/// resolved yet, or resolution failed and the application is running
/// without an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopperIdentity {
    /// Backend user id, when resolved.
    pub id: Option<UserId>,
    /// Human-readable display name.
    pub display_name: String,
}

impl ShopperIdentity {
    /// Identity for a resolved shopper.
    #[must_use]
    pub const fn resolved(id: UserId, display_name: String) -> Self {
        Self {
            id: Some(id),
            display_name,
        }
    }

    /// The anonymous identity used before resolution.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: None,
            display_name: DEFAULT_DISPLAY_NAME.to_owned(),
        }
    }

    /// Whether this identity refers to a backend account.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}

impl Default for ShopperIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity() {
        let identity = ShopperIdentity::anonymous();
        assert!(!identity.is_resolved());
        assert_eq!(identity.display_name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_resolved_identity() {
        let identity = ShopperIdentity::resolved(UserId::new(3), "mara".to_owned());
        assert!(identity.is_resolved());
        assert_eq!(identity.id, Some(UserId::new(3)));
    }
}
