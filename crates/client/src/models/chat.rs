//! Customer-service chat DTOs.

use chrono::NaiveDateTime;
use plumcot_core::{ChatMessageId, ChatRole, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// One stored chat message (shopper question or assistant reply).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub user_id: UserId,
    pub product_id: Option<ProductId>,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub retracted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Chat submission payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewChatMessage {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Retrieved conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    pub items: Vec<ChatMessage>,
}

/// Optional filters for history retrieval.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Inclusive ISO start bound.
    pub start: Option<String>,
    /// Inclusive ISO end bound.
    pub end: Option<String>,
    /// Maximum number of messages.
    pub limit: Option<i64>,
}

/// Outcome of clearing a conversation: how many messages were removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryCleared {
    pub deleted: i64,
}

/// Outcome of retracting a single message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRetracted {
    pub deleted: bool,
}

/// Filters for the admin chat moderation listing.
#[derive(Debug, Clone, Default)]
pub struct AdminChatFilter {
    pub user_id: Option<UserId>,
    pub product_id: Option<ProductId>,
    pub role: Option<ChatRole>,
    /// Free-text search over message content.
    pub q: Option<String>,
    pub limit: Option<i64>,
}
