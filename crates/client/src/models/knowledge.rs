//! Knowledge-base DTOs (admin document store behind the AI assistant).

use chrono::NaiveDateTime;
use plumcot_core::DocumentId;
use serde::{Deserialize, Serialize};

/// A stored knowledge-base document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    pub source_type: String,
    pub source_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub active: bool,
    pub chunk_count: i64,
    /// JSON-encoded document metadata, when present.
    #[serde(default)]
    pub document_metadata: Option<String>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for creating a document by hand.
#[derive(Debug, Clone, Serialize)]
pub struct NewKnowledgeDocument {
    pub title: String,
    pub content: String,
    pub source_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub active: bool,
}

impl NewKnowledgeDocument {
    /// A manually-entered document with the default source type.
    #[must_use]
    pub fn manual(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            source_type: "manual".to_owned(),
            source_url: None,
            category: None,
            tags: None,
            active: true,
        }
    }
}

/// Partial document update; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KnowledgeDocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// One indexed chunk of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    pub id: i64,
    pub document_id: DocumentId,
    pub chunk_index: i64,
    pub content: String,
    #[serde(default)]
    pub chunk_metadata: Option<String>,
    #[serde(default)]
    pub vector_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for importing a document from a URL.
#[derive(Debug, Clone, Serialize)]
pub struct UrlImport {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// Payload for importing rows of a backend database table.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseImport {
    pub table_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}
