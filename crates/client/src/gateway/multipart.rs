//! Deterministic multipart encoding.
//!
//! Attachment-bearing calls (chat submissions, document and image upload)
//! encode an ordinary payload plus named collections of binary attachments
//! as one multipart body. Field order is fixed: scalar fields first, then
//! each attachment collection in its caller-specified order. No backend
//! constraint requires this, but the ordering must stay deterministic for
//! reproducible tests.

use plumcot_core::{ProductId, UserId};
use reqwest::multipart::{Form, Part};

use crate::error::GatewayError;

/// A binary attachment for a multipart call.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name reported to the backend.
    pub file_name: String,
    /// MIME type, when known.
    pub mime_type: Option<String>,
    /// Raw content.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// An attachment with no declared MIME type.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    /// Declare the attachment's MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Attachment collections accepted by a chat submission, encoded in this
/// fixed order: images, files, audios.
#[derive(Debug, Clone, Default)]
pub struct ChatAttachments {
    pub images: Vec<Attachment>,
    pub files: Vec<Attachment>,
    pub audios: Vec<Attachment>,
}

impl ChatAttachments {
    /// Whether no attachment is present in any collection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.files.is_empty() && self.audios.is_empty()
    }
}

/// One ordered field of a multipart body.
#[derive(Debug)]
pub(crate) enum MultipartField {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        attachment: Attachment,
    },
}

impl MultipartField {
    /// Field name as it appears on the wire.
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Fields of an attachment-bearing chat submission: scalars first, then
/// `images`, `files`, `audios`. Empty collections contribute no parts.
pub(crate) fn chat_fields(
    user_id: UserId,
    product_id: Option<ProductId>,
    message: &str,
    attachments: ChatAttachments,
    model: Option<&str>,
) -> Vec<MultipartField> {
    let mut fields = vec![MultipartField::Text {
        name: "user_id",
        value: user_id.to_string(),
    }];
    if let Some(product_id) = product_id {
        fields.push(MultipartField::Text {
            name: "product_id",
            value: product_id.to_string(),
        });
    }
    fields.push(MultipartField::Text {
        name: "message",
        value: message.to_owned(),
    });
    if let Some(model) = model {
        fields.push(MultipartField::Text {
            name: "model",
            value: model.to_owned(),
        });
    }

    let collections = [
        ("images", attachments.images),
        ("files", attachments.files),
        ("audios", attachments.audios),
    ];
    for (name, collection) in collections {
        for attachment in collection {
            fields.push(MultipartField::File { name, attachment });
        }
    }

    fields
}

/// Fields of a knowledge-base document upload: metadata scalars, then the
/// document itself.
pub(crate) fn document_fields(
    file: Attachment,
    title: Option<&str>,
    category: Option<&str>,
    tags: Option<&str>,
) -> Vec<MultipartField> {
    let mut fields = Vec::new();
    for (name, value) in [("title", title), ("category", category), ("tags", tags)] {
        if let Some(value) = value {
            fields.push(MultipartField::Text {
                name,
                value: value.to_owned(),
            });
        }
    }
    fields.push(MultipartField::File {
        name: "file",
        attachment: file,
    });
    fields
}

/// Fields of a product image upload.
pub(crate) fn image_fields(file: Attachment) -> Vec<MultipartField> {
    vec![MultipartField::File {
        name: "file",
        attachment: file,
    }]
}

/// Convert ordered fields into a `reqwest` form, preserving order.
///
/// # Errors
///
/// Returns an error when an attachment declares a malformed MIME type.
pub(crate) fn into_form(fields: Vec<MultipartField>) -> Result<Form, GatewayError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name, value),
            MultipartField::File { name, attachment } => {
                let mut part =
                    Part::bytes(attachment.bytes).file_name(attachment.file_name);
                if let Some(mime_type) = &attachment.mime_type {
                    part = part.mime_str(mime_type)?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(fields: &[MultipartField]) -> Vec<&'static str> {
        fields.iter().map(MultipartField::name).collect()
    }

    #[test]
    fn test_chat_fields_scalars_then_collections() {
        let attachments = ChatAttachments {
            images: vec![
                Attachment::new("a.png", vec![1]),
                Attachment::new("b.png", vec![2]),
            ],
            files: vec![],
            audios: vec![Attachment::new("c.wav", vec![3])],
        };
        let fields = chat_fields(UserId::new(7), None, "hi", attachments, None);

        assert_eq!(
            names(&fields),
            vec!["user_id", "message", "images", "images", "audios"]
        );

        // Attachment order within a collection is preserved.
        let file_names: Vec<&str> = fields
            .iter()
            .filter_map(|field| match field {
                MultipartField::File { attachment, .. } => Some(attachment.file_name.as_str()),
                MultipartField::Text { .. } => None,
            })
            .collect();
        assert_eq!(file_names, vec!["a.png", "b.png", "c.wav"]);
    }

    #[test]
    fn test_chat_fields_with_all_scalars() {
        let fields = chat_fields(
            UserId::new(7),
            Some(ProductId::new(3)),
            "hi",
            ChatAttachments::default(),
            Some("compact"),
        );
        assert_eq!(
            names(&fields),
            vec!["user_id", "product_id", "message", "model"]
        );
    }

    #[test]
    fn test_chat_scalar_values() {
        let fields = chat_fields(
            UserId::new(7),
            None,
            "hi",
            ChatAttachments::default(),
            None,
        );
        let values: Vec<&str> = fields
            .iter()
            .filter_map(|field| match field {
                MultipartField::Text { value, .. } => Some(value.as_str()),
                MultipartField::File { .. } => None,
            })
            .collect();
        assert_eq!(values, vec!["7", "hi"]);
    }

    #[test]
    fn test_document_fields_metadata_then_file() {
        let fields = document_fields(
            Attachment::new("faq.pdf", vec![0]),
            Some("FAQ"),
            None,
            Some("faq,help"),
        );
        assert_eq!(names(&fields), vec!["title", "tags", "file"]);
    }

    #[test]
    fn test_image_fields_single_part() {
        let fields = image_fields(Attachment::new("cover.jpg", vec![0]));
        assert_eq!(names(&fields), vec!["file"]);
    }

    #[test]
    fn test_into_form_accepts_valid_mime() {
        let fields = vec![MultipartField::File {
            name: "file",
            attachment: Attachment::new("a.png", vec![1]).with_mime_type("image/png"),
        }];
        assert!(into_form(fields).is_ok());
    }

    #[test]
    fn test_into_form_rejects_malformed_mime() {
        let fields = vec![MultipartField::File {
            name: "file",
            attachment: Attachment::new("a.png", vec![1]).with_mime_type("not a mime"),
        }];
        assert!(into_form(fields).is_err());
    }

    #[test]
    fn test_empty_attachments() {
        assert!(ChatAttachments::default().is_empty());
        let with_image = ChatAttachments {
            images: vec![Attachment::new("a.png", vec![1])],
            ..ChatAttachments::default()
        };
        assert!(!with_image.is_empty());
    }
}
