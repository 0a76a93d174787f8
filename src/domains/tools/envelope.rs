//! Success envelopes returned by the dispatcher.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};

/// A single unit of response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    /// Plain text.
    Text { text: String },

    /// Base64-encoded image bytes.
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// The text of a text item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }
}

impl From<ContentItem> for Content {
    fn from(item: ContentItem) -> Self {
        match item {
            ContentItem::Text { text } => Content::text(text),
            ContentItem::Image { data, mime_type } => Content::image(data, mime_type),
        }
    }
}

/// Machine-facing mirror of an envelope's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContent {
    pub content: Vec<ContentItem>,
}

/// The uniform success response of a tool invocation.
///
/// `content` is never empty. When `structured_content` is present its
/// `content` is identical to the display `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub content: Vec<ContentItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<StructuredContent>,
}

impl Envelope {
    /// An envelope carrying only display content.
    pub fn new(content: Vec<ContentItem>) -> Self {
        Self {
            content,
            structured_content: None,
        }
    }

    /// An envelope whose content is mirrored into `structured_content`.
    pub fn mirrored(content: Vec<ContentItem>) -> Self {
        Self {
            structured_content: Some(StructuredContent {
                content: content.clone(),
            }),
            content,
        }
    }

    /// Concatenated text of all text items.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentItem::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Envelope> for CallToolResult {
    fn from(envelope: Envelope) -> Self {
        let structured = envelope
            .structured_content
            .and_then(|s| serde_json::to_value(s).ok());

        CallToolResult {
            content: envelope.content.into_iter().map(Content::from).collect(),
            structured_content: structured,
            is_error: Some(false),
            meta: None,
        }
    }
}
