use serde::Serialize;

/// A reply the transport should deliver, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outgoing {
    Text { text: String },
    Document(Document),
}

impl Outgoing {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(doc) => Some(doc),
            Self::Text { .. } => None,
        }
    }
}

/// File attachment sent alongside a text reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Document {
    pub file_name: String,
    pub content_type: String,
    pub content: String,
}

impl Document {
    pub fn csv(file_name: impl Into<String>, content: String) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: "text/csv".to_string(),
            content,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}
