//! Outbound request body for the generative service.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::models::UploadedFile;

use super::MAX_QUESTIONS;

/// Media type the document attachment is tagged with.
pub const PRESENTATION_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Instruction block sent next to the attached document.
pub fn prompt() -> String {
    format!(
        "Create {MAX_QUESTIONS} short multiple-choice questions with 5 options each from the \
attached presentation. Respond with JSON only, nothing else, in this format:

[
  {{
    \"question\": \"Question text?\",
    \"options\": [\"A) Option 1\", \"B) Option 2\", \"C) Option 3\", \"D) Option 4\", \"E) Option 5\"],
    \"correct\": 0
  }}
]

Keep the questions short and clear. The correct answer index must be between 0 and 4."
    )
}

#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Document { source: DocumentSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
pub struct DocumentSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media_type: &'static str,
    pub data: String,
}

impl<'a> MessagesRequest<'a> {
    /// Single user turn: the base64 document followed by the fixed prompt.
    pub fn for_document(model: &'a str, max_tokens: u32, document: &UploadedFile) -> Self {
        Self {
            model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Document {
                        source: DocumentSource {
                            kind: "base64",
                            media_type: PRESENTATION_MEDIA_TYPE,
                            data: STANDARD.encode(&document.bytes),
                        },
                    },
                    ContentBlock::Text { text: prompt() },
                ],
            }],
        }
    }
}
