//! Question-set generation through an external generative-text service.

mod client;
pub mod request;
pub mod response;

use async_trait::async_trait;

use crate::error::GenerateError;
use crate::models::{QuestionRecord, UploadedFile};

pub use client::{ClientSettings, HttpQuestionService};
pub use response::parse_questions;

/// Number of questions asked for, and the most ever kept.
pub const MAX_QUESTIONS: usize = 20;

/// Something that turns a presentation into a validated question set.
#[async_trait]
pub trait QuestionService: Send + Sync {
    /// Generate questions from `document`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError` when the request cannot complete or the
    /// answer does not hold a valid question array.
    async fn generate(&self, document: &UploadedFile) -> Result<Vec<QuestionRecord>, GenerateError>;
}
