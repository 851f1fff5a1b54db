//! Turning the generative service's answer into validated questions.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ResponseError;
use crate::models::{OPTION_COUNT, QuestionRecord};

use super::MAX_QUESTIONS;

/// Inbound body: an ordered list of segments, some of them carrying text.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
pub struct Segment {
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text segments joined in order, one per line.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|segment| segment.text.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Remove Markdown code fences around the JSON payload.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse and validate the answer text. The whole set fails on the first bad
/// element; a valid set longer than [`MAX_QUESTIONS`] is truncated.
pub fn parse_questions(text: &str) -> Result<Vec<QuestionRecord>, ResponseError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(ResponseError::EmptyText);
    }

    let value: Value = serde_json::from_str(&cleaned)?;
    let Value::Array(items) = value else {
        return Err(ResponseError::NotAnArray);
    };
    if items.is_empty() {
        return Err(ResponseError::NoQuestions);
    }

    let mut questions = items
        .iter()
        .enumerate()
        .map(|(index, item)| validate(index, item))
        .collect::<Result<Vec<_>, _>>()?;
    questions.truncate(MAX_QUESTIONS);
    Ok(questions)
}

fn validate(index: usize, item: &Value) -> Result<QuestionRecord, ResponseError> {
    let invalid = |reason: &str| ResponseError::InvalidQuestion {
        index,
        reason: reason.to_string(),
    };

    let object = item.as_object().ok_or_else(|| invalid("not an object"))?;

    let question = object
        .get("question")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("`question` must be a string"))?;

    let options = object
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("`options` must be an array"))?;
    if options.len() != OPTION_COUNT {
        return Err(invalid(&format!(
            "expected {OPTION_COUNT} options, got {}",
            options.len()
        )));
    }
    let options = options
        .iter()
        .map(|option| option.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid("every option must be a string"))?;
    let options: [String; OPTION_COUNT] = options
        .try_into()
        .map_err(|_| invalid("wrong number of options"))?;

    let correct = object
        .get("correct")
        .and_then(Value::as_u64)
        .ok_or_else(|| invalid("`correct` must be a non-negative integer"))?;

    usize::try_from(correct)
        .ok()
        .and_then(|correct| QuestionRecord::new(question.to_string(), options, correct))
        .ok_or_else(|| invalid("`correct` must be between 0 and 4"))
}
