use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::GenerateError;
use crate::models::{QuestionRecord, UploadedFile};

use super::QuestionService;
use super::request::MessagesRequest;
use super::response::{MessagesResponse, parse_questions};

const API_VERSION: &str = "2023-06-01";

/// Connection details for the generative service.
#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub max_document_bytes: usize,
}

impl From<&Settings> for ClientSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            timeout: Duration::from_secs(settings.timeout_secs),
            max_document_bytes: settings.max_document_bytes,
        }
    }
}

/// [`QuestionService`] backed by an HTTP messages endpoint.
#[derive(Clone)]
pub struct HttpQuestionService {
    client: Client,
    settings: ClientSettings,
}

impl HttpQuestionService {
    /// Build the HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest::Error` when the TLS backend cannot
    /// be initialized.
    pub fn new(settings: ClientSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        if let Some(key) = &self.settings.api_key {
            match HeaderValue::from_str(key) {
                Ok(value) => {
                    headers.insert("x-api-key", value);
                }
                Err(_) => warn!("configured API key is not a valid header value, sending without it"),
            }
        }
        headers
    }

    fn map_send_error(&self, err: reqwest::Error) -> GenerateError {
        if err.is_timeout() {
            GenerateError::Timeout(self.settings.timeout)
        } else {
            GenerateError::Network(err)
        }
    }
}

#[async_trait]
impl QuestionService for HttpQuestionService {
    async fn generate(&self, document: &UploadedFile) -> Result<Vec<QuestionRecord>, GenerateError> {
        let limit = self.settings.max_document_bytes;
        if document.size() > limit {
            return Err(GenerateError::PayloadTooLarge {
                name: document.name.clone(),
                size: document.size(),
                limit,
            });
        }

        let payload =
            MessagesRequest::for_document(&self.settings.model, self.settings.max_tokens, document);
        info!(
            document = %document.name,
            bytes = document.size(),
            model = %self.settings.model,
            "requesting question set"
        );

        let response = self
            .client
            .post(&self.settings.api_url)
            .headers(self.headers())
            .json(&payload)
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::HttpStatus(status));
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.map_send_error(err))?;
        let body: MessagesResponse = serde_json::from_str(&body)
            .map_err(|err| GenerateError::MalformedResponse(err.into()))?;
        let text = body.text();
        debug!(chars = text.len(), "received generated text");

        let questions = parse_questions(&text)?;
        info!(count = questions.len(), "question set ready");
        Ok(questions)
    }
}
