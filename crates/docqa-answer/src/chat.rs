//! Chat-completion answerer for OpenAI-compatible APIs.
//!
//! The client is built once from [`ChatSettings`] and shared by reference.
//! Construction fails when no API key is configured, so a missing key never
//! reaches the network.

use std::time::Duration;

use docqa_core::{Answer, AppConfig, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use reqwest::{Client, Url};

use crate::error::{ChatError, RequestContext};
use crate::prompt::{user_message, SYSTEM_PROMPT};
use crate::types::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Confidence attached to every chat-completion answer.
pub const CHAT_CONFIDENCE: f32 = 0.95;

pub const TEMPERATURE: f64 = 0.7;

pub const MAX_TOKENS: u32 = 500;

/// Inputs for [`ChatAnswerer::new`].
#[derive(Clone)]
pub struct ChatSettings {
    pub api_key: Option<String>,
    pub model: String,
    /// API root up to and including the version segment, e.g.
    /// `https://api.openai.com/v1`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ChatSettings {
    /// Settings for the public OpenAI API with the default model.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            base_url: config.openai_base_url.clone(),
            timeout_secs: config.http_timeout_secs,
        }
    }
}

impl std::fmt::Debug for ChatSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Answers document questions through a chat-completion API.
pub struct ChatAnswerer {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl ChatAnswerer {
    /// Builds the answerer and its HTTP client.
    ///
    /// # Errors
    ///
    /// - [`ChatError::MissingApiKey`] if `settings.api_key` is absent or blank.
    /// - [`ChatError::InvalidBaseUrl`] if `settings.base_url` is not a URL.
    /// - [`ChatError::ClientBuild`] if the `reqwest::Client` cannot be built.
    pub fn new(settings: ChatSettings) -> Result<Self, ChatError> {
        let Some(api_key) = settings.api_key.filter(|k| !k.trim().is_empty()) else {
            tracing::error!(has_api_key = false, "OpenAI API key is missing from config");
            return Err(ChatError::MissingApiKey);
        };

        let raw = format!("{}/chat/completions", settings.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|e| ChatError::InvalidBaseUrl {
            base_url: settings.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("docqa/0.1 (chat)")
            .build()
            .map_err(ChatError::ClientBuild)?;

        tracing::debug!(model = %settings.model, endpoint = %endpoint, "chat answerer initialized");

        Ok(Self {
            client,
            api_key,
            model: settings.model,
            endpoint,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks the model `question` about `document_text`.
    ///
    /// The document is sent whole. The returned answer carries
    /// [`CHAT_CONFIDENCE`]. Failures are logged and returned unchanged;
    /// nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`ChatError::Http`] on network failure.
    /// - [`ChatError::Api`] if the API returns a non-2xx status.
    /// - [`ChatError::Json`] if the body is not a chat completion.
    /// - [`ChatError::EmptyCompletion`] if the first choice has no content.
    pub async fn answer(&self, question: &str, document_text: &str) -> Result<Answer, ChatError> {
        tracing::info!(
            has_api_key = true,
            question,
            document_length = document_text.len(),
            model = %self.model,
            "requesting chat completion"
        );

        let context = RequestContext {
            model: self.model.clone(),
            question_length: question.len(),
            document_length: document_text.len(),
        };

        match self.complete(question, document_text, context).await {
            Ok(text) => Ok(Answer::new(text, CHAT_CONFIDENCE)),
            Err(e) => {
                tracing::error!(
                    kind = %e.kind(),
                    error = %e,
                    causes = %source_chain(&e),
                    has_api_key = true,
                    "chat completion failed"
                );
                Err(e)
            }
        }
    }

    async fn complete(
        &self,
        question: &str,
        document_text: &str,
        context: RequestContext,
    ) -> Result<String, ChatError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_message(document_text, question)),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = match self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(source) => return Err(ChatError::Http { context, source }),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => return Err(ChatError::Http { context, source }),
        };

        if !status.is_success() {
            let message = api_error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(ChatError::Api {
                context,
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = match serde_json::from_str(&body) {
            Ok(completion) => completion,
            Err(source) => return Err(ChatError::Json { context, source }),
        };

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                id = completion.id.as_deref().unwrap_or_default(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion received"
            );
        }

        let Some(choice) = completion.choices.into_iter().next() else {
            return Err(ChatError::EmptyCompletion { context });
        };
        tracing::debug!(finish_reason = choice.finish_reason.as_deref().unwrap_or_default());
        choice
            .message
            .content
            .ok_or(ChatError::EmptyCompletion { context })
    }
}

/// Extracts `error.message` (prefixed with `error.type` when present) from
/// an OpenAI error body. Falls back to the trimmed raw body.
fn api_error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return Some(match parsed.error.error_type {
            Some(kind) => format!("{kind}: {}", parsed.error.message),
            None => parsed.error.message,
        });
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.chars().take(200).collect())
}

/// Renders an error's `source()` chain, outermost first.
fn source_chain(err: &dyn std::error::Error) -> String {
    let mut causes = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    causes.join(": ")
}

#[cfg(test)]
mod tests {
    use docqa_core::ErrorKind;

    use super::*;

    fn settings(api_key: Option<&str>) -> ChatSettings {
        ChatSettings::new(api_key.map(str::to_string))
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = ChatAnswerer::new(settings(None)).err().expect("must fail");
        assert!(matches!(err, ChatError::MissingApiKey));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.context().is_none());
    }

    #[test]
    fn blank_key_is_treated_as_missing() {
        let err = ChatAnswerer::new(settings(Some("  "))).err().unwrap();
        assert!(matches!(err, ChatError::MissingApiKey));
    }

    #[test]
    fn endpoint_appends_chat_completions() {
        let answerer = ChatAnswerer::new(settings(Some("sk-test"))).unwrap();
        assert_eq!(
            answerer.endpoint.as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(answerer.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let mut s = settings(Some("sk-test"));
        s.base_url = "http://localhost:8000/v1/".to_string();
        let answerer = ChatAnswerer::new(s).unwrap();
        assert_eq!(
            answerer.endpoint.as_str(),
            "http://localhost:8000/v1/chat/completions"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut s = settings(Some("sk-test"));
        s.base_url = "::not a url::".to_string();
        let err = ChatAnswerer::new(s).err().unwrap();
        assert!(matches!(err, ChatError::InvalidBaseUrl { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn settings_debug_redacts_key() {
        let rendered = format!("{:?}", settings(Some("sk-secret")));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn api_error_message_prefers_structured_body() {
        let msg = api_error_message(
            r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#,
        );
        assert_eq!(msg.as_deref(), Some("requests: Rate limit reached"));
        assert_eq!(api_error_message("  "), None);
        assert_eq!(api_error_message("upstream down").as_deref(), Some("upstream down"));
    }

    #[test]
    fn source_chain_lists_causes() {
        let err = ChatError::Json {
            context: RequestContext {
                model: "m".to_string(),
                question_length: 1,
                document_length: 2,
            },
            source: serde_json::from_str::<u32>("x").unwrap_err(),
        };
        assert!(!source_chain(&err).is_empty());
    }
}
