//! Gemini Language Model Adapter
//!
//! Implements the LanguageModel trait against the Gemini `generateContent` REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompts::{aggregation_prompt, book_prompt};
use crate::domain::gateways::LanguageModel;
use crate::domain::models::{Book, ConversationContext, GeneratedResponse};
use crate::infrastructure::driven_adapters::config::LlmConfig;
use crate::shared::errors::GatewayError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate, if it has any
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        (!text.trim().is_empty()).then_some(text)
    }
}

pub struct GeminiLanguageModel {
    client: reqwest::Client,
    config: LlmConfig,
}

impl GeminiLanguageModel {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        };

        // The API key travels in the query string, so URLs are stripped from errors
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.expose())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Llm(format!("Gemini request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map_or(body, |envelope| envelope.error.message);
            return Err(GatewayError::Llm(format!("Gemini returned {status}: {message}")));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GatewayError::Llm(format!("Invalid Gemini response: {}", e.without_url())))?
            .into_text()
            .ok_or_else(|| GatewayError::Llm("Gemini returned no text".to_string()))
    }
}

#[async_trait]
impl LanguageModel for GeminiLanguageModel {
    async fn generate_response(
        &self,
        book: &Book,
        conversation: &ConversationContext,
        query: &str,
    ) -> Result<GeneratedResponse, GatewayError> {
        let prompt = book_prompt(book, conversation, query);
        let content = self.generate(&prompt).await.inspect_err(|e| {
            tracing::error!(book = %book.title, error = %e, "Gemini generation failed");
        })?;

        Ok(GeneratedResponse::new(&book.title, content))
    }

    async fn aggregate_responses(
        &self,
        responses: &[GeneratedResponse],
        query: &str,
    ) -> Result<String, GatewayError> {
        let prompt = aggregation_prompt(responses, query);
        self.generate(&prompt).await.inspect_err(|e| {
            tracing::error!(responses = responses.len(), error = %e, "Response aggregation failed");
        })
    }
}
