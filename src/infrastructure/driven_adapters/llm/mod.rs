//! Language Model Adapters

mod gemini;
mod prompts;

use std::sync::Arc;

pub use gemini::GeminiLanguageModel;

use crate::domain::gateways::LanguageModel;
use crate::infrastructure::driven_adapters::config::LlmConfig;
use crate::shared::errors::GatewayError;

/// Build the language model selected by `config.provider`
///
/// # Errors
///
/// Returns `GatewayError::Configuration` for unknown providers or if the
/// HTTP client cannot be built.
pub fn create_language_model(config: &LlmConfig) -> Result<Arc<dyn LanguageModel>, GatewayError> {
    match config.provider.to_ascii_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiLanguageModel::new(config.clone())?)),
        _ => Err(GatewayError::Configuration(format!(
            "Unsupported LLM provider: {}",
            config.provider
        ))),
    }
}
