//! Core trait definitions for generation providers.
//!
//! The async [`GenerationProvider`] trait is implemented by the
//! `pagequiz-providers` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::ImagePart;

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Sampling temperature for quiz generation. Favors variety over
/// reproducibility.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Output budget large enough for several dozen questions.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 32_768;

/// Trait for multimodal backends that turn page images into quiz text.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send the images and instruction in one request and return the raw text.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;
}

/// Request to generate a quiz from page images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-3-pro-preview").
    pub model: String,
    /// Instruction text, sent after the images.
    pub prompt: String,
    /// Encoded page images in page order.
    pub images: Vec<ImagePart>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl GenerateRequest {
    /// A request with the default model and sampling settings.
    pub fn new(prompt: impl Into<String>, images: Vec<ImagePart>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            prompt: prompt.into(),
            images,
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Response from a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The raw response text.
    pub content: String,
    /// Model that actually generated the response.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl GenerationProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
            Ok(GenerateResponse {
                content: format!("{} images", request.images.len()),
                model: request.model.clone(),
                token_usage: TokenUsage::default(),
                latency_ms: 0,
            })
        }
    }

    #[test]
    fn request_defaults() {
        let request = GenerateRequest::new("prompt", vec![]);
        assert_eq!(request.model, "gemini-3-pro-preview");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 32_768);
    }

    #[tokio::test]
    async fn provider_is_object_safe() {
        let provider: Box<dyn GenerationProvider> = Box::new(EchoProvider);
        let image = ImagePart {
            mime_type: "image/png".into(),
            data: "AAAA".into(),
        };
        let request = GenerateRequest::new("prompt", vec![image.clone(), image]);

        let response = provider.generate(&request).await.unwrap();
        assert_eq!(provider.name(), "echo");
        assert_eq!(response.content, "2 images");
    }
}
