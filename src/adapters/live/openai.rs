//! Live adapter for the `OpenAI` chat completion and image generation APIs.

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use crate::error::FlashcardError;
use crate::ports::image_generator::{
    GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest, ImageResponse,
};
use crate::ports::language_model::{
    ChatRequest, ChatResponse, CompleteFuture, LanguageModel, Role,
};

/// Default base URL of the `OpenAI` REST API.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Live `OpenAI` client. One instance serves both ports; it holds no
/// per-request state.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl OpenAiClient {
    /// Create a new client with the given API key and base URL.
    #[must_use]
    pub fn new(api_key: String, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client: Client::new(), api_key, api_base }
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<String, FlashcardError> {
        let response = self
            .client
            .post(format!("{}{path}", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await?;
        read_body(response).await
    }
}

/// Read the body of a response, turning non-2xx statuses into [`FlashcardError::Api`].
async fn read_body(response: Response) -> Result<String, FlashcardError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        Ok(text)
    } else {
        Err(FlashcardError::Api { status: status.as_u16(), message: text })
    }
}

fn truncate(body: &str) -> String {
    if body.len() > 500 {
        let cut = (0..=500).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

impl LanguageModel for OpenAiClient {
    fn complete(&self, request: &ChatRequest) -> CompleteFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            debug!(
                model = %request.model,
                persona = request.message(Role::System).unwrap_or_default(),
                "requesting chat completion"
            );
            let mut body = serde_json::json!({
                "model": request.model,
                "messages": request.messages,
                "temperature": request.temperature,
            });
            if let Some(max_tokens) = request.max_tokens {
                body["max_tokens"] = max_tokens.into();
            }

            let response_text = self.post("/chat/completions", &body).await?;

            let parsed: ChatCompletion = serde_json::from_str(&response_text).map_err(|e| {
                FlashcardError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            let text = parsed
                .choices
                .into_iter()
                .find_map(|choice| choice.message.content)
                .map(|content| content.trim().to_string())
                .filter(|content| !content.is_empty())
                .ok_or_else(|| {
                    FlashcardError::EmptyResponse(format!(
                        "No completion in response. Body: {}",
                        truncate(&response_text)
                    ))
                })?;

            Ok(ChatResponse { text })
        })
    }
}

impl ImageGenerator for OpenAiClient {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            debug!(model = %request.model, size = %request.size, "requesting image");
            let body = serde_json::json!({
                "model": request.model,
                "prompt": request.prompt,
                "n": request.count,
                "size": request.size,
                "quality": request.quality,
            });

            let response_text = self.post("/images/generations", &body).await?;

            let parsed: ImagesResponse = serde_json::from_str(&response_text).map_err(|e| {
                FlashcardError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            let images: Vec<GeneratedImage> = parsed
                .data
                .into_iter()
                .filter_map(|item| item.url)
                .map(|url| GeneratedImage { url })
                .collect();

            if images.is_empty() {
                return Err(FlashcardError::EmptyResponse(format!(
                    "No images in response. Body: {}",
                    truncate(&response_text)
                )));
            }

            Ok(ImageResponse { images })
        })
    }
}

// --- OpenAI API response types ---

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ImagesResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
}
