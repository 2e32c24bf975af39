//! Card generation: four concurrent sub-requests joined into one [`Card`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::card::Card;
use crate::config::ModelsConfig;
use crate::error::FlashcardError;
use crate::ports::{ImageGenerator, LanguageModel};
use crate::prompts::{self, IPA_LABEL};

/// Generates flashcards from an expression.
///
/// Cloning is cheap; clones share the same client handles.
#[derive(Clone)]
pub struct CardGenerator {
    language_model: Arc<dyn LanguageModel>,
    images: Arc<dyn ImageGenerator>,
    models: ModelsConfig,
}

impl CardGenerator {
    /// Create a generator over the given ports.
    #[must_use]
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        images: Arc<dyn ImageGenerator>,
        models: ModelsConfig,
    ) -> Self {
        Self { language_model, images, models }
    }

    /// Generate a card for `expression`.
    ///
    /// Never fails: every sub-request failure is logged and replaced by the
    /// field's placeholder (or, for the illustration, no image).
    pub async fn generate(&self, expression: &str) -> Card {
        info!(expression, "generating card");

        let (phonetic, explanation, usage_examples, image_url) = tokio::join!(
            self.pronunciation(expression),
            self.explanation(expression),
            self.usage_examples(expression),
            self.illustration(expression),
        );

        Card::assemble(
            expression,
            logged(expression, "pronunciation", phonetic),
            logged(expression, "explanation", explanation),
            logged(expression, "usage_examples", usage_examples),
            logged(expression, "illustration", image_url),
        )
    }

    async fn pronunciation(&self, expression: &str) -> Result<String, FlashcardError> {
        let request = prompts::pronunciation(expression, &self.models);
        let response = self.language_model.complete(&request).await?;
        parse_ipa(&response.text).ok_or_else(|| {
            FlashcardError::EmptyResponse(format!("no line starting with '{IPA_LABEL}' in reply"))
        })
    }

    async fn explanation(&self, expression: &str) -> Result<String, FlashcardError> {
        let request = prompts::explanation(expression, &self.models);
        let response = self.language_model.complete(&request).await?;
        let text = response.text.trim();
        if text.is_empty() {
            return Err(FlashcardError::EmptyResponse("blank explanation".into()));
        }
        Ok(text.to_string())
    }

    async fn usage_examples(&self, expression: &str) -> Result<Vec<String>, FlashcardError> {
        let request = prompts::usage_examples(expression, &self.models);
        let response = self.language_model.complete(&request).await?;
        let examples = split_examples(&response.text);
        if examples.is_empty() {
            return Err(FlashcardError::EmptyResponse("no usage examples".into()));
        }
        Ok(examples)
    }

    /// Describe the expression visually, then draw that description.
    async fn illustration(&self, expression: &str) -> Result<String, FlashcardError> {
        let request = prompts::visual_description(expression, &self.models);
        let description = self.language_model.complete(&request).await?.text;

        let request = prompts::illustration(expression, description.trim(), &self.models);
        debug!(expression, prompt = %request.prompt, "requesting illustration");

        let response = self.images.generate(&request).await?;
        response
            .first_url()
            .map(str::to_string)
            .ok_or_else(|| FlashcardError::EmptyResponse("no image returned".into()))
    }
}

/// Log a failed sub-request before its placeholder takes over.
fn logged<T>(
    expression: &str,
    sub_request: &str,
    result: Result<T, FlashcardError>,
) -> Result<T, FlashcardError> {
    if let Err(ref error) = result {
        warn!(expression, sub_request, %error, "sub-request failed, using placeholder");
    }
    result
}

/// Extract the transcription from a reply containing a line like `IPA: /həˈloʊ/`.
///
/// When several lines carry the label, the last one with a value wins.
#[must_use]
pub fn parse_ipa(reply: &str) -> Option<String> {
    reply
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(IPA_LABEL))
        .map(str::trim)
        .filter(|phonetic| !phonetic.is_empty())
        .last()
        .map(str::to_string)
}

/// Split a reply into one example per non-blank line, trimmed, in order.
#[must_use]
pub fn split_examples(reply: &str) -> Vec<String> {
    reply.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect()
}
