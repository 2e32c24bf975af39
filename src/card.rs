//! The flashcard record and its degraded-result policy.

use serde::Serialize;

use crate::error::FlashcardError;

/// Shown when the pronunciation lookup fails.
pub const PHONETIC_PLACEHOLDER: &str = "Not available";

/// A generated flashcard. Built once per request and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    expression: String,
    phonetic: String,
    explanation: String,
    usage_examples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl Card {
    /// Assemble a card from the outcome of each sub-request.
    ///
    /// Failed text fields take their placeholder; a failed illustration
    /// leaves `image_url` unset.
    #[must_use]
    pub fn assemble(
        expression: &str,
        phonetic: Result<String, FlashcardError>,
        explanation: Result<String, FlashcardError>,
        usage_examples: Result<Vec<String>, FlashcardError>,
        image_url: Result<String, FlashcardError>,
    ) -> Self {
        Self {
            expression: expression.to_string(),
            phonetic: phonetic.unwrap_or_else(|_| PHONETIC_PLACEHOLDER.to_string()),
            explanation: explanation.unwrap_or_else(|_| explanation_placeholder(expression)),
            usage_examples: usage_examples
                .unwrap_or_else(|_| vec![usage_example_placeholder(expression)]),
            image_url: image_url.ok(),
        }
    }

    /// The expression the card was generated for, unmodified.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// IPA transcription, or [`PHONETIC_PLACEHOLDER`].
    #[must_use]
    pub fn phonetic(&self) -> &str {
        &self.phonetic
    }

    /// Plain-language definition.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Example sentences, in the order the model gave them. Never empty.
    #[must_use]
    pub fn usage_examples(&self) -> &[String] {
        &self.usage_examples
    }

    /// Illustration URL, when one was generated.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// Explanation shown when the explanation sub-request fails.
#[must_use]
pub fn explanation_placeholder(expression: &str) -> String {
    format!("No explanation available for '{expression}'.")
}

/// The single example shown when the usage examples sub-request fails.
#[must_use]
pub fn usage_example_placeholder(expression: &str) -> String {
    format!("Example with '{expression}' not available.")
}
