//! Terminal rendering of a card.

use std::fmt::Write as _;

use clap::ValueEnum;

use crate::card::Card;
use crate::error::FlashcardError;

/// How `flashcard card` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Labelled lines for reading.
    Text,
    /// The card as a JSON object.
    Json,
}

/// Render a card in the requested format.
///
/// # Errors
///
/// Returns an error if the card cannot be serialized to JSON.
pub fn render(card: &Card, format: OutputFormat) -> Result<String, FlashcardError> {
    match format {
        OutputFormat::Text => Ok(render_text(card)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(card)?),
    }
}

/// Render a card as labelled lines. The image line only appears when an
/// illustration was generated.
#[must_use]
pub fn render_text(card: &Card) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Expression: {}", card.expression());
    let _ = writeln!(out, "Phonetic: {}", card.phonetic());
    let _ = writeln!(out, "Explanation: {}", card.explanation());
    out.push_str("Examples:\n");
    for example in card.usage_examples() {
        let _ = writeln!(out, "- {example}");
    }
    if let Some(url) = card.image_url() {
        let _ = writeln!(out, "Image URL: {url}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(image: Option<&str>) -> Card {
        Card::assemble(
            "anticipate",
            Ok("/ænˈtɪsəˌpeɪt/".into()),
            Ok("To expect something.".into()),
            Ok(vec!["I anticipate rain.".into(), "We anticipate delays.".into()]),
            image.map(str::to_string).ok_or(FlashcardError::EmptyResponse("none".into())),
        )
    }

    #[test]
    fn text_lists_examples_as_bullets() {
        let text = render_text(&card(Some("https://img/a.png")));
        assert_eq!(
            text,
            "Expression: anticipate\n\
             Phonetic: /ænˈtɪsəˌpeɪt/\n\
             Explanation: To expect something.\n\
             Examples:\n\
             - I anticipate rain.\n\
             - We anticipate delays.\n\
             Image URL: https://img/a.png\n"
        );
    }

    #[test]
    fn text_omits_missing_image() {
        let text = render_text(&card(None));
        assert!(!text.contains("Image URL"));
    }

    #[test]
    fn json_output() {
        let json = render(&card(None), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["expression"], "anticipate");
        assert_eq!(value["usageExamples"].as_array().unwrap().len(), 2);
        assert!(value.get("imageUrl").is_none());
    }

    #[test]
    fn serialization_failures_keep_their_kind() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = FlashcardError::from(err);
        assert!(matches!(err, FlashcardError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
