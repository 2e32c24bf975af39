//! Personas and prompt templates for the four card sub-requests.
//!
//! Every builder is a pure function of the expression and the configured
//! models, so prompts can be checked without touching the network.

use crate::config::ModelsConfig;
use crate::ports::{ChatMessage, ChatRequest, ImageRequest};

/// Persona for the pronunciation lookup.
pub const PRONUNCIATION_PERSONA: &str =
    "You are a linguistics expert specializing in American English pronunciation.";

/// Persona for the explanation.
pub const EXPLANATION_PERSONA: &str =
    "You are a friendly English teacher explaining vocabulary to language learners.";

/// Persona for the usage examples.
pub const EXAMPLES_PERSONA: &str =
    "You are a native American English speaker giving natural examples.";

/// Persona for the visual description feeding the illustration.
pub const VISUAL_PERSONA: &str = "You are an expert at explaining English expressions visually. \
     Describe the core meaning in a way that can be drawn.";

/// Label the pronunciation reply is expected to carry.
pub const IPA_LABEL: &str = "IPA:";

/// Builds the pronunciation request.
#[must_use]
pub fn pronunciation(expression: &str, models: &ModelsConfig) -> ChatRequest {
    let prompt = format!(
        "For the English expression \"{expression}\", provide its IPA phonetic transcription \
         in American English.\n\
         Format your response exactly like this example:\n\
         {IPA_LABEL} /həˈloʊ/"
    );
    ChatRequest {
        model: models.chat.clone(),
        messages: vec![ChatMessage::system(PRONUNCIATION_PERSONA), ChatMessage::user(prompt)],
        temperature: 0.3,
        max_tokens: None,
    }
}

/// Builds the explanation request.
#[must_use]
pub fn explanation(expression: &str, models: &ModelsConfig) -> ChatRequest {
    let prompt = format!(
        "Explain the meaning of \"{expression}\" in 1-2 short sentences of plain English \
         that an intermediate learner can understand. Reply with the explanation only."
    );
    ChatRequest {
        model: models.chat.clone(),
        messages: vec![ChatMessage::system(EXPLANATION_PERSONA), ChatMessage::user(prompt)],
        temperature: 0.5,
        max_tokens: Some(100),
    }
}

/// Builds the usage examples request.
#[must_use]
pub fn usage_examples(expression: &str, models: &ModelsConfig) -> ChatRequest {
    let prompt = format!(
        "Generate 3 natural, conversational examples using \"{expression}\".\n\
         Examples should:\n\
         - Use everyday situations\n\
         - Show different contexts\n\
         - Include informal dialogue\n\
         - Demonstrate the expression's typical usage\n\
         \n\
         Format: Just the examples, one per line."
    );
    ChatRequest {
        model: models.chat.clone(),
        messages: vec![ChatMessage::system(EXAMPLES_PERSONA), ChatMessage::user(prompt)],
        temperature: 0.7,
        max_tokens: Some(150),
    }
}

/// Builds the request describing how the expression could be drawn.
#[must_use]
pub fn visual_description(expression: &str, models: &ModelsConfig) -> ChatRequest {
    ChatRequest {
        model: models.chat.clone(),
        messages: vec![
            ChatMessage::system(VISUAL_PERSONA),
            ChatMessage::user(format!("Explain \"{expression}\".")),
        ],
        temperature: 0.3,
        max_tokens: Some(100),
    }
}

/// Builds the illustration request from the expression and its visual description.
#[must_use]
pub fn illustration(expression: &str, description: &str, models: &ModelsConfig) -> ImageRequest {
    let prompt = format!(
        "Create a picture explaining \"{expression}\" using this guide to its meaning:\n\
         {description}\n\
         \n\
         Style requirements:\n\
         - Clean lines and simple shapes\n\
         - No text or words\n\
         - White or simple background"
    );
    ImageRequest {
        model: models.image.clone(),
        prompt,
        size: models.image_size.clone(),
        quality: models.image_quality.clone(),
        count: 1,
    }
}
