//! Language model port for chat-style completion APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::FlashcardError;

/// Who a chat message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instruction establishing the model's persona.
    System,
    /// The question being asked.
    User,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A `system` message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// A `user` message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// A request for one chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model identifier (e.g., `"gpt-3.5-turbo"`).
    pub model: String,
    /// Conversation, persona first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Content of the first message with the given role.
    #[must_use]
    pub fn message(&self, role: Role) -> Option<&str> {
        self.messages.iter().find(|m| m.role == role).map(|m| m.content.as_str())
    }
}

/// Generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply.
    pub text: String,
}

/// Boxed future type returned by [`LanguageModel::complete`].
pub type CompleteFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ChatResponse, FlashcardError>> + Send + 'a>>;

/// Produces text completions via an external API.
pub trait LanguageModel: Send + Sync {
    /// Complete the given conversation.
    fn complete(&self, request: &ChatRequest) -> CompleteFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::system("be brief")).unwrap();
        assert_eq!(json["role"], "system");
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn max_tokens_omitted_when_unset() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo".into(),
            messages: vec![ChatMessage::user("hi")],
            temperature: 0.3,
            max_tokens: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn message_lookup_by_role() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo".into(),
            messages: vec![ChatMessage::system("persona"), ChatMessage::user("question")],
            temperature: 0.7,
            max_tokens: Some(150),
        };
        assert_eq!(request.message(Role::System), Some("persona"));
        assert_eq!(request.message(Role::User), Some("question"));
    }
}
