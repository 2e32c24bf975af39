//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the card generator and a remote
//! API. Implementations live in `src/adapters/`.

pub mod image_generator;
pub mod language_model;

pub use image_generator::{ImageGenerator, ImageRequest};
pub use language_model::{ChatMessage, ChatRequest, LanguageModel};
