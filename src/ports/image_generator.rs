//! Image generator port for AI image generation APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::FlashcardError;

/// A request to generate images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The model identifier (e.g., `"dall-e-2"`).
    pub model: String,
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Pixel dimensions (`"256x256"`, `"512x512"`, `"1024x1024"`).
    pub size: String,
    /// Quality tier (`"standard"`, `"hd"`).
    pub quality: String,
    /// Number of images to generate.
    pub count: u32,
}

/// A single generated image, referenced by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Where the provider hosts the image.
    pub url: String,
}

/// Response containing generated images.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    /// The generated images.
    pub images: Vec<GeneratedImage>,
}

impl ImageResponse {
    /// URL of the first image, if the provider returned any.
    #[must_use]
    pub fn first_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageResponse, FlashcardError>> + Send + 'a>>;

/// Generates images from text prompts via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Generate images for the given request.
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_>;
}
