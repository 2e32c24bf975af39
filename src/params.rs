//! Validation of user-supplied parameters.

/// Image sizes the illustration request accepts.
const IMAGE_SIZES: &[&str] = &["256x256", "512x512", "1024x1024"];

/// Image quality tiers.
const IMAGE_QUALITIES: &[&str] = &["standard", "hd"];

/// Validate the illustration size.
///
/// # Errors
///
/// Returns an error if the size is not one of the square sizes the image model supports.
pub fn validate_image_size(size: &str) -> Result<(), String> {
    if IMAGE_SIZES.contains(&size) {
        Ok(())
    } else {
        Err(format!("Unsupported image size '{size}'. Valid: {}", IMAGE_SIZES.join(", ")))
    }
}

/// Validate the illustration quality tier.
///
/// # Errors
///
/// Returns an error if the quality value is not recognized.
pub fn validate_image_quality(quality: &str) -> Result<(), String> {
    if IMAGE_QUALITIES.contains(&quality) {
        Ok(())
    } else {
        Err(format!(
            "Unsupported image quality '{quality}'. Valid: {}",
            IMAGE_QUALITIES.join(", ")
        ))
    }
}

/// Validate an expression before generating a card for it.
///
/// The expression itself is passed on unmodified; only blank input is refused.
///
/// # Errors
///
/// Returns an error if the expression is empty or whitespace only.
pub fn validate_expression(expression: &str) -> Result<(), String> {
    if expression.trim().is_empty() {
        Err("Expression must not be empty".to_string())
    } else {
        Ok(())
    }
}
