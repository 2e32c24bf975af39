//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;
pub mod language_model;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::FlashcardError;

/// Retrieve the recorded output best matching `input` for a given port and method.
pub(crate) fn next_output<I: Serialize>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
    input: &I,
) -> Result<serde_json::Value, FlashcardError> {
    let input = serde_json::to_value(input).map_err(|e| FlashcardError::Replay(e.to_string()))?;
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard
        .next_interaction(port, method, &input)
        .map(|interaction| interaction.output.clone())
        .map_err(FlashcardError::Replay)
}

/// Deserialize a replayed output as `Result<T, FlashcardError>`.
///
/// A recorded `Err` comes back as an API error carrying the recorded message.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, FlashcardError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let message = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(FlashcardError::Api { status: 0, message });
    }
    let ok_val = match output.get("Ok").or_else(|| output.get("ok")) {
        Some(v) => v.clone(),
        None => output,
    };
    serde_json::from_value(ok_val).map_err(|e| FlashcardError::Replay(e.to_string()))
}
