//! Recording adapters that capture interactions to cassettes.

pub mod image_generator;
pub mod language_model;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or_default();

    let output_json = match result {
        Ok(v) => serde_json::json!({ "Ok": serde_json::to_value(v).unwrap_or_default() }),
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    // A panicking sibling request must not cost us the rest of the session.
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, input_json, output_json);
}
