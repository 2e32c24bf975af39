//! Recording adapter for the `LanguageModel` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::language_model::{ChatRequest, CompleteFuture, LanguageModel};

/// Records chat completions while delegating to an inner implementation.
pub struct RecordingLanguageModel {
    inner: Arc<dyn LanguageModel>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLanguageModel {
    /// Creates a new recording model wrapping the given implementation.
    pub fn new(inner: Arc<dyn LanguageModel>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LanguageModel for RecordingLanguageModel {
    fn complete(&self, request: &ChatRequest) -> CompleteFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.complete(&request_clone).await;
            record_result(&recorder, "language_model", "complete", &request_clone, &result);
            result
        })
    }
}
