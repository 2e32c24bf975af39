//! Replaying adapter for the `LanguageModel` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::language_model::{ChatRequest, ChatResponse, CompleteFuture, LanguageModel};

/// Serves recorded chat completions from a cassette.
pub struct ReplayingLanguageModel {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingLanguageModel {
    /// Create a replaying model backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl LanguageModel for ReplayingLanguageModel {
    fn complete(&self, request: &ChatRequest) -> CompleteFuture<'_> {
        let output = next_output(&self.replayer, "language_model", "complete", request);
        Box::pin(async move { output.and_then(replay_result::<ChatResponse>) })
    }
}
