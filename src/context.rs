//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::adapters::live::openai::OpenAiClient;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::recording::language_model::RecordingLanguageModel;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::adapters::replaying::language_model::ReplayingLanguageModel;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::FlashcardError;
use crate::generator::CardGenerator;
use crate::ports::{ImageGenerator, LanguageModel};

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Language model port.
    pub language_model: Arc<dyn LanguageModel>,
    /// Image generator port.
    pub images: Arc<dyn ImageGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// Adapters may still hold the recorder (the web form shares them across
    /// requests), so the interactions are taken rather than unwrapped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = {
            let mut guard = self.recorder.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, CassetteRecorder::new("", "", ""))
        };
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context backed by the `OpenAI` API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured.
    pub fn live(config: &Config) -> Result<Self, FlashcardError> {
        let key = config.openai_key().ok_or(FlashcardError::MissingApiKey {
            provider: "OpenAI".into(),
            env_var: "OPENAI_API_KEY".into(),
        })?;
        let client = Arc::new(OpenAiClient::new(key, config.openai_api_base()));
        Ok(Self { language_model: client.clone(), images: client })
    }

    /// Create a recording context that wraps the live adapters with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), FlashcardError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".flashcard/cassettes")
            .join(&timestamp)
            .join("session.cassette.yaml");
        Ok(live_ctx.recorded_into(path, format!("{timestamp}-session")))
    }

    /// Wrap this context's ports so every call is recorded into a cassette at `path`.
    fn recorded_into(self, path: PathBuf, name: String) -> (Self, RecordingSession) {
        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, get_commit_hash())));

        let ctx = Self {
            language_model: Arc::new(RecordingLanguageModel::new(
                self.language_model,
                Arc::clone(&recorder),
            )),
            images: Arc::new(RecordingImageGenerator::new(self.images, Arc::clone(&recorder))),
        };
        (ctx, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, FlashcardError> {
        let replayer = load_cassette(path)
            .map_err(|e| FlashcardError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        Ok(Self {
            language_model: Arc::new(ReplayingLanguageModel::new(Arc::clone(&replayer))),
            images: Arc::new(ReplayingImageGenerator::new(replayer)),
        })
    }

    /// Pick live, recording or replaying mode from the environment.
    ///
    /// `FLASHCARD_REPLAY=<path>` replays a cassette; `FLASHCARD_REC=1` records
    /// live calls. The returned session, if any, must be finished by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected mode cannot be set up.
    pub fn from_env(config: &Config) -> Result<(Self, Option<RecordingSession>), FlashcardError> {
        let replay_path = std::env::var("FLASHCARD_REPLAY").ok().filter(|p| !p.is_empty());
        let is_recording =
            std::env::var("FLASHCARD_REC").is_ok_and(|v| v == "true" || v == "1");

        if let Some(cassette_path) = replay_path {
            info!(cassette = %cassette_path, "replaying recorded interactions");
            Ok((Self::replaying(Path::new(&cassette_path))?, None))
        } else if is_recording {
            info!("recording interactions");
            let (ctx, session) = Self::recording(config)?;
            Ok((ctx, Some(session)))
        } else {
            Ok((Self::live(config)?, None))
        }
    }

    /// A card generator over this context's ports.
    #[must_use]
    pub fn generator(&self, config: &Config) -> CardGenerator {
        CardGenerator::new(
            Arc::clone(&self.language_model),
            Arc::clone(&self.images),
            config.models.clone(),
        )
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
