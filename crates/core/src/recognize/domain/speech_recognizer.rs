use std::path::Path;

use super::error::RecognizeError;

/// Domain interface for the external speech-to-text engine.
///
/// `recognize` turns one normalized audio file into the raw token-per-line
/// transcript (`word start end confidence`). `pre_frames`/`post_frames`
/// tune the engine's voice-activity padding around detected speech, in
/// frame units. An empty transcript is a valid result and distinct from
/// the tool being unavailable.
pub trait SpeechRecognizer {
    /// Probe whether the engine is installed, before any batch work.
    fn is_available(&self) -> bool;

    fn recognize(
        &self,
        audio_path: &Path,
        pre_frames: u32,
        post_frames: u32,
    ) -> Result<String, RecognizeError>;
}
