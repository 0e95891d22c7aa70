use std::path::Path;

use super::audio_clip::AudioClip;

/// Domain interface for encoding a clip to a file. The container and codec
/// follow from the output path's extension.
pub trait AudioSink {
    fn export(&self, path: &Path, clip: &AudioClip) -> Result<(), Box<dyn std::error::Error>>;
}
