use std::path::Path;

use super::audio_clip::AudioClip;

/// Domain interface for decoding a source audio file to mono PCM at the
/// requested sample rate.
pub trait AudioSource {
    fn decode(
        &self,
        path: &Path,
        sample_rate: u32,
    ) -> Result<AudioClip, Box<dyn std::error::Error>>;
}
