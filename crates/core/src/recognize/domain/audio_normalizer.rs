use std::path::{Path, PathBuf};

use super::error::RecognizeError;

/// Domain interface for converting source audio into the recognizer's
/// input format (mono 16 kHz 16-bit PCM).
///
/// Returns the path of the normalized file. Implementations must not
/// redo work for a source whose transcript already exists.
pub trait AudioNormalizer {
    fn normalize(&self, path: &Path) -> Result<PathBuf, RecognizeError>;
}
