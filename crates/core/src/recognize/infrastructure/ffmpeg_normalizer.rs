use std::path::{Path, PathBuf};
use std::process::Command;

use crate::recognize::domain::audio_normalizer::AudioNormalizer;
use crate::recognize::domain::error::RecognizeError;
use crate::shared::constants::{RECOGNIZER_SAMPLE_RATE, TEMP_WAV_SUFFIX};
use crate::transcript::domain::corpus::transcript_path;

use super::subprocess::run_with_timeout;

/// Converts source audio to recognizer input (mono 16 kHz 16-bit wav) by
/// shelling out to ffmpeg. Conversion is skipped when the transcript or
/// the converted wav already exists.
pub struct FfmpegNormalizer {
    binary: String,
}

impl FfmpegNormalizer {
    pub fn new() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
        }
    }
}

impl Default for FfmpegNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioNormalizer for FfmpegNormalizer {
    fn normalize(&self, path: &Path) -> Result<PathBuf, RecognizeError> {
        let converted = PathBuf::from(format!("{}{}", path.to_string_lossy(), TEMP_WAV_SUFFIX));

        if transcript_path(path).exists() || converted.exists() {
            return Ok(converted);
        }

        let mut cmd = Command::new(&self.binary);
        cmd.arg("-y")
            .arg("-i")
            .arg(path)
            .args(["-acodec", "pcm_s16le"])
            .args(["-ac", "1"])
            .args(["-ar", &RECOGNIZER_SAMPLE_RATE.to_string()])
            .arg(&converted);

        let output = run_with_timeout(cmd, None).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RecognizeError::ToolUnavailable {
                    tool: self.binary.clone(),
                }
            } else {
                RecognizeError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !output.success {
            return Err(RecognizeError::NormalizeFailed {
                path: path.to_path_buf(),
                message: "ffmpeg exited with an error".to_string(),
            });
        }

        Ok(converted)
    }
}
