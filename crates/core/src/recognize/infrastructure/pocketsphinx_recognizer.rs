use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use crate::recognize::domain::error::RecognizeError;
use crate::recognize::domain::speech_recognizer::SpeechRecognizer;

use super::subprocess::run_with_timeout;

const DEFAULT_BINARY: &str = "pocketsphinx_continuous";

/// Speech recognizer shelling out to pocketsphinx_continuous with
/// word-level time output.
pub struct PocketsphinxRecognizer {
    binary: String,
    timeout: Option<Duration>,
}

impl PocketsphinxRecognizer {
    pub fn new() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            timeout: None,
        }
    }

    /// Kill a run that exceeds `timeout` and report it as failed, instead
    /// of letting a hung engine hang the batch.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[cfg(test)]
    fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }
}

impl Default for PocketsphinxRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechRecognizer for PocketsphinxRecognizer {
    fn is_available(&self) -> bool {
        // Spawning with a bogus flag distinguishes "not installed" from
        // any other outcome; the tool exiting angrily is still installed.
        match Command::new(&self.binary)
            .arg("--invalid-args")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
        {
            Ok(_) => true,
            Err(e) => e.kind() != ErrorKind::NotFound,
        }
    }

    fn recognize(
        &self,
        audio_path: &Path,
        pre_frames: u32,
        post_frames: u32,
    ) -> Result<String, RecognizeError> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-infile")
            .arg(audio_path)
            .args(["-time", "yes"])
            .args(["-logfn", "/dev/null"])
            .args(["-vad_prespeech", &pre_frames.to_string()])
            .args(["-vad_postspeech", &post_frames.to_string()]);

        let output = run_with_timeout(cmd, self.timeout).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                RecognizeError::ToolUnavailable {
                    tool: self.binary.clone(),
                }
            } else {
                RecognizeError::Io {
                    path: audio_path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if output.timed_out {
            return Err(RecognizeError::TranscriptionFailed {
                path: audio_path.to_path_buf(),
                message: "timed out".to_string(),
            });
        }
        if !output.success {
            return Err(RecognizeError::TranscriptionFailed {
                path: audio_path.to_path_buf(),
                message: "recognizer exited with an error".to_string(),
            });
        }

        Ok(output.stdout)
    }
}
