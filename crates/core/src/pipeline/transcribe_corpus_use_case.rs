use std::path::{Path, PathBuf};

use crate::recognize::domain::audio_normalizer::AudioNormalizer;
use crate::recognize::domain::error::RecognizeError;
use crate::recognize::domain::speech_recognizer::SpeechRecognizer;
use crate::transcript::domain::corpus::transcript_path;

/// What happened to one input file during a transcription batch.
#[derive(Clone, Debug, PartialEq)]
pub enum TranscribeStatus {
    Transcribed,
    AlreadyTranscribed,
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct TranscribeOutcome {
    pub file: PathBuf,
    pub status: TranscribeStatus,
}

#[derive(Debug, Default)]
pub struct TranscribeSummary {
    pub outcomes: Vec<TranscribeOutcome>,
}

impl TranscribeSummary {
    pub fn transcribed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == TranscribeStatus::Transcribed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TranscribeStatus::Failed(_)))
            .count()
    }
}

/// Runs the corpus through normalize → recognize → write transcript.
///
/// Availability is probed once before any work: a missing engine fails the
/// whole operation up front instead of mid-batch. Per-file failures are
/// recorded in the summary and the batch continues.
pub struct TranscribeCorpusUseCase {
    normalizer: Box<dyn AudioNormalizer>,
    recognizer: Box<dyn SpeechRecognizer>,
}

impl TranscribeCorpusUseCase {
    pub fn new(
        normalizer: Box<dyn AudioNormalizer>,
        recognizer: Box<dyn SpeechRecognizer>,
    ) -> Self {
        Self {
            normalizer,
            recognizer,
        }
    }

    pub fn run(
        &self,
        files: &[PathBuf],
        pre_frames: u32,
        post_frames: u32,
    ) -> Result<TranscribeSummary, RecognizeError> {
        if !self.recognizer.is_available() {
            return Err(RecognizeError::ToolUnavailable {
                tool: "speech recognizer".to_string(),
            });
        }

        let total = files.len();
        let mut summary = TranscribeSummary::default();

        for (i, file) in files.iter().enumerate() {
            let transcript = transcript_path(file);
            if transcript.exists() {
                summary.outcomes.push(TranscribeOutcome {
                    file: file.clone(),
                    status: TranscribeStatus::AlreadyTranscribed,
                });
                continue;
            }

            log::info!("{}/{} transcribing {}", i + 1, total, file.display());
            let status = match self.transcribe_one(file, pre_frames, post_frames) {
                Ok(()) => TranscribeStatus::Transcribed,
                Err(e) => {
                    log::warn!("{}: {e}", file.display());
                    TranscribeStatus::Failed(e.to_string())
                }
            };
            summary.outcomes.push(TranscribeOutcome {
                file: file.clone(),
                status,
            });
        }

        Ok(summary)
    }

    fn transcribe_one(
        &self,
        file: &Path,
        pre_frames: u32,
        post_frames: u32,
    ) -> Result<(), RecognizeError> {
        let wav = self.normalizer.normalize(file)?;
        let text = self.recognizer.recognize(&wav, pre_frames, post_frames)?;

        let transcript = transcript_path(file);
        std::fs::write(&transcript, text).map_err(|e| RecognizeError::Io {
            path: transcript.clone(),
            source: e,
        })?;

        // The intermediate wav is only needed by the recognizer.
        if wav.exists() {
            if let Err(e) = std::fs::remove_file(&wav) {
                log::warn!("could not remove {}: {e}", wav.display());
            }
        }
        Ok(())
    }
}
