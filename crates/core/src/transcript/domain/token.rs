use crate::shared::constants::{SILENCE, UTTERANCE_END, UTTERANCE_START};

/// One recognized token with word-level timestamps, as emitted by the
/// recognizer (one per transcript line). Immutable once parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptToken {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
}

impl TranscriptToken {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Structural markers bound utterances and never count as content.
    pub fn is_marker(&self) -> bool {
        self.word == UTTERANCE_START || self.word == UTTERANCE_END || self.word == SILENCE
    }

    /// Serialize back to the recognizer's `word start end confidence` line.
    pub fn to_line(&self) -> String {
        format!("{} {} {} {}", self.word, self.start, self.end, self.confidence)
    }
}
