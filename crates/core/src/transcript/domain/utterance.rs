use std::path::PathBuf;

use super::token::TranscriptToken;

/// A contiguous stretch of speech bounded by structural markers.
///
/// `start` and `end` are the start timestamps of the opening and closing
/// markers; `words` holds only the content tokens strictly between them.
/// Utterances with no content words are never emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub start: f64,
    pub end: f64,
    pub words: Vec<TranscriptToken>,
    /// Transcript file this utterance was parsed from.
    pub file: PathBuf,
}

impl Utterance {
    /// The utterance text, words joined by single spaces.
    pub fn sentence(&self) -> String {
        self.words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
