use std::path::PathBuf;

use crate::transcript::domain::utterance::Utterance;

/// One search hit: a time span in a source file plus the words it covers.
///
/// Created fresh per query and consumed by the composer; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchRecord {
    pub start: f64,
    pub end: f64,
    /// Transcript file the span was found in.
    pub file: PathBuf,
    pub words: Vec<String>,
    /// Present only for single-token matches.
    pub confidence: Option<f64>,
}

impl MatchRecord {
    pub fn from_utterance(utterance: &Utterance) -> Self {
        Self {
            start: utterance.start,
            end: utterance.end,
            file: utterance.file.clone(),
            words: utterance.words.iter().map(|w| w.word.clone()).collect(),
            confidence: None,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::domain::token::TranscriptToken;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_utterance() {
        let u = Utterance {
            start: 1.0,
            end: 3.5,
            words: vec![TranscriptToken {
                word: "hey".to_string(),
                start: 1.2,
                end: 1.6,
                confidence: 0.9,
            }],
            file: PathBuf::from("a.mp3.transcription.txt"),
        };
        let m = MatchRecord::from_utterance(&u);
        assert_relative_eq!(m.duration(), 2.5);
        assert_eq!(m.phrase(), "hey");
        assert!(m.confidence.is_none());
    }
}
