use serde::Serialize;

use crate::transcript::domain::corpus::Corpus;

/// One content word of the corpus in the machine-readable export format.
/// Structural markers and unparsable tokens never appear here; both are
/// already dropped during parsing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordSpan {
    pub start: f64,
    pub end: f64,
    pub word: String,
}

pub fn word_spans(corpus: &Corpus) -> Vec<WordSpan> {
    corpus
        .flat_words()
        .iter()
        .map(|w| WordSpan {
            start: w.token.start,
            end: w.token.end,
            word: w.token.word.clone(),
        })
        .collect()
}

/// Serialize the corpus word list to JSON, in corpus order.
pub fn words_json(corpus: &Corpus) -> Result<String, serde_json::Error> {
    serde_json::to_string(&word_spans(corpus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::domain::transcript_source::TranscriptSource;
    use std::path::{Path, PathBuf};

    struct OneFile(&'static str);

    impl TranscriptSource for OneFile {
        fn load(&self, _: &Path) -> Result<Option<String>, Box<dyn std::error::Error>> {
            Ok(Some(self.0.to_string()))
        }
    }

    const TEXT: &str = "<s> 0.0 0.1 1.0\n\
                        hello 0.1 0.4 0.9\n\
                        world 0.4 0.9 0.85\n\
                        </s> 1.0 1.1 1.0\n";

    fn corpus() -> Corpus {
        Corpus::load(&OneFile(TEXT), &[PathBuf::from("a.mp3")]).unwrap()
    }

    #[test]
    fn test_word_spans_exclude_markers() {
        let spans = word_spans(&corpus());
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].word, "hello");
        assert_eq!(spans[1].word, "world");
    }

    #[test]
    fn test_json_shape() {
        let json = words_json(&corpus()).unwrap();
        assert_eq!(
            json,
            r#"[{"start":0.1,"end":0.4,"word":"hello"},{"start":0.4,"end":0.9,"word":"world"}]"#
        );
    }
}
