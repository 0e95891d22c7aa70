use std::path::PathBuf;

use crate::shared::constants::SILENCE;
use crate::transcript::domain::corpus::transcript_path;
use crate::transcript::domain::parser::parse_tokens;
use crate::transcript::domain::transcript_source::TranscriptSource;

use super::match_record::MatchRecord;

/// Find recognizer-reported silences across the corpus, optionally bounded
/// by duration. Useful for cutting supercuts of pauses, or for locating
/// splice points.
pub fn silence_search(
    source: &dyn TranscriptSource,
    files: &[PathBuf],
    min_duration: Option<f64>,
    max_duration: Option<f64>,
) -> Result<Vec<MatchRecord>, Box<dyn std::error::Error>> {
    let mut out = Vec::new();

    for file in files {
        let path = transcript_path(file);
        let Some(text) = source.load(&path)? else {
            continue;
        };

        for token in parse_tokens(&text) {
            if token.word != SILENCE {
                continue;
            }
            let duration = token.duration();
            if min_duration.is_some_and(|min| duration < min) {
                continue;
            }
            if max_duration.is_some_and(|max| duration > max) {
                continue;
            }
            out.push(MatchRecord {
                start: token.start,
                end: token.end,
                file: path.clone(),
                words: vec![SILENCE.to_string()],
                confidence: Some(token.confidence),
            });
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::domain::transcript_source::TranscriptSource;
    use std::path::Path;

    struct OneFile(&'static str);

    impl TranscriptSource for OneFile {
        fn load(&self, _: &Path) -> Result<Option<String>, Box<dyn std::error::Error>> {
            Ok(Some(self.0.to_string()))
        }
    }

    const TEXT: &str = "<s> 0.0 0.1 1.0\n\
                        word 0.1 0.4 0.9\n\
                        <sil> 0.4 0.9 1.0\n\
                        more 0.9 1.2 0.9\n\
                        <sil> 1.2 3.5 1.0\n\
                        </s> 3.6 3.7 1.0\n";

    #[test]
    fn test_finds_all_silences() {
        let out = silence_search(&OneFile(TEXT), &[PathBuf::from("a.mp3")], None, None).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].start, 0.4);
        assert_eq!(out[0].end, 0.9);
    }

    #[test]
    fn test_min_duration_filters() {
        let out =
            silence_search(&OneFile(TEXT), &[PathBuf::from("a.mp3")], Some(1.0), None).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start, 1.2);
    }

    #[test]
    fn test_max_duration_filters() {
        let out =
            silence_search(&OneFile(TEXT), &[PathBuf::from("a.mp3")], None, Some(1.0)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start, 0.4);
    }
}
