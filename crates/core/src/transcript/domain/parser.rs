use std::path::Path;

use regex::Regex;

use crate::shared::constants::UTTERANCE_END;

use super::token::TranscriptToken;
use super::utterance::Utterance;

/// Parse raw recognizer output (one `word start end confidence` line per
/// token) into timestamped tokens.
///
/// Parenthesized pronunciation-variant annotations (`and(2)`) are stripped
/// before field splitting. Lines that do not yield exactly four fields and
/// tokens whose numeric fields fail to parse are dropped, never fatal: the
/// corpus is bulk recognizer output and a few garbled lines are expected.
pub fn parse_tokens(text: &str) -> Vec<TranscriptToken> {
    let annotation = Regex::new(r"\(.*?\)").expect("static pattern");

    let mut tokens = Vec::new();
    let mut malformed = 0usize;
    let mut unparsable = 0usize;

    for line in text.lines() {
        let stripped = annotation.replace_all(line, "");
        let fields: Vec<&str> = stripped.split_whitespace().collect();
        if fields.len() != 4 {
            if !stripped.trim().is_empty() {
                malformed += 1;
            }
            continue;
        }

        let (word, start, end, confidence) = (fields[0], fields[1], fields[2], fields[3]);
        match (
            start.parse::<f64>(),
            end.parse::<f64>(),
            confidence.parse::<f64>(),
        ) {
            (Ok(start), Ok(end), Ok(confidence)) => tokens.push(TranscriptToken {
                word: word.to_string(),
                start,
                end,
                confidence,
            }),
            _ => unparsable += 1,
        }
    }

    if malformed > 0 || unparsable > 0 {
        log::debug!("dropped {malformed} malformed and {unparsable} unparsable transcript lines");
    }

    tokens
}

/// Group a token stream into utterances by scanning for structural markers.
///
/// The first marker opens a segment; each following marker closes it,
/// emitting the content tokens strictly between the two (if any). The
/// boundary times are the markers' own start timestamps. `</s>` closes
/// hard: the next marker opens a fresh segment. `<s>` and `<sil>` close
/// soft: the closing marker becomes the new open boundary, so a pause
/// splits a long utterance into consecutive segments instead of ending it.
pub fn group_utterances(tokens: &[TranscriptToken], file: &Path) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    let mut seg_start: Option<usize> = None;

    for (index, token) in tokens.iter().enumerate() {
        if !token.is_marker() {
            continue;
        }

        let Some(open) = seg_start else {
            seg_start = Some(index);
            continue;
        };

        let words = &tokens[open + 1..index];
        if !words.is_empty() {
            utterances.push(Utterance {
                start: tokens[open].start,
                end: token.start,
                words: words.to_vec(),
                file: file.to_path_buf(),
            });
        }

        seg_start = if token.word == UTTERANCE_END {
            None
        } else {
            Some(index)
        };
    }

    utterances
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    fn file() -> PathBuf {
        PathBuf::from("speech.mp3.transcription.txt")
    }

    #[test]
    fn test_parse_valid_line() {
        let tokens = parse_tokens("hello 1.23 1.78 0.95");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].word, "hello");
        assert_relative_eq!(tokens[0].start, 1.23);
        assert_relative_eq!(tokens[0].end, 1.78);
        assert_relative_eq!(tokens[0].confidence, 0.95);
    }

    #[test]
    fn test_parse_round_trip() {
        let line = "hello 1.23 1.78 0.95";
        let tokens = parse_tokens(line);
        assert_eq!(tokens[0].to_line(), line);
    }

    #[test]
    fn test_parse_strips_pronunciation_variant() {
        let tokens = parse_tokens("and(2) 0.5 0.8 0.99");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].word, "and");
    }

    #[test]
    fn test_parse_drops_wrong_field_count() {
        let tokens = parse_tokens("hello 1.0 1.5\nworld 2.0 2.5 0.9 extra\nok 3.0 3.5 0.8");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].word, "ok");
    }

    #[test]
    fn test_parse_drops_unparsable_numbers() {
        let tokens = parse_tokens("hello 1.0 oops 0.9\nworld 2.0 2.5 0.9");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].word, "world");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_tokens("").is_empty());
    }

    fn tok(word: &str, start: f64) -> TranscriptToken {
        TranscriptToken {
            word: word.to_string(),
            start,
            end: start + 0.3,
            confidence: 1.0,
        }
    }

    #[test]
    fn test_single_utterance() {
        let tokens = vec![
            tok("<s>", 0.0),
            tok("the", 0.1),
            tok("quick", 0.5),
            tok("fox", 0.9),
            tok("</s>", 1.3),
        ];
        let utterances = group_utterances(&tokens, &file());
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].words.len(), 3);
        assert_relative_eq!(utterances[0].start, 0.0);
        assert_relative_eq!(utterances[0].end, 1.3);
    }

    #[test]
    fn test_silence_splits_without_ending() {
        let tokens = vec![
            tok("<s>", 0.0),
            tok("before", 0.1),
            tok("<sil>", 0.5),
            tok("after", 1.0),
            tok("</s>", 1.5),
        ];
        let utterances = group_utterances(&tokens, &file());
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].sentence(), "before");
        assert_eq!(utterances[1].sentence(), "after");
        // Second segment reopens at the silence marker's timestamp.
        assert_relative_eq!(utterances[0].end, 0.5);
        assert_relative_eq!(utterances[1].start, 0.5);
        assert_relative_eq!(utterances[1].end, 1.5);
    }

    #[test]
    fn test_end_marker_closes_hard() {
        let tokens = vec![
            tok("<s>", 0.0),
            tok("one", 0.1),
            tok("</s>", 0.5),
            tok("<s>", 2.0),
            tok("two", 2.1),
            tok("</s>", 2.5),
        ];
        let utterances = group_utterances(&tokens, &file());
        assert_eq!(utterances.len(), 2);
        // The gap between utterances is not part of either span.
        assert_relative_eq!(utterances[0].end, 0.5);
        assert_relative_eq!(utterances[1].start, 2.0);
    }

    #[test]
    fn test_empty_segment_dropped() {
        let tokens = vec![
            tok("<s>", 0.0),
            tok("<sil>", 0.5),
            tok("word", 1.0),
            tok("</s>", 1.5),
        ];
        let utterances = group_utterances(&tokens, &file());
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].sentence(), "word");
    }

    #[test]
    fn test_no_markers_no_utterances() {
        let tokens = vec![tok("stray", 0.0), tok("words", 0.5)];
        assert!(group_utterances(&tokens, &file()).is_empty());
    }

    #[test]
    fn test_noise_kept_as_content() {
        let tokens = vec![
            tok("<s>", 0.0),
            tok("[NOISE]", 0.1),
            tok("word", 0.5),
            tok("</s>", 1.0),
        ];
        let utterances = group_utterances(&tokens, &file());
        assert_eq!(utterances[0].words.len(), 2);
    }
}
