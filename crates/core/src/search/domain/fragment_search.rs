use std::collections::HashSet;

use crate::shared::constants::{MAX_FRAGMENT_SPAN_SECS, NOISE};
use crate::transcript::domain::corpus::{Corpus, FlatWord};

use super::match_record::MatchRecord;

/// Multi-word wildcard search over the flattened token stream.
///
/// The query is one or more `|`-separated alternatives; each alternative is
/// a space-separated pattern of literal words and `*`, which matches any
/// single word. Matching ignores utterance boundaries, so a fragment can
/// span a pause within one recording; a window is accepted only when its
/// first and last tokens come from the same file and the span stays under
/// `MAX_FRAGMENT_SPAN_SECS`, which rejects windows straddling two files or
/// a cut. Literal words match case-sensitively, and a window containing
/// the noise marker never matches, wildcard or not.
pub fn fragment_search(corpus: &Corpus, query: &str) -> Vec<MatchRecord> {
    let patterns: Vec<Vec<&str>> = query
        .split('|')
        .map(|phrase| phrase.split(' ').collect())
        .collect();

    let words = corpus.flat_words();
    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    let mut out = Vec::new();

    for i in 0..words.len() {
        for pattern in &patterns {
            let Some(window) = words.get(i..i + pattern.len()) else {
                continue;
            };
            if !window_matches(pattern, window) {
                continue;
            }

            let start = window[0].token.start;
            let end = window[pattern.len() - 1].token.end;
            if window[0].file != window[pattern.len() - 1].file
                || end - start >= MAX_FRAGMENT_SPAN_SECS
            {
                continue;
            }
            if !seen.insert((start.to_bits(), end.to_bits())) {
                continue;
            }

            out.push(MatchRecord {
                start,
                end,
                file: window[0].file.to_path_buf(),
                words: window.iter().map(|w| w.token.word.clone()).collect(),
                confidence: None,
            });
        }
    }

    out
}

fn window_matches(pattern: &[&str], window: &[FlatWord<'_>]) -> bool {
    pattern.iter().zip(window).all(|(p, w)| {
        let word = w.token.word.as_str();
        word != NOISE && (*p == "*" || *p == word)
    })
}
