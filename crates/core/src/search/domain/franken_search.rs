use std::collections::HashMap;

use rand::seq::IndexedRandom;
use rand::RngCore;

use crate::transcript::domain::corpus::Corpus;

use super::match_record::MatchRecord;
use super::word_search::word_search;

/// Rebuild an arbitrary sentence from recorded words.
///
/// For each word of the query, runs a word search (memoized per distinct
/// word for the duration of the call) and picks one instance uniformly at
/// random. Words with no recorded instance are skipped, so the output may
/// be shorter than the query. The RNG is injected so callers and tests
/// control the selection sequence.
pub fn franken_search(
    corpus: &Corpus,
    sentence: &str,
    rng: &mut dyn RngCore,
) -> Result<Vec<MatchRecord>, Box<dyn std::error::Error>> {
    let mut memo: HashMap<String, Vec<MatchRecord>> = HashMap::new();
    let mut out = Vec::new();

    for word in sentence.split(' ') {
        if !memo.contains_key(word) {
            let hits = word_search(corpus, word, false)?;
            memo.insert(word.to_string(), hits);
        }
        if let Some(pick) = memo[word].choose(rng) {
            out.push(pick.clone());
        }
    }

    Ok(out)
}
