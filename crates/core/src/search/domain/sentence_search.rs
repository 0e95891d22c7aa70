use regex::Regex;

use crate::transcript::domain::corpus::Corpus;

use super::match_record::MatchRecord;

/// Find utterances containing the query, emitting the whole utterance span.
///
/// Exact mode tests whether the lowercased query equals one of the
/// utterance's words; it is single-word membership, not phrase containment.
/// Regex mode runs the pattern against the utterance text.
pub fn sentence_search(
    corpus: &Corpus,
    query: &str,
    regex: bool,
) -> Result<Vec<MatchRecord>, Box<dyn std::error::Error>> {
    let pattern = if regex { Some(Regex::new(query)?) } else { None };
    let needle = query.to_lowercase();

    let mut out = Vec::new();
    for utterance in corpus.utterances() {
        let found = match &pattern {
            Some(re) => re.is_match(&utterance.sentence()),
            None => utterance.words.iter().any(|w| w.word == needle),
        };
        if found {
            out.push(MatchRecord::from_utterance(utterance));
        }
    }
    Ok(out)
}
