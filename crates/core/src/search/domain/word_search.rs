use regex::Regex;

use crate::transcript::domain::corpus::Corpus;

use super::match_record::MatchRecord;

/// Find every token whose word equals the query (case-insensitive), or
/// matches it as a regex when `regex` is set. One record per hit, carrying
/// the token's own span and confidence.
pub fn word_search(
    corpus: &Corpus,
    query: &str,
    regex: bool,
) -> Result<Vec<MatchRecord>, Box<dyn std::error::Error>> {
    let pattern = if regex { Some(Regex::new(query)?) } else { None };
    let needle = query.to_lowercase();

    let mut out = Vec::new();
    for utterance in corpus.utterances() {
        for token in &utterance.words {
            let found = match &pattern {
                Some(re) => re.is_match(&token.word),
                None => needle == token.word.to_lowercase(),
            };
            if found {
                out.push(MatchRecord {
                    start: token.start,
                    end: token.end,
                    file: utterance.file.clone(),
                    words: vec![token.word.clone()],
                    confidence: Some(token.confidence),
                });
            }
        }
    }
    Ok(out)
}
