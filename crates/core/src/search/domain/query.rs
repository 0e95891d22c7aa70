use rand::RngCore;

use crate::transcript::domain::corpus::Corpus;

use super::fragment_search::fragment_search;
use super::franken_search::franken_search;
use super::match_record::MatchRecord;
use super::sentence_search::sentence_search;
use super::word_search::word_search;

/// The four query modes the engine supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Sentence,
    Word,
    Fragment,
    Franken,
}

/// Run one query against an already-loaded corpus.
///
/// The regex flag applies to word and sentence modes; fragment mode has its
/// own wildcard syntax and franken mode always uses exact word lookups.
/// An empty result set is a valid outcome, not an error.
pub fn search(
    corpus: &Corpus,
    query: &str,
    mode: SearchMode,
    regex: bool,
    rng: &mut dyn RngCore,
) -> Result<Vec<MatchRecord>, Box<dyn std::error::Error>> {
    match mode {
        SearchMode::Word => word_search(corpus, query, regex),
        SearchMode::Sentence => sentence_search(corpus, query, regex),
        SearchMode::Fragment => Ok(fragment_search(corpus, query)),
        SearchMode::Franken => franken_search(corpus, query, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::domain::transcript_source::TranscriptSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::{Path, PathBuf};

    struct OneFile(&'static str);

    impl TranscriptSource for OneFile {
        fn load(&self, _: &Path) -> Result<Option<String>, Box<dyn std::error::Error>> {
            Ok(Some(self.0.to_string()))
        }
    }

    const TEXT: &str = "<s> 0.0 0.1 1.0\n\
                        the 0.1 0.4 0.9\n\
                        quick 0.4 0.9 0.85\n\
                        fox 0.9 1.2 0.8\n\
                        </s> 1.3 1.4 1.0\n";

    fn corpus() -> Corpus {
        Corpus::load(&OneFile(TEXT), &[PathBuf::from("a.mp3")]).unwrap()
    }

    #[test]
    fn test_dispatch_per_mode() {
        let corpus = corpus();
        let mut rng = StdRng::seed_from_u64(1);

        let word = search(&corpus, "fox", SearchMode::Word, false, &mut rng).unwrap();
        assert_eq!(word.len(), 1);
        assert_eq!(word[0].phrase(), "fox");

        let sentence = search(&corpus, "fox", SearchMode::Sentence, false, &mut rng).unwrap();
        assert_eq!(sentence[0].phrase(), "the quick fox");

        let fragment = search(&corpus, "the * fox", SearchMode::Fragment, false, &mut rng).unwrap();
        assert_eq!(fragment[0].words.len(), 3);

        let franken = search(&corpus, "fox the", SearchMode::Franken, false, &mut rng).unwrap();
        assert_eq!(franken.len(), 2);
    }
}
