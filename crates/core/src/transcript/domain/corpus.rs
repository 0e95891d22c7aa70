use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::shared::constants::TRANSCRIPT_SUFFIX;

use super::parser::{group_utterances, parse_tokens};
use super::token::TranscriptToken;
use super::transcript_source::TranscriptSource;
use super::utterance::Utterance;

/// Map a source audio path to its transcript path. Paths already carrying
/// the transcript suffix are used as-is.
pub fn transcript_path(source: &Path) -> PathBuf {
    let name = source.to_string_lossy();
    if name.ends_with(TRANSCRIPT_SUFFIX) {
        source.to_path_buf()
    } else {
        PathBuf::from(format!("{name}{TRANSCRIPT_SUFFIX}"))
    }
}

/// Map a transcript path back to its source audio path.
pub fn audio_path(transcript: &Path) -> PathBuf {
    let name = transcript.to_string_lossy();
    match name.strip_suffix(TRANSCRIPT_SUFFIX) {
        Some(stripped) => PathBuf::from(stripped),
        None => transcript.to_path_buf(),
    }
}

/// Ordered utterances from one corpus load, with a flattened cross-file
/// token view for fragment matching.
///
/// Built fresh per search call; utterances are read-only afterward.
#[derive(Debug, Default)]
pub struct Corpus {
    utterances: Vec<Utterance>,
}

/// One token of the flattened stream, tagged with its transcript file.
#[derive(Clone, Debug)]
pub struct FlatWord<'a> {
    pub token: &'a TranscriptToken,
    pub file: &'a Path,
}

impl Corpus {
    /// Load and parse transcripts for every requested source file, in input
    /// order. Missing transcripts are skipped; a path requested twice is
    /// parsed once.
    pub fn load(
        source: &dyn TranscriptSource,
        files: &[PathBuf],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut utterances = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for file in files {
            let path = transcript_path(file);
            if !seen.insert(path.clone()) {
                continue;
            }
            let Some(text) = source.load(&path)? else {
                log::warn!("no transcript for {}, skipping", path.display());
                continue;
            };
            let tokens = parse_tokens(&text);
            utterances.extend(group_utterances(&tokens, &path));
        }

        Ok(Self { utterances })
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    /// Every content token in corpus order, tagged with its source file.
    /// Utterance boundaries are deliberately invisible here so fragment
    /// matches can span a pause within the same recording.
    pub fn flat_words(&self) -> Vec<FlatWord<'_>> {
        self.utterances
            .iter()
            .flat_map(|u| {
                u.words.iter().map(|token| FlatWord {
                    token,
                    file: u.file.as_path(),
                })
            })
            .collect()
    }

    /// The full transcribed text, one utterance per line.
    pub fn full_text(&self) -> String {
        self.utterances
            .iter()
            .map(|u| u.sentence())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
