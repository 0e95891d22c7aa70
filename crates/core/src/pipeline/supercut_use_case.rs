use std::path::{Path, PathBuf};

use rand::RngCore;

use crate::compose::domain::composer::{ComposeOptions, ComposeReport, Composer};
use crate::search::domain::match_record::MatchRecord;
use crate::search::domain::query::{search, SearchMode};
use crate::transcript::domain::corpus::Corpus;
use crate::transcript::domain::transcript_source::TranscriptSource;

/// Terminal result of one search→compose run.
#[derive(Debug)]
pub enum SupercutOutcome {
    /// Zero matches: reported to the caller, nothing written.
    NoMatches,
    Rendered(ComposeReport),
}

/// The full pipeline behind the `search` command: load the corpus, run the
/// query, splice the output track. Zero matches halts before composition.
pub struct SupercutUseCase {
    transcripts: Box<dyn TranscriptSource>,
    composer: Composer,
}

impl SupercutUseCase {
    pub fn new(transcripts: Box<dyn TranscriptSource>, composer: Composer) -> Self {
        Self {
            transcripts,
            composer,
        }
    }

    /// Search only, for demo output and for callers composing separately.
    pub fn search(
        &self,
        files: &[PathBuf],
        query: &str,
        mode: SearchMode,
        regex: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<MatchRecord>, Box<dyn std::error::Error>> {
        let corpus = Corpus::load(self.transcripts.as_ref(), files)?;
        search(&corpus, query, mode, regex, rng)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        files: &[PathBuf],
        query: &str,
        mode: SearchMode,
        regex: bool,
        rng: &mut dyn RngCore,
        output: &Path,
        options: &ComposeOptions,
    ) -> Result<SupercutOutcome, Box<dyn std::error::Error>> {
        let matches = self.search(files, query, mode, regex, rng)?;
        if matches.is_empty() {
            return Ok(SupercutOutcome::NoMatches);
        }

        log::info!("generating supercut from {} matches", matches.len());
        let report = self.composer.compose(&matches, output, options)?;
        Ok(SupercutOutcome::Rendered(report))
    }
}
