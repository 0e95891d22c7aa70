use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::compose::domain::audio_sink::AudioSink;
use crate::compose::domain::audio_source::AudioSource;
use crate::compose::domain::decode_cache::DecodeCache;
use crate::shared::constants::COMPOSE_SAMPLE_RATE;
use crate::transcript::domain::corpus::{audio_path, Corpus};
use crate::transcript::domain::transcript_source::TranscriptSource;

/// Cuts every recognized word of the corpus into its own audio file,
/// named after the word. Repeated words get `_1`, `_2`, … suffixes so
/// nothing is overwritten. Per-word slice failures are skipped.
pub struct ExtractWordsUseCase {
    transcripts: Box<dyn TranscriptSource>,
    source: Box<dyn AudioSource>,
    sink: Box<dyn AudioSink>,
}

impl ExtractWordsUseCase {
    pub fn new(
        transcripts: Box<dyn TranscriptSource>,
        source: Box<dyn AudioSource>,
        sink: Box<dyn AudioSink>,
    ) -> Self {
        Self {
            transcripts,
            source,
            sink,
        }
    }

    /// Returns the paths written, in corpus order.
    pub fn run(
        &self,
        files: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        std::fs::create_dir_all(output_dir)?;

        let corpus = Corpus::load(self.transcripts.as_ref(), files)?;
        let mut cache = DecodeCache::new(self.source.as_ref(), COMPOSE_SAMPLE_RATE);
        let mut taken: HashSet<PathBuf> = HashSet::new();
        let mut written = Vec::new();

        for flat in corpus.flat_words() {
            let source_path = audio_path(flat.file);
            let extension = source_path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("wav")
                .to_string();

            let decoded = match cache.get(&source_path) {
                Ok(decoded) => decoded,
                Err(e) => {
                    log::warn!("cannot decode {}: {e}", source_path.display());
                    continue;
                }
            };
            let clip =
                match decoded.slice_ms(flat.token.start * 1000.0, flat.token.end * 1000.0) {
                    Ok(clip) => clip,
                    Err(e) => {
                        log::warn!("skipping '{}': {e}", flat.token.word);
                        continue;
                    }
                };

            let out = next_free_name(output_dir, &flat.token.word, &extension, &mut taken);
            self.sink.export(&out, &clip)?;
            log::debug!("exported {}", out.display());
            written.push(out);
        }

        Ok(written)
    }
}

/// First `<word>.<ext>`, `<word>_1.<ext>`, … not yet taken in this run or
/// already on disk.
fn next_free_name(
    dir: &Path,
    word: &str,
    extension: &str,
    taken: &mut HashSet<PathBuf>,
) -> PathBuf {
    let mut number = 0usize;
    loop {
        let name = if number == 0 {
            format!("{word}.{extension}")
        } else {
            format!("{word}_{number}.{extension}")
        };
        let candidate = dir.join(name);
        if !candidate.exists() && taken.insert(candidate.clone()) {
            return candidate;
        }
        number += 1;
    }
}
