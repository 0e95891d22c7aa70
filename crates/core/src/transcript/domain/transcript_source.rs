use std::path::Path;

/// Domain interface for fetching raw transcript text.
///
/// Returns `Ok(None)` when no transcript exists for the path: a missing
/// transcript degrades the result set, it does not abort a corpus load.
pub trait TranscriptSource {
    fn load(&self, transcript_path: &Path) -> Result<Option<String>, Box<dyn std::error::Error>>;
}
