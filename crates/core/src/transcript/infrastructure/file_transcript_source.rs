use std::io::ErrorKind;
use std::path::Path;

use crate::transcript::domain::transcript_source::TranscriptSource;

/// Reads transcripts from the filesystem, next to their audio files.
pub struct FileTranscriptSource;

impl TranscriptSource for FileTranscriptSource {
    fn load(&self, transcript_path: &Path) -> Result<Option<String>, Box<dyn std::error::Error>> {
        match std::fs::read_to_string(transcript_path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3.transcription.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "hello 0.0 0.5 0.9").unwrap();

        let text = FileTranscriptSource.load(&path).unwrap();
        assert_eq!(text.unwrap(), "hello 0.0 0.5 0.9\n");
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.transcription.txt");
        assert!(FileTranscriptSource.load(&path).unwrap().is_none());
    }
}
