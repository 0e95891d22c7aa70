pub mod file_transcript_source;
