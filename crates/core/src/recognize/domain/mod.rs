pub mod audio_normalizer;
pub mod error;
pub mod speech_recognizer;
