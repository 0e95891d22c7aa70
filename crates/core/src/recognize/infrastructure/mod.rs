pub mod ffmpeg_normalizer;
pub mod pocketsphinx_recognizer;
pub mod subprocess;
