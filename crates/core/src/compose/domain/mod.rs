pub mod audio_clip;
pub mod audio_sink;
pub mod audio_source;
pub mod composer;
pub mod decode_cache;
