pub mod ffmpeg_audio_sink;
pub mod ffmpeg_audio_source;
