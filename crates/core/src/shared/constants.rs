/// Recognizer marker opening an utterance.
pub const UTTERANCE_START: &str = "<s>";

/// Recognizer marker closing an utterance.
pub const UTTERANCE_END: &str = "</s>";

/// Recognizer marker for a pause inside an utterance.
pub const SILENCE: &str = "<sil>";

/// Recognizer token for unintelligible audio. Content, not structural,
/// but fragment search refuses to match across it.
pub const NOISE: &str = "[NOISE]";

/// Suffix appended to an audio path to locate its transcript.
pub const TRANSCRIPT_SUFFIX: &str = ".transcription.txt";

/// Suffix for the intermediate recognizer-ready wav.
pub const TEMP_WAV_SUFFIX: &str = ".temp.wav";

/// Sample rate the recognizer expects (mono 16-bit).
pub const RECOGNIZER_SAMPLE_RATE: u32 = 16000;

/// Sample rate all clips are decoded to for composition, so spans from
/// different sources can be mixed and concatenated directly.
pub const COMPOSE_SAMPLE_RATE: u32 = 44100;

/// Fragment matches longer than this are rejected: a window that long has
/// almost certainly jumped a gap in the flattened token stream.
pub const MAX_FRAGMENT_SPAN_SECS: f64 = 5.0;
