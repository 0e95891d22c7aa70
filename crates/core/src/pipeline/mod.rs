pub mod extract_words_use_case;
pub mod supercut_use_case;
pub mod transcribe_corpus_use_case;
