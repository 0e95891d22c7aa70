pub mod fragment_search;
pub mod franken_search;
pub mod match_record;
pub mod query;
pub mod sentence_search;
pub mod silence_search;
pub mod word_export;
pub mod word_search;
