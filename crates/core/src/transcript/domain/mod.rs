pub mod corpus;
pub mod parser;
pub mod token;
pub mod transcript_source;
pub mod utterance;
