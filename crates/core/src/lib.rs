pub mod compose;
pub mod pipeline;
pub mod recognize;
pub mod search;
pub mod shared;
pub mod transcript;
