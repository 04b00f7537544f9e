// Keyword extraction: fixed-vocabulary matching.

pub mod presets;
pub mod substring;
pub mod traits;
pub mod vocabulary;
