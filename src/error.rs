// Configuration errors: caller mistakes that must stop a run before any
// bucket is processed.
//
// Data conditions (bad timestamps, empty buckets, no crossing) are never
// errors; they show up as rejections or empty results instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("duplicate vocabulary entry {duplicate:?} (case-insensitive match with {existing:?})")]
    DuplicateKeyword { existing: String, duplicate: String },

    #[error("vocabulary entry at position {position} is empty")]
    EmptyKeyword { position: usize },

    #[error("vocabulary has no entries")]
    EmptyVocabulary,

    #[error("min_edge_weight must be a positive integer, got {0}")]
    NonPositiveMinEdgeWeight(i64),

    #[error("min_edge_weight {0} is too large (maximum 4294967295)")]
    MinEdgeWeightTooLarge(i64),

    #[error("unknown granularity {0:?} (expected year, quarter or month)")]
    UnknownGranularity(String),

    #[error("unknown subgroup key {0:?} (expected `subgroup` or `meta:<field>`)")]
    UnknownSubgroupKey(String),

    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: String, value: String },

    #[error("transition keyword {0:?} is not in the vocabulary")]
    UnknownKeyword(String),
}
