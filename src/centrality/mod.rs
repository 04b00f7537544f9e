// Centrality over time: per-bucket scores, the long-form table, and the
// queries built on it.

pub mod table;
pub mod tracker;
pub mod transition;
pub mod trends;
