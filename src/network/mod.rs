// Co-occurrence networks: one weighted undirected graph per bucket.

pub mod builder;
pub mod graph;
