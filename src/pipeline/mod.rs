// Pipeline orchestration: runs the analysis stages in order over a corpus.

pub mod analysis;
