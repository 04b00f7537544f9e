// Trendnet: temporal keyword co-occurrence networks
//
// This is the library root. Each module corresponds to one stage of the
// analysis, from raw documents to centrality trends and reports.

pub mod centrality;
pub mod config;
pub mod corpus;
pub mod error;
pub mod keywords;
pub mod network;
pub mod output;
pub mod pipeline;
pub mod temporal;
