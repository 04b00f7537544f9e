// Time bucketing: calendar periods and the documents that fall in them.

pub mod bucketer;
pub mod period;
