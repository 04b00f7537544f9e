use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::corpus::document::parse_date;
use crate::error::ConfigError;
use crate::keywords::vocabulary::Vocabulary;
use crate::network::builder::MinEdgeWeight;
use crate::temporal::bucketer::DateWindow;
use crate::temporal::period::{Granularity, SubgroupKey};

/// Default threshold for the all-subgroups networks.
pub const DEFAULT_MIN_EDGE_WEIGHT: i64 = 5;
/// Default threshold for per-subgroup networks, which see fewer documents.
pub const DEFAULT_SUBGROUP_MIN_EDGE_WEIGHT: i64 = 3;

/// Settings read from the environment (the .env file is loaded at startup
/// via dotenvy). Values are kept raw here; CLI flags may override them
/// before [`Settings::resolve`] validates everything at once.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub granularity: Option<String>,
    pub min_edge_weight: Option<String>,
    pub subgroup_min_edge_weight: Option<String>,
    pub subgroup_key: Option<String>,
    /// Vocabulary file; the built-in semiconductor preset when unset.
    pub vocabulary_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `TRENDNET_*` environment variables. Empty values
    /// count as unset.
    pub fn from_env() -> Self {
        fn var(name: &str) -> Option<String> {
            env::var(name).ok().filter(|v| !v.trim().is_empty())
        }

        Self {
            granularity: var("TRENDNET_GRANULARITY"),
            min_edge_weight: var("TRENDNET_MIN_EDGE_WEIGHT"),
            subgroup_min_edge_weight: var("TRENDNET_SUBGROUP_MIN_EDGE_WEIGHT"),
            subgroup_key: var("TRENDNET_SUBGROUP_KEY"),
            vocabulary_path: var("TRENDNET_VOCABULARY").map(PathBuf::from),
        }
    }

    /// Validate into an AnalysisConfig. Fails on the first bad value.
    pub fn resolve(&self, window: DateWindow) -> Result<AnalysisConfig, ConfigError> {
        let granularity = match &self.granularity {
            Some(raw) => raw.parse()?,
            None => Granularity::default(),
        };
        let subgroup_key = match &self.subgroup_key {
            Some(raw) => raw.parse()?,
            None => SubgroupKey::default(),
        };

        Ok(AnalysisConfig {
            granularity,
            min_edge_weight: parse_weight(
                "min_edge_weight",
                self.min_edge_weight.as_deref(),
                DEFAULT_MIN_EDGE_WEIGHT,
            )?,
            subgroup_min_edge_weight: parse_weight(
                "subgroup_min_edge_weight",
                self.subgroup_min_edge_weight.as_deref(),
                DEFAULT_SUBGROUP_MIN_EDGE_WEIGHT,
            )?,
            subgroup_key,
            window,
            transitions: Vec::new(),
        })
    }
}

fn parse_weight(var: &str, raw: Option<&str>, default: i64) -> Result<MinEdgeWeight, ConfigError> {
    let value = match raw {
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw.to_string(),
        })?,
        None => default,
    };
    MinEdgeWeight::new(value)
}

/// A validated run configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    pub granularity: Granularity,
    /// Threshold for the aggregate (all-subgroups) networks.
    pub min_edge_weight: MinEdgeWeight,
    /// Threshold for each subgroup's networks.
    pub subgroup_min_edge_weight: MinEdgeWeight,
    pub subgroup_key: SubgroupKey,
    pub window: DateWindow,
    /// (legacy, emerging) keyword pairs to check for a crossing.
    pub transitions: Vec<(String, String)>,
}

impl AnalysisConfig {
    /// Attach transition pairs, resolving each keyword to its canonical
    /// vocabulary spelling. Unknown keywords are a configuration error.
    pub fn with_transitions<I, S>(
        mut self,
        pairs: I,
        vocabulary: &Vocabulary,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let canonical = |term: &str| {
            vocabulary
                .id_of(term)
                .map(|id| vocabulary.term(id).to_string())
                .ok_or_else(|| ConfigError::UnknownKeyword(term.to_string()))
        };

        for (legacy, emerging) in pairs {
            self.transitions
                .push((canonical(legacy.as_ref())?, canonical(emerging.as_ref())?));
        }
        Ok(self)
    }
}

/// Split a `LEGACY:EMERGING` pair.
pub fn parse_transition_pair(raw: &str) -> Result<(String, String), ConfigError> {
    match raw.split_once(':') {
        Some((legacy, emerging)) if !legacy.trim().is_empty() && !emerging.trim().is_empty() => {
            Ok((legacy.trim().to_string(), emerging.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidValue {
            var: "transition".to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Parse a window bound given as a bare year or a date. A bare year means
/// January 1st for the start bound and December 31st for the end bound.
pub fn parse_window_bound(raw: &str, is_end: bool) -> Result<NaiveDate, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        var: if is_end { "to" } else { "from" }.to_string(),
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = trimmed.parse().map_err(|_| invalid())?;
        let (month, day) = if is_end { (12, 31) } else { (1, 1) };
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
    }
    parse_date(trimmed).ok_or_else(invalid)
}
