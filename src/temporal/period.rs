// Calendar periods, subgroups and the Bucket key built from them.
//
// Buckets order by period first, then subgroup, so a BTreeMap keyed by
// Bucket iterates in time order with the aggregate ahead of named subgroups.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::corpus::document::Document;
use crate::error::ConfigError;

/// How finely documents are grouped in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Year,
    Quarter,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Quarter => "quarter",
            Granularity::Month => "month",
        }
    }

    /// Truncate a date to its period at this granularity.
    pub fn period_of(&self, date: NaiveDate) -> Period {
        let year = date.year();
        match self {
            Granularity::Year => Period::Year(year),
            Granularity::Quarter => Period::Quarter {
                year,
                quarter: (date.month0() / 3 + 1) as u8,
            },
            Granularity::Month => Period::Month {
                year,
                month: date.month() as u8,
            },
        }
    }
}

impl FromStr for Granularity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "yearly" | "y" => Ok(Granularity::Year),
            "quarter" | "quarterly" | "q" => Ok(Granularity::Quarter),
            "month" | "monthly" | "m" => Ok(Granularity::Month),
            _ => Err(ConfigError::UnknownGranularity(s.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A calendar period label. All periods within one run share a granularity,
/// so comparisons across variants never matter in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    Year(i32),
    Quarter { year: i32, quarter: u8 },
    Month { year: i32, month: u8 },
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(year) => write!(f, "{year}"),
            Period::Quarter { year, quarter } => write!(f, "{year}Q{quarter}"),
            Period::Month { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

/// Which corpus partition a bucket covers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subgroup {
    /// Every document regardless of its subgroup.
    All,
    Named(String),
}

impl Subgroup {
    pub fn label(&self) -> &str {
        match self {
            Subgroup::All => "all",
            Subgroup::Named(name) => name,
        }
    }
}

impl fmt::Display for Subgroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A (period, subgroup) partition of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bucket {
    pub period: Period,
    pub subgroup: Subgroup,
}

impl Bucket {
    pub fn new(period: Period, subgroup: Subgroup) -> Self {
        Self { period, subgroup }
    }

    pub fn all(period: Period) -> Self {
        Self::new(period, Subgroup::All)
    }

    pub fn named(period: Period, name: impl Into<String>) -> Self {
        Self::new(period, Subgroup::Named(name.into()))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subgroup {
            Subgroup::All => write!(f, "{}", self.period),
            Subgroup::Named(name) => write!(f, "{}/{}", self.period, name),
        }
    }
}

/// Selects the Document field that partitions the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubgroupKey {
    /// The document's own `subgroup` field.
    #[default]
    Subgroup,
    /// A metadata field carried over from the source record.
    Metadata(String),
}

impl SubgroupKey {
    /// The partition label for a document. Documents lacking the selected
    /// field (or with an empty value) only join the aggregate.
    pub fn select<'a>(&self, document: &'a Document) -> Option<&'a str> {
        let value = match self {
            SubgroupKey::Subgroup => Some(document.subgroup.as_str()),
            SubgroupKey::Metadata(field) => document.metadata.get(field).map(String::as_str),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

impl FromStr for SubgroupKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "subgroup" || s == "company" {
            return Ok(SubgroupKey::Subgroup);
        }
        match s.strip_prefix("meta:") {
            Some(field) if !field.trim().is_empty() => {
                Ok(SubgroupKey::Metadata(field.trim().to_string()))
            }
            _ => Err(ConfigError::UnknownSubgroupKey(s.to_string())),
        }
    }
}
