// Document model and the small amount of normalization done on ingest.
//
// A Document is immutable once built. Its timestamp is kept as the raw
// string so the bucketer can reject (and report) unparseable values instead
// of the loader silently dropping them.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// One news article (or any dated text) in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Cleaned text. `None` means the source had no text at all, which is a
    /// rejection; an empty string is a valid document with no keywords.
    pub text: Option<String>,
    /// Raw timestamp as supplied; parsed lazily with [`parse_date`].
    pub timestamp: String,
    /// Partition label (e.g. the company a news feed belongs to).
    pub subgroup: String,
    /// Any extra fields from the source record, available to
    /// `SubgroupKey::Metadata` selectors.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
        subgroup: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
            timestamp: timestamp.into(),
            subgroup: subgroup.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Calendar date of the document, if the timestamp parses.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.timestamp)
    }
}

/// Date-only formats seen across the news sources.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%Y%m%d"];

/// Date-time formats; only the calendar date is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y.%m.%d. %H:%M",
];

/// Parse a timestamp into a calendar date.
///
/// Accepts the mixed formats the news feeds produce (`2021-03-04`,
/// `2021.03.04`, `2021.03.04.`, `2021/03/04`, `20210304`, date-times and
/// RFC 3339). No timezone conversion is applied: an RFC 3339 value keeps the
/// date as written in its own offset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }

    // "2021.03.04." is a common Korean portal style
    let date_part = trimmed.strip_suffix('.').unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

fn html_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("static pattern compiles"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("static pattern compiles"))
}

/// Strip HTML tags and collapse whitespace runs to single spaces.
pub fn clean_text(text: &str) -> String {
    let without_tags = html_tag_pattern().replace_all(text, "");
    whitespace_pattern()
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 4);
        for raw in [
            "2021-03-04",
            "2021.03.04",
            "2021.03.04.",
            "2021/03/04",
            "20210304",
            "2021-03-04 17:22:01",
            "2021.03.04. 09:15",
            "2021-03-04T23:59:59+09:00",
            "  2021-03-04  ",
        ] {
            assert_eq!(parse_date(raw), expected, "failed on {raw:?}");
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2021-02-30"), None);
        assert_eq!(parse_date("2021-13-01"), None);
    }

    #[test]
    fn test_clean_text_strips_tags() {
        assert_eq!(
            clean_text("<p>HBM3E  <b>양산</b></p>\n\n시작"),
            "HBM3E 양산 시작"
        );
    }

    #[test]
    fn test_document_date() {
        let doc = Document::new("1", "text", "2019.12.31", "Samsung");
        assert_eq!(doc.date(), NaiveDate::from_ymd_opt(2019, 12, 31));
    }
}
