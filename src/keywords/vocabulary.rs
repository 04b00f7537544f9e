// Vocabulary: the fixed, ordered dictionary of tracked terms.
//
// Entries are unique under case-insensitive comparison; a duplicate is a
// configuration error caught at load time. Each entry gets a dense
// KeywordId (its position), and the upper-cased form is precomputed once so
// matching doesn't re-fold the vocabulary for every document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Position of a term in its vocabulary. Ordering follows vocabulary order,
/// which is the canonical order for edge endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeywordId(pub usize);

#[derive(Debug, Clone)]
struct Entry {
    term: String,
    upper: String,
}

/// An ordered, case-insensitively deduplicated set of keyword strings.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<Entry>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting empty and case-insensitive duplicate
    /// entries. Surrounding whitespace is trimmed.
    pub fn new<I, S>(terms: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<Entry> = Vec::new();

        for (position, raw) in terms.into_iter().enumerate() {
            let term = raw.as_ref().trim();
            if term.is_empty() {
                return Err(ConfigError::EmptyKeyword { position });
            }

            let upper = term.to_uppercase();
            if let Some(existing) = entries.iter().find(|e| e.upper == upper) {
                return Err(ConfigError::DuplicateKeyword {
                    existing: existing.term.clone(),
                    duplicate: term.to_string(),
                });
            }

            entries.push(Entry {
                term: term.to_string(),
                upper,
            });
        }

        if entries.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }

        Ok(Self { entries })
    }

    /// Parse a vocabulary file: one term per line, `#` comments and blank
    /// lines ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("vocabulary file not found: {}", path.display()))?;
        let vocabulary = Self::parse(&content)
            .with_context(|| format!("invalid vocabulary in {}", path.display()))?;
        Ok(vocabulary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical term for an id. Ids only come from this vocabulary, so an
    /// out-of-range id is a programming error.
    pub fn term(&self, id: KeywordId) -> &str {
        &self.entries[id.0].term
    }

    pub(crate) fn upper(&self, id: KeywordId) -> &str {
        &self.entries[id.0].upper
    }

    /// Look up a term, case-insensitively.
    pub fn id_of(&self, term: &str) -> Option<KeywordId> {
        let upper = term.trim().to_uppercase();
        self.entries
            .iter()
            .position(|e| e.upper == upper)
            .map(KeywordId)
    }

    pub fn ids(&self) -> impl Iterator<Item = KeywordId> {
        (0..self.entries.len()).map(KeywordId)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.term.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_duplicate_rejected() {
        let err = Vocabulary::new(["HBM", "DRAM", "hbm"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateKeyword {
                existing: "HBM".to_string(),
                duplicate: "hbm".to_string(),
            }
        );
    }

    #[test]
    fn test_order_preserved() {
        let vocab = Vocabulary::new(["HBM", "DRAM", "AI"]).unwrap();
        let terms: Vec<&str> = vocab.terms().collect();
        assert_eq!(terms, vec!["HBM", "DRAM", "AI"]);
        assert_eq!(vocab.id_of("dram"), Some(KeywordId(1)));
        assert_eq!(vocab.id_of("NAND"), None);
    }

    #[test]
    fn test_parse_skips_comments() {
        let vocab = Vocabulary::parse("# memory\nHBM\n\n  DRAM  \n# apps\nAI\n").unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.term(KeywordId(1)), "DRAM");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(
            Vocabulary::new(Vec::<String>::new()).unwrap_err(),
            ConfigError::EmptyVocabulary
        );
        assert_eq!(
            Vocabulary::new(["HBM", " "]).unwrap_err(),
            ConfigError::EmptyKeyword { position: 1 }
        );
    }
}
