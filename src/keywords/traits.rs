// Keyword matcher trait: swap-ready abstraction.
//
// The default matcher is plain substring containment, but a tokenizer or a
// multi-pattern automaton can be dropped in as long as overlapping entries
// still match independently (a text about "HBM3E" counts for "HBM" too).

use std::collections::BTreeSet;

use super::vocabulary::{KeywordId, Vocabulary};

/// The vocabulary entries a single document mentions, in vocabulary order.
pub type KeywordSet = BTreeSet<KeywordId>;

/// Maps free text to the subset of a fixed vocabulary it mentions.
///
/// Implementations must be pure: the same text and vocabulary always yield
/// the same set. `Sync` so bucket networks can be built in parallel.
pub trait KeywordMatcher: Sync {
    fn extract(&self, text: &str, vocabulary: &Vocabulary) -> KeywordSet;

    /// Extract from text that may be missing entirely. Missing text mentions
    /// nothing.
    fn extract_opt(&self, text: Option<&str>, vocabulary: &Vocabulary) -> KeywordSet {
        match text {
            Some(text) => self.extract(text, vocabulary),
            None => KeywordSet::new(),
        }
    }
}
