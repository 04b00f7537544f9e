// Substring matcher: the default KeywordMatcher.
//
// An entry matches when its upper-cased form occurs in the upper-cased text,
// or when its exact form occurs in the raw text. The second check covers
// scripts where case folding does nothing useful (Hangul terms like 파운드리).

use super::traits::{KeywordMatcher, KeywordSet};
use super::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl KeywordMatcher for SubstringMatcher {
    fn extract(&self, text: &str, vocabulary: &Vocabulary) -> KeywordSet {
        if text.is_empty() {
            return KeywordSet::new();
        }

        let text_upper = text.to_uppercase();
        vocabulary
            .ids()
            .filter(|&id| {
                text_upper.contains(vocabulary.upper(id)) || text.contains(vocabulary.term(id))
            })
            .collect()
    }
}
