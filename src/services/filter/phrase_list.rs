use std::collections::HashSet;
use std::sync::Arc;

use crate::services::filter::candidate::Candidate;
use crate::services::filter::error::FilterError;
use crate::services::filter::matcher::{Boundary, Matcher};
use crate::services::filter::normalizer::Normalizer;

/// A banned phrase with its precompiled matcher
#[derive(Debug, Clone)]
pub struct PhraseEntry {
    phrase: String,
    matcher: Arc<Matcher>,
}

impl PhraseEntry {
    /// Trim, lowercase and compile a phrase. Blank input yields `None`.
    pub fn compile(
        phrase: &str,
        normalizer: &Normalizer,
        boundary: Boundary,
    ) -> Result<Option<Self>, FilterError> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return Ok(None);
        }

        let matcher = Matcher::build(&phrase, normalizer, boundary)?;
        Ok(Some(Self {
            phrase,
            matcher: Arc::new(matcher),
        }))
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        candidate.forms().iter().any(|form| self.matcher.test(form))
    }
}

/// Insertion-ordered set of banned phrases, unique by normalized value
#[derive(Debug, Clone)]
pub struct PhraseList {
    normalizer: Arc<Normalizer>,
    boundary: Boundary,
    entries: Vec<PhraseEntry>,
    normalized: HashSet<String>,
}

impl PhraseList {
    pub fn new(normalizer: Arc<Normalizer>, boundary: Boundary) -> Self {
        Self {
            normalizer,
            boundary,
            entries: Vec::new(),
            normalized: HashSet::new(),
        }
    }

    /// Compile and insert a phrase.
    /// Returns `false` for blank input or when an equivalent phrase is present.
    pub fn insert(&mut self, phrase: &str) -> Result<bool, FilterError> {
        match PhraseEntry::compile(phrase, &self.normalizer, self.boundary)? {
            Some(entry) => Ok(self.insert_entry(entry)),
            None => Ok(false),
        }
    }

    /// Insert an already compiled entry
    pub fn insert_entry(&mut self, entry: PhraseEntry) -> bool {
        if !self.normalized.insert(entry.matcher.normalized().to_string()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove a phrase by its exact lower-cased text
    pub fn remove(&mut self, phrase: &str) -> bool {
        let phrase = phrase.trim().to_lowercase();
        match self.entries.iter().position(|e| e.phrase == phrase) {
            Some(index) => {
                let entry = self.entries.remove(index);
                self.normalized.remove(entry.matcher.normalized());
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, phrase: &str) -> bool {
        let phrase = phrase.trim().to_lowercase();
        self.entries.iter().any(|e| e.phrase == phrase)
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.phrase.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every phrase matching any form of the candidate, in list order
    pub fn matches<'a>(&'a self, candidate: &Candidate) -> Vec<&'a str> {
        self.entries
            .iter()
            .filter(|e| e.matches(candidate))
            .map(|e| e.phrase.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> PhraseList {
        PhraseList::new(Arc::new(Normalizer::default()), Boundary::Word)
    }

    #[test]
    fn test_insert_lowercases_and_dedups() {
        let mut phrases = list();
        assert_eq!(phrases.insert("Foo"), Ok(true));
        assert_eq!(phrases.insert("foo"), Ok(false));
        assert_eq!(phrases.insert("  FOO "), Ok(false));
        // Same normalized value as "foo"
        assert_eq!(phrases.insert("f00"), Ok(false));
        assert_eq!(phrases.insert(""), Ok(false));
        assert_eq!(phrases.phrases().collect::<Vec<_>>(), vec!["foo"]);
    }

    #[test]
    fn test_insert_rejects_letterless_phrase() {
        let mut phrases = list();
        assert_eq!(
            phrases.insert("?.,"),
            Err(FilterError::InvalidPhrase("?.,".to_string()))
        );
        assert!(phrases.is_empty());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut phrases = list();
        for phrase in ["zeta", "alpha", "mid"] {
            phrases.insert(phrase).unwrap();
        }
        assert_eq!(phrases.phrases().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_remove_is_exact_and_frees_normalized_slot() {
        let mut phrases = list();
        phrases.insert("foo").unwrap();
        assert!(!phrases.remove("f00"));
        assert!(phrases.remove("FOO"));
        assert!(!phrases.remove("foo"));
        assert!(phrases.is_empty());
        assert_eq!(phrases.insert("f00"), Ok(true));
        assert!(phrases.contains("F00"));
    }

    #[test]
    fn test_collects_every_match() {
        let mut phrases = list();
        for phrase in ["spam", "eggs", "ham"] {
            phrases.insert(phrase).unwrap();
        }
        let normalizer = Normalizer::default();

        let candidate = Candidate::new("s p a m and E.G.G.S", &normalizer);
        assert_eq!(phrases.matches(&candidate), vec!["spam", "eggs"]);

        let candidate = Candidate::new("have a nice day", &normalizer);
        assert!(phrases.matches(&candidate).is_empty());
    }
}
