use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;

use crate::services::filter::candidate::Candidate;
use crate::services::filter::error::FilterError;
use crate::services::filter::matcher::Boundary;
use crate::services::filter::normalizer::Normalizer;
use crate::services::filter::phrase_list::{PhraseEntry, PhraseList};

/// Per-scope banned phrase lists (scope = channel id).
///
/// Each scope's list sits behind its own map entry, so a mutation holds the
/// shard lock for that scope only and never nests another acquisition.
pub struct ScopedPhraseList {
    normalizer: Arc<Normalizer>,
    boundary: Boundary,
    /// scope -> phrase list
    scopes: DashMap<String, PhraseList>,
}

impl ScopedPhraseList {
    pub fn new(normalizer: Arc<Normalizer>, boundary: Boundary) -> Self {
        Self {
            normalizer,
            boundary,
            scopes: DashMap::new(),
        }
    }

    /// Add phrases to a scope, returning the ones newly inserted.
    ///
    /// All phrases are compiled before the scope is touched: one invalid
    /// phrase rejects the whole batch and nothing is inserted.
    pub fn add<S: AsRef<str>>(&self, scope: &str, phrases: &[S]) -> Result<Vec<String>, FilterError> {
        let mut compiled = Vec::with_capacity(phrases.len());
        for phrase in phrases {
            if let Some(entry) =
                PhraseEntry::compile(phrase.as_ref(), &self.normalizer, self.boundary)?
            {
                compiled.push(entry);
            }
        }

        if compiled.is_empty() {
            return Ok(Vec::new());
        }

        let mut list = self
            .scopes
            .entry(scope.to_string())
            .or_insert_with(|| PhraseList::new(self.normalizer.clone(), self.boundary));

        let mut added = Vec::new();
        for entry in compiled {
            let phrase = entry.phrase().to_string();
            if list.insert_entry(entry) {
                added.push(phrase);
            }
        }

        Ok(added)
    }

    /// Remove phrases from a scope, returning the ones that were present
    pub fn remove<S: AsRef<str>>(&self, scope: &str, phrases: &[S]) -> Vec<String> {
        let (removed, emptied) = match self.scopes.get_mut(scope) {
            Some(mut list) => {
                let mut removed = Vec::new();
                let mut seen = HashSet::new();
                for phrase in phrases {
                    let phrase = phrase.as_ref().trim().to_lowercase();
                    if seen.insert(phrase.clone()) && list.remove(&phrase) {
                        removed.push(phrase);
                    }
                }
                (removed, list.is_empty())
            }
            None => return Vec::new(),
        };

        // The entry guard is released above, pruning takes the lock afresh
        if emptied {
            self.prune(scope);
        }

        removed
    }

    /// Drop a whole scope, returning its phrases in insertion order
    pub fn clear(&self, scope: &str) -> Vec<String> {
        self.scopes
            .remove(scope)
            .map(|(_, list)| list.phrases().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Current phrases of a scope in insertion order
    pub fn list(&self, scope: &str) -> Vec<String> {
        self.scopes
            .get(scope)
            .map(|list| list.phrases().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Phrases of a scope matched by the candidate, read under the scope's guard
    pub fn matches(&self, scope: &str, candidate: &Candidate) -> Vec<String> {
        self.scopes
            .get(scope)
            .map(|list| {
                list.matches(candidate)
                    .into_iter()
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Scopes that currently have at least one phrase
    pub fn scopes(&self) -> Vec<String> {
        let mut scopes: Vec<String> = self.scopes.iter().map(|e| e.key().clone()).collect();
        scopes.sort();
        scopes
    }

    fn prune(&self, scope: &str) {
        self.scopes.remove_if(scope, |_, list| list.is_empty());
    }
}

impl std::fmt::Debug for ScopedPhraseList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedPhraseList")
            .field("boundary", &self.boundary)
            .field("scope_count", &self.scopes.len())
            .finish_non_exhaustive()
    }
}
