use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::filter::candidate::Candidate;
use crate::services::filter::error::FilterError;
use crate::services::filter::matcher::Boundary;
use crate::services::filter::normalizer::Normalizer;
use crate::services::filter::phrase_list::PhraseList;
use crate::services::filter::result::{MatchResult, MatchSource, Severity};
use crate::services::filter::scoped::ScopedPhraseList;

/// Evaluates messages against the hard, soft and per-scope phrase lists.
///
/// The global tiers are loaded once at startup and read-only afterwards.
/// Per-scope lists are mutated through `add`/`remove` while messages are
/// being evaluated.
#[derive(Debug)]
pub struct PhraseFilter {
    normalizer: Arc<Normalizer>,
    hard: PhraseList,
    soft: PhraseList,
    scoped: ScopedPhraseList,
}

impl PhraseFilter {
    pub fn new(normalizer: Normalizer, boundary: Boundary) -> Self {
        let normalizer = Arc::new(normalizer);
        Self {
            hard: PhraseList::new(normalizer.clone(), boundary),
            soft: PhraseList::new(normalizer.clone(), boundary),
            scoped: ScopedPhraseList::new(normalizer.clone(), boundary),
            normalizer,
        }
    }

    /// Load a dictionary into a global tier, skipping invalid phrases.
    /// Returns how many phrases were inserted.
    pub fn load_tier<S: AsRef<str>>(&mut self, severity: Severity, phrases: &[S]) -> usize {
        let list = match severity {
            Severity::Hard => &mut self.hard,
            Severity::Soft => &mut self.soft,
        };

        let mut inserted = 0;
        for phrase in phrases {
            match list.insert(phrase.as_ref()) {
                Ok(true) => inserted += 1,
                Ok(false) => {}
                Err(e) => warn!("Skipping {} phrase: {}", severity.as_str(), e),
            }
        }
        inserted
    }

    pub fn tier(&self, severity: Severity) -> &PhraseList {
        match severity {
            Severity::Hard => &self.hard,
            Severity::Soft => &self.soft,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Check a message posted in `scope`. Missing or blank text never matches.
    pub fn evaluate(&self, scope: &str, text: Option<&str>) -> MatchResult {
        let mut result = MatchResult::default();
        let Some(text) = text else {
            return result;
        };

        let candidate = Candidate::new(text, &self.normalizer);
        if candidate.is_blank() {
            return result;
        }

        for severity in [Severity::Hard, Severity::Soft] {
            for phrase in self.tier(severity).matches(&candidate) {
                result.push(phrase, MatchSource::Global { severity });
            }
        }

        for phrase in self.scoped.matches(scope, &candidate) {
            result.push(
                phrase,
                MatchSource::Scoped {
                    scope: scope.to_string(),
                },
            );
        }

        if !result.is_empty() {
            debug!(
                "Message in scope {} matched {} phrase(s) (normalized: {:?})",
                scope,
                result.len(),
                candidate.normalized()
            );
        }

        result
    }

    /// Ban phrases in a scope. See [`ScopedPhraseList::add`].
    pub fn add<S: AsRef<str>>(&self, scope: &str, phrases: &[S]) -> Result<Vec<String>, FilterError> {
        self.scoped.add(scope, phrases)
    }

    pub fn remove<S: AsRef<str>>(&self, scope: &str, phrases: &[S]) -> Vec<String> {
        self.scoped.remove(scope, phrases)
    }

    pub fn list(&self, scope: &str) -> Vec<String> {
        self.scoped.list(scope)
    }

    /// Forget a scope entirely, e.g. when its channel is deleted
    pub fn clear(&self, scope: &str) -> Vec<String> {
        self.scoped.clear(scope)
    }

    pub fn scoped(&self) -> &ScopedPhraseList {
        &self.scoped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(boundary: Boundary) -> PhraseFilter {
        PhraseFilter::new(Normalizer::default(), boundary)
    }

    #[test]
    fn test_spaced_out_phrase_is_caught() {
        let mut filter = filter(Boundary::Word);
        filter.load_tier(Severity::Hard, &["badword"]);

        let result = filter.evaluate("c1", Some("B A D W O R D!!"));
        assert_eq!(result.hard(), vec!["badword"]);
    }

    #[test]
    fn test_leetspeak_inside_sentence() {
        let mut filter = filter(Boundary::Word);
        filter.load_tier(Severity::Soft, &["badword"]);

        assert_eq!(filter.evaluate("c1", Some("you are a b@dw0rd")).soft(), vec!["badword"]);
        assert_eq!(filter.evaluate("c1", Some("you b.a.d.w.o.r.d")).soft(), vec!["badword"]);
        assert_eq!(filter.evaluate("c1", Some("BAAAADWOOOORD")).soft(), vec!["badword"]);
    }

    #[test]
    fn test_leetspeak_with_trailing_punctuation() {
        let mut filter = filter(Boundary::Word);
        filter.load_tier(Severity::Hard, &["badword", "shit"]);

        for text in [
            "you are a b@dw0rd!",
            "B A D W 0 R D!!",
            "b@dw0rd?!",
            "(b@dw0rd!)",
        ] {
            assert_eq!(filter.evaluate("c1", Some(text)).hard(), vec!["badword"], "{text:?}");
        }

        for text in ["sh!t", "sh!t!", "what the sh!t!!"] {
            assert_eq!(filter.evaluate("c1", Some(text)).hard(), vec!["shit"], "{text:?}");
        }
    }

    #[test]
    fn test_next_word_starting_with_final_letter() {
        let mut filter = filter(Boundary::Word);
        filter.load_tier(Severity::Soft, &["spam", "bad"]);
        filter.add("c1", &["alpha"]).unwrap();

        assert_eq!(filter.evaluate("c1", Some("spam me")).soft(), vec!["spam"]);
        assert_eq!(filter.evaluate("c1", Some("such a bad day")).soft(), vec!["bad"]);
        assert_eq!(filter.evaluate("c1", Some("alpha and omega")).scoped(), vec!["alpha"]);
        assert!(filter.evaluate("c1", Some("spammer")).is_empty());
    }

    #[test]
    fn test_boundary_knob() {
        let mut anchored = filter(Boundary::Word);
        anchored.load_tier(Severity::Soft, &["ok"]);
        assert!(anchored.evaluate("c1", Some("smoker")).is_empty());

        let mut loose = filter(Boundary::None);
        loose.load_tier(Severity::Soft, &["ok"]);
        assert_eq!(loose.evaluate("c1", Some("smoker")).soft(), vec!["ok"]);
    }

    #[test]
    fn test_unrelated_message_is_clean() {
        let mut filter = filter(Boundary::Word);
        filter.load_tier(Severity::Hard, &["badword", "slur"]);
        filter.load_tier(Severity::Soft, &["darn", "heck", "spam"]);
        filter.add("c1", &["spoiler"]).unwrap();

        assert!(filter.evaluate("c1", Some("have a nice day")).is_empty());
    }

    #[test]
    fn test_missing_or_blank_text() {
        let mut filter = filter(Boundary::None);
        filter.load_tier(Severity::Hard, &["a"]);
        assert!(filter.evaluate("c1", None).is_empty());
        assert!(filter.evaluate("c1", Some("")).is_empty());
        assert!(filter.evaluate("c1", Some("   ")).is_empty());
    }

    #[test]
    fn test_tiers_and_scopes_collected_together() {
        let mut filter = filter(Boundary::Word);
        filter.load_tier(Severity::Hard, &["slur"]);
        filter.load_tier(Severity::Soft, &["darn"]);
        filter.add("c1", &["spoiler"]).unwrap();

        let result = filter.evaluate("c1", Some("darn, s.l.u.r and a spoiler"));
        assert_eq!(result.hard(), vec!["slur"]);
        assert_eq!(result.soft(), vec!["darn"]);
        assert_eq!(result.scoped(), vec!["spoiler"]);

        // Scoped phrases only apply in their own scope
        let result = filter.evaluate("c2", Some("a spoiler"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_same_phrase_in_both_tiers() {
        let mut filter = filter(Boundary::Word);
        filter.load_tier(Severity::Hard, &["grr"]);
        filter.load_tier(Severity::Soft, &["grr"]);

        let result = filter.evaluate("c1", Some("grr"));
        assert_eq!(result.hard(), vec!["grr"]);
        assert_eq!(result.soft(), vec!["grr"]);
    }

    #[test]
    fn test_load_tier_skips_invalid() {
        let mut filter = filter(Boundary::Word);
        let inserted = filter.load_tier(Severity::Soft, &["fine", "***", "Fine", "also fine"]);
        assert_eq!(inserted, 2);
        assert_eq!(
            filter.tier(Severity::Soft).phrases().collect::<Vec<_>>(),
            vec!["fine", "also fine"]
        );
    }

    #[test]
    fn test_scoped_lifecycle() {
        let filter = filter(Boundary::Word);
        assert_eq!(filter.add("c1", &["Foo", "foo", "FOO"]).unwrap(), vec!["foo"]);
        assert_eq!(filter.evaluate("c1", Some("f o o")).scoped(), vec!["foo"]);
        assert_eq!(filter.remove("c1", &["foo"]), vec!["foo"]);
        assert!(filter.remove("c1", &["foo"]).is_empty());
        assert!(filter.evaluate("c1", Some("foo")).is_empty());
        assert!(filter.list("c1").is_empty());
    }

    #[test]
    fn test_cleared_scope_stops_matching() {
        let filter = filter(Boundary::Word);
        filter.add("c1", &["spoiler"]).unwrap();
        assert_eq!(filter.clear("c1"), vec!["spoiler"]);
        assert!(filter.evaluate("c1", Some("a spoiler")).is_empty());
    }
}
