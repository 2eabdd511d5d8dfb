use serde::{Deserialize, Serialize};

/// Strength of the response a global phrase list triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Auto-delete
    Hard,
    /// Flag for review
    Soft,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hard => "hard",
            Severity::Soft => "soft",
        }
    }
}

/// Which list a matched phrase came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "list", rename_all = "lowercase")]
pub enum MatchSource {
    Global { severity: Severity },
    Scoped { scope: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub phrase: String,
    pub source: MatchSource,
}

/// Every phrase a message matched, across all lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<PhraseMatch>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub(crate) fn push(&mut self, phrase: impl Into<String>, source: MatchSource) {
        self.matches.push(PhraseMatch {
            phrase: phrase.into(),
            source,
        });
    }

    pub fn phrases(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.phrase.as_str()).collect()
    }

    /// Phrases matched from the global list of the given severity
    pub fn with_severity(&self, severity: Severity) -> Vec<&str> {
        self.matches
            .iter()
            .filter(|m| m.source == MatchSource::Global { severity })
            .map(|m| m.phrase.as_str())
            .collect()
    }

    pub fn hard(&self) -> Vec<&str> {
        self.with_severity(Severity::Hard)
    }

    pub fn soft(&self) -> Vec<&str> {
        self.with_severity(Severity::Soft)
    }

    /// Phrases matched from per-scope lists
    pub fn scoped(&self) -> Vec<&str> {
        self.matches
            .iter()
            .filter(|m| matches!(m.source, MatchSource::Scoped { .. }))
            .map(|m| m.phrase.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchResult {
        let mut result = MatchResult::default();
        result.push("slur", MatchSource::Global { severity: Severity::Hard });
        result.push("darn", MatchSource::Global { severity: Severity::Soft });
        result.push("heck", MatchSource::Global { severity: Severity::Soft });
        result.push(
            "spoilers",
            MatchSource::Scoped {
                scope: "42".to_string(),
            },
        );
        result
    }

    #[test]
    fn test_partitions_by_source() {
        let result = sample();
        assert_eq!(result.len(), 4);
        assert_eq!(result.hard(), vec!["slur"]);
        assert_eq!(result.soft(), vec!["darn", "heck"]);
        assert_eq!(result.scoped(), vec!["spoilers"]);
        assert_eq!(result.phrases(), vec!["slur", "darn", "heck", "spoilers"]);
    }

    #[test]
    fn test_empty_result() {
        let result = MatchResult::default();
        assert!(result.is_empty());
        assert!(result.hard().is_empty());
        assert!(result.scoped().is_empty());
    }

    #[test]
    fn test_serializes_source_tag() {
        let json = serde_json::to_value(&sample().matches[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "phrase": "slur",
                "source": { "list": "global", "severity": "hard" }
            })
        );

        let json = serde_json::to_string(&sample()).unwrap();
        let back: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
