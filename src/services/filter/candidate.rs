use crate::services::filter::normalizer::Normalizer;

/// The forms of one message that phrases are tested against.
///
/// A phrase counts as matched if it matches any form:
/// - `lowered`: the raw text lower-cased, keeps spacing cues
/// - `folded`: look-alikes substituted, punctuation and spaces kept
/// - `inner`: like `folded`, but symbols at word edges stay punctuation
/// - `normalized`: letters only, catches fully spaced-out evasions
#[derive(Debug, Clone)]
pub struct Candidate {
    lowered: String,
    folded: String,
    inner: String,
    normalized: String,
}

impl Candidate {
    pub fn new(text: &str, normalizer: &Normalizer) -> Self {
        Self {
            lowered: text.to_lowercase(),
            folded: normalizer.fold(text),
            inner: normalizer.fold_inner(text),
            normalized: normalizer.normalize(text),
        }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn forms(&self) -> [&str; 4] {
        [&self.lowered, &self.folded, &self.inner, &self.normalized]
    }

    pub fn is_blank(&self) -> bool {
        self.lowered.trim().is_empty()
    }
}
