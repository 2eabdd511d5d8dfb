//! Loose phrase matching.
//!
//! A phrase such as "spam" is compiled into runs of letters. A candidate
//! matches when each run appears in order, every run being one or more
//! repetitions of its letter with any number of separator characters
//! (anything that is not ASCII alphanumeric) after each repetition. So
//! "s.p.a.m", "ssspaaaam" and "s p a m" all match "spam".
//!
//! Evaluation is a single forward scan over the candidate's bytes. There is no
//! backtracking: a failed attempt resumes after the first run's region, and
//! each byte is revisited at most once per run, so the cost is bounded by
//! `O(len(candidate) * runs(phrase))`. The match ends after the first letter
//! of the final run that satisfies both its count and the boundary, so
//! "spam me" matches "spam" even though the next word starts with `m`.

use std::ops::Range;

use crate::services::filter::error::FilterError;
use crate::services::filter::normalizer::Normalizer;

/// Whether a match must sit on word boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// The match may not be preceded or followed by a letter or digit
    #[default]
    Word,
    /// The match may start and end anywhere, including inside longer words
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    letter: u8,
    min: usize,
}

enum Attempt {
    Matched(usize),
    Failed { resume: usize },
}

#[derive(Debug, Clone)]
pub struct Matcher {
    normalized: String,
    runs: Vec<Run>,
    boundary: Boundary,
}

impl Matcher {
    /// Compile a phrase. Fails if nothing is left after normalization.
    pub fn build(
        phrase: &str,
        normalizer: &Normalizer,
        boundary: Boundary,
    ) -> Result<Self, FilterError> {
        let normalized = normalizer.normalize(phrase);
        if normalized.is_empty() {
            return Err(FilterError::InvalidPhrase(phrase.to_string()));
        }

        // "book" -> b, oo, k: repeated phrase letters raise the minimum count
        let mut runs: Vec<Run> = Vec::new();
        for letter in normalized.bytes() {
            match runs.last_mut() {
                Some(run) if run.letter == letter => run.min += 1,
                _ => runs.push(Run { letter, min: 1 }),
            }
        }

        Ok(Self {
            normalized,
            runs,
            boundary,
        })
    }

    /// The normalized form of the phrase this matcher was built from
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn test(&self, candidate: &str) -> bool {
        self.find(candidate).is_some()
    }

    /// Byte range of the first match in `candidate`
    pub fn find(&self, candidate: &str) -> Option<Range<usize>> {
        let bytes = candidate.as_bytes();
        let first = self.runs.first()?.letter;
        let mut start = 0;

        while start < bytes.len() {
            if bytes[start].to_ascii_lowercase() != first
                || (self.boundary == Boundary::Word && start > 0 && is_word(bytes[start - 1]))
            {
                start += 1;
                continue;
            }

            match self.attempt(bytes, start) {
                Attempt::Matched(end) => return Some(start..end),
                Attempt::Failed { resume } => start = resume,
            }
        }

        None
    }

    fn attempt(&self, bytes: &[u8], start: usize) -> Attempt {
        let mut pos = start;
        let mut resume = start + 1;
        let last = self.runs.len() - 1;

        for (index, run) in self.runs.iter().enumerate() {
            if bytes.get(pos).map(u8::to_ascii_lowercase) != Some(run.letter) {
                return Attempt::Failed { resume };
            }

            let mut seen = 0;
            while let Some(&byte) = bytes.get(pos) {
                if byte.to_ascii_lowercase() == run.letter {
                    seen += 1;
                    pos += 1;
                    // The final run may end after any of its letters
                    if index == last && seen >= run.min && self.ends_at(bytes, pos) {
                        return Attempt::Matched(pos);
                    }
                } else if is_separator(byte) {
                    pos += 1;
                } else {
                    break;
                }
            }

            // Later starts inside the first run see the same tail with fewer letters
            if index == 0 {
                resume = pos;
            }

            if seen < run.min {
                return Attempt::Failed { resume };
            }
        }

        // Every end of the final run was glued to a following word
        Attempt::Failed { resume }
    }

    fn ends_at(&self, bytes: &[u8], end: usize) -> bool {
        match self.boundary {
            Boundary::Word => !bytes.get(end).is_some_and(|b| is_word(*b)),
            Boundary::None => true,
        }
    }
}

fn is_word(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

// Non-ASCII bytes land here too, so multi-byte characters act as separators
fn is_separator(byte: u8) -> bool {
    !byte.is_ascii_alphanumeric()
}
