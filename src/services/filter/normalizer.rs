use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::constants::filter::{DROPPED_CHARS, LETTER_SUBSTITUTIONS};
use crate::services::filter::error::FilterError;

static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Substitution {
    Letter(char),
    Drop,
}

/// Canonicalizes text into lowercase ASCII letters only
#[derive(Debug, Clone)]
pub struct Normalizer {
    table: HashMap<char, Substitution>,
}

impl Normalizer {
    /// A normalizer with no substitutions at all
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Map `key` to `letter` (e.g. `'5'` -> `'s'`)
    pub fn with_letter(mut self, key: char, letter: char) -> Result<Self, FilterError> {
        Self::check_key(key)?;
        if !letter.is_ascii_lowercase() {
            return Err(FilterError::InvalidSubstitution(letter));
        }
        self.table.insert(key, Substitution::Letter(letter));
        Ok(self)
    }

    /// Remove `key` entirely during normalization
    pub fn with_dropped(mut self, key: char) -> Result<Self, FilterError> {
        Self::check_key(key)?;
        self.table.insert(key, Substitution::Drop);
        Ok(self)
    }

    /// Drop every non-whitespace character in `chars`
    pub fn with_dropped_chars(self, chars: &str) -> Result<Self, FilterError> {
        chars
            .chars()
            .filter(|c| !c.is_whitespace())
            .try_fold(self, |normalizer, c| normalizer.with_dropped(c))
    }

    // Letters as keys would make normalize() non-idempotent
    fn check_key(key: char) -> Result<(), FilterError> {
        if key.is_ascii_alphabetic() {
            return Err(FilterError::InvalidSubstitution(key));
        }
        Ok(())
    }

    fn substitute(&self, c: char) -> Option<char> {
        match self.table.get(&c) {
            Some(Substitution::Letter(letter)) => Some(*letter),
            Some(Substitution::Drop) => None,
            None => Some(c),
        }
    }

    /// Lowercase and apply the substitution table, keeping every other character
    pub fn fold(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .filter_map(|c| self.substitute(c))
            .collect()
    }

    /// Like [`fold`](Self::fold), but a look-alike symbol only becomes a letter
    /// when the same word has a letter or digit on both sides of it.
    ///
    /// Symbols at the edge of a word stay as punctuation, so "sh!t!" folds to
    /// "shit!" rather than "shiti". Digits are always substituted.
    pub fn fold_inner(&self, text: &str) -> String {
        let chars: Vec<char> = text.to_lowercase().chars().collect();
        let in_word = |c: char| c.is_ascii_alphanumeric() || self.table.contains_key(&c);

        // before[i]: a letter or digit precedes i within the same word
        let mut before = vec![false; chars.len()];
        let mut seen = false;
        for (i, &c) in chars.iter().enumerate() {
            if !in_word(c) {
                seen = false;
            }
            before[i] = seen;
            seen |= c.is_ascii_alphanumeric();
        }

        let mut after = vec![false; chars.len()];
        seen = false;
        for (i, &c) in chars.iter().enumerate().rev() {
            if !in_word(c) {
                seen = false;
            }
            after[i] = seen;
            seen |= c.is_ascii_alphanumeric();
        }

        chars
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| {
                let edge_symbol = !c.is_ascii_alphanumeric() && !(before[i] && after[i]);
                match self.table.get(&c) {
                    Some(Substitution::Letter(_)) if edge_symbol => Some(c),
                    _ => self.substitute(c),
                }
            })
            .collect()
    }

    /// Lowercase, substitute look-alikes, then strip everything outside `[a-z]`
    pub fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .filter_map(|c| self.substitute(c))
            .filter(|c| c.is_ascii_lowercase())
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        let mut table = HashMap::with_capacity(LETTER_SUBSTITUTIONS.len() + DROPPED_CHARS.len());
        for (key, letter) in LETTER_SUBSTITUTIONS {
            table.insert(*key, Substitution::Letter(*letter));
        }
        for key in DROPPED_CHARS {
            table.insert(*key, Substitution::Drop);
        }
        Self { table }
    }
}

/// Normalize with the default substitution table
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_spacing_and_punctuation() {
        assert_eq!(normalize("B A D W O R D!!"), "badwordii");
        assert_eq!(normalize("b-a-d-w-o-r-d"), "badword");
        assert_eq!(normalize("b a d w o r d"), "badword");
        assert_eq!(normalize("s-p-a-m"), "spam");
    }

    #[test]
    fn test_leetspeak_substitutions() {
        assert_eq!(normalize("h3ll0"), "hello");
        assert_eq!(normalize("@$$"), "ass");
        assert_eq!(normalize("sh!t"), "shit");
        assert_eq!(normalize("4ng3r"), "anger");
        assert_eq!(normalize("1d10t"), "idiot");
    }

    #[test]
    fn test_dropped_symbols() {
        assert_eq!(normalize("f*u#c|k"), "fuck");
        assert_eq!(normalize("a+b^c%d&e(f)g_h=i`j~k"), "abcdefghijk");
    }

    #[test]
    fn test_strips_unmapped_characters() {
        assert_eq!(normalize("2 cats 🐱 & 5 dogs"), "catsdogs");
        assert_eq!(normalize("Ünïcode"), "ncode");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!?"), "i");
        assert_eq!(normalize("... ,,, ???"), "");
    }

    #[test]
    fn test_output_is_lowercase_ascii_letters() {
        let inputs = [
            "Hello, World!",
            "Th1s 1s 4 t3$t",
            "MiXeD_CaSe~~with||symbols",
            "tab\tnew\nline",
            "日本語 text",
            "İstanbul",
        ];
        for input in inputs {
            let out = normalize(input);
            assert!(out.chars().all(|c| c.is_ascii_lowercase()), "{input:?} -> {out:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "B A D W O R D!!",
            "h3ll0 w0rld",
            "$$$ money $$$",
            "already",
            "",
            "İstanbul",
            "Straße",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_fold_keeps_word_boundaries() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.fold("You B@D w0rd!"), "you bad wordi");
        assert_eq!(normalizer.fold("f*ck off"), "fck off");
    }

    #[test]
    fn test_fold_inner_keeps_edge_symbols() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.fold_inner("sh!t!"), "shit!");
        assert_eq!(normalizer.fold_inner("You B@D w0rd!"), "you bad word!");
        assert_eq!(normalizer.fold_inner("what the sh!t!!"), "what the shit!!");
        assert_eq!(normalizer.fold_inner("B A D W 0 R D!!"), "b a d w o r d!!");
        // Leading symbols and symbol-only words are left alone
        assert_eq!(normalizer.fold_inner("!hi @$$"), "!hi @$$");
        // Digits and dropped characters behave as in fold
        assert_eq!(normalizer.fold_inner("h3ll0 f*ck"), "hello fck");
        assert_eq!(normalizer.fold_inner("b*@*d"), "bad");
    }

    #[test]
    fn test_custom_table() {
        let normalizer = Normalizer::empty()
            .with_letter('5', 's')
            .unwrap()
            .with_dropped_chars("- .")
            .unwrap();
        assert_eq!(normalizer.normalize("5-p.a m"), "spam");
        // Unmapped look-alikes are stripped rather than substituted
        assert_eq!(normalizer.normalize("sp4m"), "spm");
    }

    #[test]
    fn test_rejects_letter_keys() {
        assert_eq!(
            Normalizer::default().with_letter('a', 'b').unwrap_err(),
            FilterError::InvalidSubstitution('a')
        );
        assert_eq!(
            Normalizer::default().with_dropped('Z').unwrap_err(),
            FilterError::InvalidSubstitution('Z')
        );
        assert_eq!(
            Normalizer::default().with_letter('7', 'T').unwrap_err(),
            FilterError::InvalidSubstitution('T')
        );
    }
}
