use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The phrase has no letters left once normalized, so it would match everything
    #[error("Phrase has no letters after normalization: {0:?}")]
    InvalidPhrase(String),

    /// Substitution keys must not be letters
    #[error("Cannot substitute letter character {0:?}")]
    InvalidSubstitution(char),
}
