pub mod candidate;
pub mod engine;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod normalizer;
pub mod phrase_list;
pub mod result;
pub mod scoped;

pub use engine::PhraseFilter;
pub use error::FilterError;
pub use matcher::{Boundary, Matcher};
pub use normalizer::{normalize, Normalizer};
pub use result::{MatchResult, MatchSource, PhraseMatch, Severity};
