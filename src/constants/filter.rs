/// Look-alike characters and the letter they stand in for
pub const LETTER_SUBSTITUTIONS: &[(char, char)] = &[
    ('0', 'o'),
    ('1', 'i'),
    ('3', 'e'),
    ('4', 'a'),
    ('@', 'a'),
    ('!', 'i'),
    ('$', 's'),
];

/// Symbols removed outright before matching
pub const DROPPED_CHARS: &[char] = &[
    '*', '#', '|', '+', '^', '%', '&', '(', ')', '_', '=', '`', '~',
];

/// Default phrase dictionary paths (overridable via env vars)
pub const DEFAULT_HARD_PHRASES_PATH: &str = ".slurlist";
pub const DEFAULT_SOFT_PHRASES_PATH: &str = ".profanitylist";

/// Lines starting with this are skipped in phrase dictionaries
pub const COMMENT_PREFIX: char = '#';

/// Discord embed description limit is 4096, keep quoted content well under it
pub const ALERT_CONTENT_MAX_LEN: usize = 1000;
