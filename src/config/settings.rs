use std::env;

use crate::constants::filter::{DEFAULT_HARD_PHRASES_PATH, DEFAULT_SOFT_PHRASES_PATH};
use crate::services::filter::loader::parse_phrase_csv;
use crate::services::filter::Boundary;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    pub guild_id: Option<u64>,
    /// Channel where moderators get deletion and flag notices
    pub alert_channel_id: Option<u64>,
    /// Auto-delete dictionary, one phrase per line
    pub hard_phrases_path: String,
    /// Flag-for-review dictionary, one phrase per line
    pub soft_phrases_path: String,
    /// Extra flag-for-review phrases from BANNED_WORDS (comma-separated)
    pub banned_words: Vec<String>,
    /// Anchor matches at word boundaries
    pub word_boundaries: bool,
    /// Additional symbols stripped before matching
    pub extra_dropped_chars: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set")?;

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let alert_channel_id = env::var("ALERT_CHANNEL_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let hard_phrases_path = env::var("HARD_PHRASES_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HARD_PHRASES_PATH.to_string());

        let soft_phrases_path = env::var("SOFT_PHRASES_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOFT_PHRASES_PATH.to_string());

        let banned_words = env::var("BANNED_WORDS")
            .map(|s| parse_phrase_csv(&s))
            .unwrap_or_default();

        let word_boundaries = match env::var("MATCH_WORD_BOUNDARIES") {
            Ok(value) => parse_flag(&value)
                .ok_or_else(|| format!("MATCH_WORD_BOUNDARIES must be true or false, got {:?}", value))?,
            Err(_) => true,
        };

        let extra_dropped_chars = env::var("EXTRA_DROPPED_CHARS").unwrap_or_default();

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            alert_channel_id,
            hard_phrases_path,
            soft_phrases_path,
            banned_words,
            word_boundaries,
            extra_dropped_chars,
        })
    }

    pub fn boundary(&self) -> Boundary {
        if self.word_boundaries {
            Boundary::Word
        } else {
            Boundary::None
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("No"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
