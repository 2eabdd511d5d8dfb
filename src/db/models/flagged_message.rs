use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::services::filter::PhraseMatch;

/// What the bot did with a matched message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagAction {
    Deleted,
    ChannelBan,
    Flagged,
}

impl FlagAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagAction::Deleted => "deleted",
            FlagAction::ChannelBan => "channel_ban",
            FlagAction::Flagged => "flagged",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FlaggedMessage {
    pub id: Uuid,
    pub guild_id: Option<i64>,
    pub channel_id: i64,
    pub message_id: i64,
    pub user_id: i64,
    pub display_name: String,
    pub content: String,
    pub action: String,
    /// JSON-encoded `Vec<PhraseMatch>`
    pub matched_phrases: String,
    pub flagged_at: DateTime<Utc>,
}

impl FlaggedMessage {
    /// Decode the stored matches
    pub fn matches(&self) -> Result<Vec<PhraseMatch>, serde_json::Error> {
        serde_json::from_str(&self.matched_phrases)
    }
}
