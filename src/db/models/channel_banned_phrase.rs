use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChannelBannedPhrase {
    pub id: i64,
    pub guild_id: i64,
    pub channel_id: i64,
    pub phrase: String,
    pub added_by_user_id: i64,
    pub added_at: DateTime<Utc>,
}
