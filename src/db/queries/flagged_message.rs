use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{FlagAction, FlaggedMessage};

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    guild_id: Option<i64>,
    channel_id: i64,
    message_id: i64,
    user_id: i64,
    display_name: &str,
    content: &str,
    action: FlagAction,
    matched_phrases: &str,
) -> Result<FlaggedMessage, sqlx::Error> {
    sqlx::query_as::<_, FlaggedMessage>(
        r#"
        INSERT INTO flagged_messages
            (id, guild_id, channel_id, message_id, user_id, display_name, content, action, matched_phrases)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#
    )
    .bind(Uuid::new_v4())
    .bind(guild_id)
    .bind(channel_id)
    .bind(message_id)
    .bind(user_id)
    .bind(display_name)
    .bind(content)
    .bind(action.as_str())
    .bind(matched_phrases)
    .fetch_one(pool)
    .await
}

pub async fn count_for_user(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM flagged_messages WHERE guild_id = $1 AND user_id = $2"
    )
    .bind(guild_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
