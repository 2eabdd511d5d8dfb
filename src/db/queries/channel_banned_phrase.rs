use sqlx::PgPool;

use crate::db::models::ChannelBannedPhrase;

pub async fn insert(
    pool: &PgPool,
    guild_id: i64,
    channel_id: i64,
    phrase: &str,
    added_by_user_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO channel_banned_phrases (guild_id, channel_id, phrase, added_by_user_id)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (channel_id, phrase) DO NOTHING
        "#
    )
    .bind(guild_id)
    .bind(channel_id)
    .bind(phrase)
    .bind(added_by_user_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete(pool: &PgPool, channel_id: i64, phrase: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM channel_banned_phrases WHERE channel_id = $1 AND phrase = $2"
    )
    .bind(channel_id)
    .bind(phrase)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Forget every phrase of a channel, returning how many rows went
pub async fn delete_channel(pool: &PgPool, channel_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM channel_banned_phrases WHERE channel_id = $1")
        .bind(channel_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// All stored phrases, in the order they were added
pub async fn get_all(pool: &PgPool) -> Result<Vec<ChannelBannedPhrase>, sqlx::Error> {
    sqlx::query_as::<_, ChannelBannedPhrase>(
        "SELECT * FROM channel_banned_phrases ORDER BY id"
    )
    .fetch_all(pool)
    .await
}
