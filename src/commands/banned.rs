use std::future::Future;

use poise::serenity_prelude::CreateEmbed;
use tracing::{info, warn};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::queries::channel_banned_phrase;
use crate::handlers::message::scope_for;
use crate::services::filter::loader::parse_phrase_csv;
use crate::services::filter::FilterError;
use crate::utils::formatting::format_phrases;
use crate::utils::permissions;

/// Manage phrases banned in this channel
#[poise::command(slash_command, subcommands("add", "remove", "list"), guild_only)]
pub async fn banned(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/banned add`, `/banned remove`, `/banned list`")
        .await?;
    Ok(())
}

/// Ban phrases in this channel
#[poise::command(slash_command, guild_only)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Comma-separated phrases to ban"] phrases: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let channel_id = ctx.channel_id();
    let author_id = ctx.author().id;

    if !permissions::can_manage_phrases(ctx.serenity_context(), guild_id, channel_id, author_id).await {
        return reply(
            ctx,
            embeds::error_embed()
                .title("Permission Denied")
                .description("Only channel managers can add banned phrases."),
        )
        .await;
    }

    let requested = parse_phrase_csv(&phrases);
    if requested.is_empty() {
        return reply(
            ctx,
            embeds::error_embed()
                .title("No Phrases")
                .description("Please provide one or more comma-separated phrases to ban."),
        )
        .await;
    }

    let scope = scope_for(channel_id);
    let filter = &ctx.data().filter;
    let added = match filter.add(&scope, &requested) {
        Ok(added) => added,
        Err(FilterError::InvalidPhrase(phrase)) => {
            return reply(
                ctx,
                embeds::error_embed()
                    .title("Invalid Phrase")
                    .description(format!(
                        "`{}` has no letters once symbols are stripped, so it would match everything. Nothing was added.",
                        phrase
                    )),
            )
            .await;
        }
        Err(e) => return Err(e.into()),
    };

    let pool = &ctx.data().pool;
    let (guild, channel, author) = (
        guild_id.get() as i64,
        channel_id.get() as i64,
        author_id.get() as i64,
    );
    persist_each(
        &added,
        |phrase| async move {
            channel_banned_phrase::insert(pool, guild, channel, &phrase, author).await?;
            Ok::<(), Error>(())
        },
        |unsaved| {
            filter.remove(&scope, unsaved);
        },
    )
    .await?;

    info!(
        "User {} banned {} phrase(s) in channel {}",
        author_id,
        added.len(),
        channel_id
    );

    let embed = if added.is_empty() {
        embeds::standard_embed()
            .title("Nothing Added")
            .description("Those phrases are already banned in this channel.")
    } else {
        embeds::success_embed()
            .title("Banned Phrases Added")
            .description(format!("Added for this channel: {}", format_phrases(&added)))
    };

    reply(ctx, embed).await
}

/// Unban phrases in this channel
#[poise::command(slash_command, guild_only)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Comma-separated phrases to unban"] phrases: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let channel_id = ctx.channel_id();
    let author_id = ctx.author().id;

    if !permissions::can_manage_phrases(ctx.serenity_context(), guild_id, channel_id, author_id).await {
        return reply(
            ctx,
            embeds::error_embed()
                .title("Permission Denied")
                .description("Only channel managers can remove banned phrases."),
        )
        .await;
    }

    let requested = parse_phrase_csv(&phrases);
    if requested.is_empty() {
        return reply(
            ctx,
            embeds::error_embed()
                .title("No Phrases")
                .description("Please provide one or more comma-separated phrases to remove."),
        )
        .await;
    }

    let scope = scope_for(channel_id);
    let filter = &ctx.data().filter;
    let removed = filter.remove(&scope, &requested);

    let pool = &ctx.data().pool;
    let channel = channel_id.get() as i64;
    persist_each(
        &removed,
        |phrase| async move {
            if !channel_banned_phrase::delete(pool, channel, &phrase).await? {
                warn!("Phrase {:?} for channel {} was not stored", phrase, channel);
            }
            Ok::<(), Error>(())
        },
        |unsaved| {
            if let Err(e) = filter.add(&scope, unsaved) {
                warn!("Failed to restore phrases in channel {}: {}", channel, e);
            }
        },
    )
    .await?;

    let embed = if removed.is_empty() {
        embeds::error_embed()
            .title("Not Found")
            .description("None of the specified phrases were found in the banned list.")
    } else {
        info!(
            "User {} unbanned {} phrase(s) in channel {}",
            author_id,
            removed.len(),
            channel_id
        );
        embeds::success_embed()
            .title("Banned Phrases Removed")
            .description(format!("Removed: {}", format_phrases(&removed)))
    };

    reply(ctx, embed).await
}

/// Show phrases banned in this channel
#[poise::command(slash_command, guild_only)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let phrases = ctx.data().filter.list(&scope_for(ctx.channel_id()));

    let embed = if phrases.is_empty() {
        embeds::standard_embed()
            .title("Banned Phrases")
            .description("No banned phrases set for this channel.")
    } else {
        embeds::standard_embed()
            .title(format!("Banned Phrases ({})", phrases.len()))
            .description(embeds::bullet_list(&phrases))
    };

    reply(ctx, embed).await
}

/// Write each changed phrase to the database in order. On the first failure
/// `undo` gets the phrases not yet written, so memory matches what is stored.
async fn persist_each<F, Fut>(
    phrases: &[String],
    mut store: F,
    undo: impl FnOnce(&[String]),
) -> Result<(), Error>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(), Error>>,
{
    for (index, phrase) in phrases.iter().enumerate() {
        if let Err(e) = store(phrase.clone()).await {
            undo(&phrases[index..]);
            return Err(e);
        }
    }
    Ok(())
}

async fn reply(ctx: Context<'_>, embed: CreateEmbed) -> Result<(), Error> {
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}
