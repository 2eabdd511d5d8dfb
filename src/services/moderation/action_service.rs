use std::sync::Arc;

use serenity::all::{ChannelId, Context, CreateEmbed, CreateEmbedFooter, CreateMessage, Message};
use tracing::{debug, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::filter::ALERT_CONTENT_MAX_LEN;
use crate::db::models::FlagAction;
use crate::db::queries::flagged_message;
use crate::services::filter::MatchResult;
use crate::services::moderation::policy::Verdict;
use crate::utils::formatting::{blockquote, format_phrases, mention_channel, mention_user, truncate};

const CONDUCT_NOTICE: &str = "Your message violated this server's code of conduct. \
    A moderator will contact you soon. Repeated violations may result in a ban.";

/// Carry out a verdict for a message.
///
/// Platform and database failures are logged and do not stop the remaining steps.
pub async fn enforce(
    ctx: &Context,
    data: &Arc<Data>,
    message: &Message,
    verdict: &Verdict,
    result: &MatchResult,
) -> Result<(), Error> {
    let Some(action) = verdict.action() else {
        return Ok(());
    };

    info!(
        "{} message {} from user {} in channel {} (phrases: {:?})",
        action.as_str(),
        message.id,
        message.author.id,
        message.channel_id,
        verdict.phrases()
    );

    if verdict.deletes() {
        if let Err(e) = message.delete(ctx).await {
            warn!("Failed to delete message {}: {:?}", message.id, e);
        }
    }

    let previous_flags = previous_flag_count(data, message).await;

    if let Err(e) = record(data, message, action, result).await {
        warn!("Failed to record flagged message {}: {:?}", message.id, e);
    }

    match verdict {
        Verdict::Allow => {}
        Verdict::Delete { phrases } => {
            let embed = embeds::error_embed()
                .title("Message Auto-Deleted")
                .description(format!(
                    "Message by {} in {} was deleted.\n{}",
                    mention_user(message.author.id),
                    mention_channel(message.channel_id.get()),
                    message.link()
                ));
            notify_moderators(ctx, data, alert_fields(embed, phrases, previous_flags)).await;

            let notice = embeds::error_embed()
                .title("Message Deleted")
                .description(CONDUCT_NOTICE);
            notify_author(ctx, message, notice).await;
        }
        Verdict::ChannelBan { phrases } => {
            let notice = embeds::warning_embed()
                .title("Message Deleted")
                .description(format!(
                    "{} {} banned in {}. Your message was deleted.",
                    format_phrases(phrases),
                    if phrases.len() == 1 { "is" } else { "are" },
                    mention_channel(message.channel_id.get())
                ));
            notify_author(ctx, message, notice).await;
        }
        Verdict::Flag { phrases } => {
            let embed = embeds::warning_embed()
                .title("Possible Flagged Message")
                .description(format!(
                    "From {} in {}:\n{}\n{}",
                    mention_user(message.author.id),
                    mention_channel(message.channel_id.get()),
                    blockquote(&truncate(&message.content, ALERT_CONTENT_MAX_LEN)),
                    message.link()
                ));
            notify_moderators(ctx, data, alert_fields(embed, phrases, previous_flags)).await;
        }
    }

    Ok(())
}

fn alert_fields(embed: CreateEmbed, phrases: &[String], previous_flags: Option<i64>) -> CreateEmbed {
    let embed = embed
        .field("Matched", format_phrases(phrases), false)
        .footer(CreateEmbedFooter::new("Reply here once dealt with"));

    match previous_flags {
        Some(count) => embed.field("Previous flags", count.to_string(), true),
        None => embed,
    }
}

async fn notify_moderators(ctx: &Context, data: &Arc<Data>, embed: CreateEmbed) {
    let Some(channel_id) = data.settings.alert_channel_id else {
        debug!("No alert channel configured, skipping moderator notice");
        return;
    };

    if let Err(e) = ChannelId::new(channel_id)
        .send_message(ctx, CreateMessage::new().embed(embed))
        .await
    {
        warn!("Failed to notify moderators in channel {}: {:?}", channel_id, e);
    }
}

async fn notify_author(ctx: &Context, message: &Message, embed: CreateEmbed) {
    if let Err(e) = message
        .author
        .direct_message(ctx, CreateMessage::new().embed(embed))
        .await
    {
        // Users can close their DMs
        debug!("Could not DM user {}: {:?}", message.author.id, e);
    }
}

async fn previous_flag_count(data: &Arc<Data>, message: &Message) -> Option<i64> {
    let guild_id = message.guild_id?;
    match flagged_message::count_for_user(
        &data.pool,
        guild_id.get() as i64,
        message.author.id.get() as i64,
    )
    .await
    {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("Failed to count flags for user {}: {:?}", message.author.id, e);
            None
        }
    }
}

async fn record(
    data: &Arc<Data>,
    message: &Message,
    action: FlagAction,
    result: &MatchResult,
) -> Result<(), Error> {
    let matched = serde_json::to_string(&result.matches)?;
    let display_name = message
        .author
        .global_name
        .clone()
        .unwrap_or_else(|| message.author.name.clone());

    flagged_message::create(
        &data.pool,
        message.guild_id.map(|id| id.get() as i64),
        message.channel_id.get() as i64,
        message.id.get() as i64,
        message.author.id.get() as i64,
        &display_name,
        &message.content,
        action,
        &matched,
    )
    .await?;

    Ok(())
}
