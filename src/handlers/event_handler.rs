use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{debug, error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::queries::channel_banned_phrase;
use crate::handlers::message;

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::Message { new_message } => {
            if let Err(e) = message::handle_message(ctx, data, new_message).await {
                error!("Message handler error: {:?}", e);
            }
        }

        FullEvent::ChannelDelete { channel, .. } => {
            let dropped = data.filter.clear(&message::scope_for(channel.id));
            match channel_banned_phrase::delete_channel(&data.pool, channel.id.get() as i64).await {
                Ok(rows) => debug!(
                    "Channel {} deleted, dropped {} banned phrases ({} stored)",
                    channel.id,
                    dropped.len(),
                    rows
                ),
                Err(e) => warn!("Failed to delete stored phrases for channel {}: {:?}", channel.id, e),
            }
        }

        _ => {}
    }

    Ok(())
}
