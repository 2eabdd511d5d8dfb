use std::sync::Arc;

use serenity::all::{ChannelId, Context, Message};
use tracing::debug;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::services::moderation::action_service;
use crate::services::moderation::policy::Verdict;

/// Phrase list scope for a channel
pub fn scope_for(channel_id: ChannelId) -> String {
    channel_id.get().to_string()
}

/// Check a new message against the phrase lists and act on the verdict
pub async fn handle_message(ctx: &Context, data: &Arc<Data>, message: &Message) -> Result<(), Error> {
    // Bots (including us) are never moderated
    if message.author.bot {
        return Ok(());
    }

    // Evaluation is synchronous, so no filter guard outlives this statement
    let result = data
        .filter
        .evaluate(&scope_for(message.channel_id), Some(message.content.as_str()));

    if result.is_empty() {
        return Ok(());
    }

    let verdict = Verdict::from_result(&result);
    debug!(
        "Message {} in channel {}: {:?}",
        message.id, message.channel_id, verdict
    );

    action_service::enforce(ctx, data, message, &verdict, &result).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_is_channel_id() {
        assert_eq!(scope_for(ChannelId::new(1234567890)), "1234567890");
    }
}
