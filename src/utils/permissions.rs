use serenity::all::{ChannelId, Context, GuildId, Permissions, UserId};

/// Check if a member may manage a channel's banned phrases.
/// Channel permission overwrites apply, so this is decided per channel.
pub async fn can_manage_phrases(
    ctx: &Context,
    guild_id: GuildId,
    channel_id: ChannelId,
    user_id: UserId,
) -> bool {
    let Ok(member) = guild_id.member(ctx, user_id).await else {
        return false;
    };
    let Some(channel) = channel_id.to_channel(ctx).await.ok().and_then(|c| c.guild()) else {
        return false;
    };

    ctx.cache
        .guild(guild_id)
        .map(|guild| grants_phrase_management(guild.user_permissions_in(&channel, &member)))
        .unwrap_or(false)
}

/// Administrators and members who can manage the channel or its messages
pub fn grants_phrase_management(permissions: Permissions) -> bool {
    permissions.administrator() || permissions.manage_channels() || permissions.manage_messages()
}
