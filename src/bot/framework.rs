use std::collections::HashMap;
use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, ChannelId, GatewayIntents, GuildId};
use sqlx::PgPool;
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::db::queries::channel_banned_phrase;
use crate::handlers::event_handler::event_handler;
use crate::handlers::message::scope_for;
use crate::services::filter::loader::load_phrase_file;
use crate::services::filter::{Normalizer, PhraseFilter, Severity};

pub async fn run(settings: Settings, pool: PgPool) -> Result<(), Error> {
    let filter = build_filter(&settings).await?;
    let data = Arc::new(Data::new(pool, settings.clone(), filter));

    restore_channel_phrases(&data).await?;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::banned::banned()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: None, // Disable prefix commands - only use slash commands
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("Error: {}", error)).await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
                        }
                        poise::FrameworkError::UnknownCommand { .. } => {
                            // Bot only uses slash commands
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                let commands = &framework.options().commands;
                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);
                        poise::builtins::register_in_guild(ctx, commands, guild_id)
                            .await
                            .map_err(Error::Serenity)?;
                        info!("Registered {} commands in guild {}", commands.len(), guild_id);
                    }
                    None => {
                        poise::builtins::register_globally(ctx, commands)
                            .await
                            .map_err(Error::Serenity)?;
                        info!(
                            "Registered {} commands globally (can take up to 1 hour to appear)",
                            commands.len()
                        );
                    }
                }

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}

/// Build the filter from the hard and soft dictionaries plus BANNED_WORDS
async fn build_filter(settings: &Settings) -> Result<PhraseFilter, Error> {
    let normalizer = Normalizer::default().with_dropped_chars(&settings.extra_dropped_chars)?;
    let mut filter = PhraseFilter::new(normalizer, settings.boundary());

    let hard = load_phrase_file(&settings.hard_phrases_path).await?;
    let hard_count = filter.load_tier(Severity::Hard, &hard);

    let mut soft = load_phrase_file(&settings.soft_phrases_path).await?;
    soft.extend(settings.banned_words.iter().cloned());
    let soft_count = filter.load_tier(Severity::Soft, &soft);

    info!(
        "Phrase filter ready: {} hard, {} soft (word boundaries: {})",
        hard_count, soft_count, settings.word_boundaries
    );

    if hard_count == 0 && soft_count == 0 {
        warn!("Both global phrase lists are empty, only per-channel lists will apply");
    }

    Ok(filter)
}

/// Reload per-channel phrase lists saved by /banned
async fn restore_channel_phrases(data: &Arc<Data>) -> Result<(), Error> {
    let rows = channel_banned_phrase::get_all(&data.pool).await?;

    let mut by_channel: HashMap<i64, Vec<String>> = HashMap::new();
    for row in rows {
        by_channel.entry(row.channel_id).or_default().push(row.phrase);
    }

    let mut restored = 0;
    for (channel_id, phrases) in &by_channel {
        match data.filter.add(&scope_for(ChannelId::new(*channel_id as u64)), phrases) {
            Ok(added) => restored += added.len(),
            Err(e) => warn!("Skipping stored phrases for channel {}: {}", channel_id, e),
        }
    }

    info!(
        "Restored {} banned phrases across {} channels",
        restored,
        by_channel.len()
    );

    Ok(())
}
