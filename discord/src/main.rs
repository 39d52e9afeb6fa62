use std::sync::Arc;

use eyre::WrapErr;
use poise::serenity_prelude as serenity;
use poise::{CreateReply, FrameworkOptions, PrefixFrameworkOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;
use welcome_card::WelcomeConfig;

mod client;
mod commands;
mod config;
mod events;
mod keepalive;

use client::AvatarClient;
use config::BotConfig;

const COMMAND_PREFIX: &str = "!";

#[derive(Debug)]
pub struct BotData {
    pub config: Arc<WelcomeConfig>,
    pub avatar_client: AvatarClient,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bot_config = BotConfig::from_env()?;
    let welcome_config = WelcomeConfig::load(&bot_config.welcome_config_path)
        .wrap_err("Failed to load welcome config")?;
    info!(
        "Loaded welcome config from {} (channel '{}')",
        bot_config.welcome_config_path, welcome_config.welcome_channel_name
    );

    let bot_data = BotData {
        config: Arc::new(welcome_config),
        avatar_client: AvatarClient::new()?,
    };

    keepalive::spawn(bot_config.keep_alive_port);

    let framework = poise::Framework::builder()
        .options(FrameworkOptions {
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(COMMAND_PREFIX.to_string()),
                ..Default::default()
            },
            commands: vec![commands::send_custom(), commands::hello(), commands::help()],
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::event_handler(ctx, event, framework, data))
            },
            on_error: |error: poise::FrameworkError<'_, BotData, Box<dyn std::error::Error + Send + Sync>>| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            tracing::error!(
                                "Command '{}' failed: {:?}",
                                ctx.command().qualified_name,
                                error
                            );
                            let _ = ctx
                                .send(CreateReply::default().content("Error executing command"))
                                .await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            tracing::error!("Argument parse error: {:?}", error);
                            let _ = ctx
                                .send(CreateReply::default().content(format!(
                                    "Invalid arguments, try `{}help {}`",
                                    COMMAND_PREFIX,
                                    ctx.command().name
                                )))
                                .await;
                        }
                        _ => {
                            tracing::error!("Framework error: {:?}", error);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| Box::pin(async move { Ok(bot_data) }))
        .build();

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::Client::builder(&bot_config.token, intents)
        .framework(framework)
        .await
        .wrap_err("create Discord client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down...");
            shard_manager.shutdown_all().await;
        }
    });

    info!("Starting Discord bot...");
    client.start().await.wrap_err("client error")?;

    Ok(())
}
