use std::sync::Arc;

use poise::serenity_prelude as serenity;
use serenity::builder::{CreateAttachment, CreateMessage};
use serenity::{ActivityData, ChannelId, ChannelType, Mentionable};
use tracing::{error, info, warn};
use welcome_card::create_welcome_image;

use crate::BotData;

type Error = Box<dyn std::error::Error + Send + Sync>;

const PRESENCE_TEXT: &str = "Welcoming new members";
const WELCOME_IMAGE_NAME: &str = "welcome.png";

pub(crate) async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Bot {} is online", data_about_bot.user.name);
            ctx.set_activity(Some(ActivityData::playing(PRESENCE_TEXT)));
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            welcome_member(ctx, data, new_member).await;
        }
        _ => {}
    }
    Ok(())
}

async fn welcome_member(ctx: &serenity::Context, data: &BotData, member: &serenity::Member) {
    let channel_name = &data.config.welcome_channel_name;
    let channel_id = match find_text_channel(ctx, member.guild_id, channel_name).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            warn!("Channel '{}' not found in guild {}", channel_name, member.guild_id);
            return;
        }
        Err(e) => {
            error!("Failed to list channels of guild {}: {:?}", member.guild_id, e);
            return;
        }
    };

    let guild_name = member
        .guild_id
        .name(&ctx.cache)
        .unwrap_or_else(|| member.guild_id.to_string());
    info!("{} joined {}", member.user.name, guild_name);

    let avatar = data.avatar_client.fetch(&member.user.face()).await;
    let config = Arc::clone(&data.config);
    let display_name = member.user.name.clone();
    let image = tokio::task::spawn_blocking(move || {
        create_welcome_image(&display_name, avatar.as_deref(), &config)
    })
    .await
    .unwrap_or_else(|e| {
        error!("Welcome image task failed: {}", e);
        None
    });

    let message = match image {
        Some(png) => CreateMessage::new()
            .content(greeting_with_image(&member.mention(), &guild_name))
            .add_file(CreateAttachment::bytes(png, WELCOME_IMAGE_NAME)),
        None => CreateMessage::new().content(greeting_text_only(&member.mention())),
    };

    if let Err(e) = channel_id.send_message(&ctx.http, message).await {
        error!("Failed to send welcome message to '{}': {}", channel_name, e);
    }
}

async fn find_text_channel(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    name: &str,
) -> Result<Option<ChannelId>, serenity::Error> {
    let channels = guild_id.channels(&ctx.http).await?;
    Ok(channels
        .values()
        .find(|c| c.kind == ChannelType::Text && c.name == name)
        .map(|c| c.id))
}

fn greeting_with_image(mention: &impl std::fmt::Display, guild_name: &str) -> String {
    format!("Hello {mention}! Welcome to **{guild_name}**!")
}

fn greeting_text_only(mention: &impl std::fmt::Display) -> String {
    format!("Hello {mention}! Welcome to the server!")
}
