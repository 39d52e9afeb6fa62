use poise::serenity_prelude::Mentionable;
use tracing::info;

use crate::BotData;

type Context<'a> = poise::Context<'a, BotData, Box<dyn std::error::Error + Send + Sync>>;
type Error = Box<dyn std::error::Error + Send + Sync>;

/// Sends a custom message with your text.
#[poise::command(prefix_command, rename = "sendcustom")]
pub(crate) async fn send_custom(
    ctx: Context<'_>,
    #[description = "Text to send"]
    #[rest]
    custom_text: String,
) -> Result<(), Error> {
    ctx.say(format_custom_message(&custom_text)).await?;
    info!("Command !sendcustom run by {}", ctx.author().name);
    Ok(())
}

/// Say hello to the bot!
#[poise::command(prefix_command)]
pub(crate) async fn hello(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(format!("Hello {}! How are you? 😉", ctx.author().mention()))
        .await?;
    info!("Command !hello run by {}", ctx.author().name);
    Ok(())
}

/// Show available commands
#[poise::command(prefix_command)]
pub(crate) async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help for"]
    #[rest]
    command: Option<String>,
) -> Result<(), Error> {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            extra_text_at_bottom: "Commands start with `!`.",
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}

fn format_custom_message(custom_text: &str) -> String {
    format!("\n**📣 A message for you:**\n>>> {custom_text}\n\n**✨ Have a great day!**\n")
}
