//! Discord front end: slash commands, embeds and reaction menus.

mod commands;
mod followup;

use crate::chef::SousChef;
use crate::error::{Result, SousChefError};
use crate::recipe::Embed;
use crate::shelf::ShelfStore;
use serenity::all::{ClientBuilder, CreateEmbed, CreateEmbedFooter, GatewayIntents};
use serenity::http::DiscordJsonError;
use serenity::http::HttpError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

pub type Context<'a> = poise::Context<'a, Data, SousChefError>;

/// Shared state handed to every command
#[derive(Debug, Clone)]
pub struct Data {
    pub chef: Arc<SousChef>,
    pub shelves: Arc<ShelfStore>,
    pub reaction_timeout: Duration,
}

/// Connect to Discord and serve commands until the gateway shuts down
pub async fn run(token: String, data: Data) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::contains(), commands::get_recipe(), commands::help()],
            pre_command: |ctx| {
                Box::pin(async move {
                    info!(
                        user = %ctx.author().name,
                        command = %ctx.command().qualified_name,
                        "Command invoked"
                    );
                })
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    user = %ready.user.name,
                    guilds = ready.guilds.len(),
                    "Sous Chef connected"
                );
                Ok(data)
            })
        })
        .build();

    let mut client = ClientBuilder::new(token, GatewayIntents::non_privileged())
        .framework(framework)
        .await?;
    client.start().await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, SousChefError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                command = %ctx.command().qualified_name,
                error = %error,
                "Command failed"
            );
            let reply = poise::CreateReply::default()
                .content(format!("Sorry, something went wrong: {}", error))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                warn!(error = %e, "Failed to report command error");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "Failed to handle framework error");
            }
        }
    }
}

/// Acknowledge the interaction, ignoring "already acknowledged" errors
pub(crate) async fn defer(ctx: Context<'_>) -> Result<()> {
    match ctx.defer().await {
        Ok(()) => Ok(()),
        Err(e) if is_already_acknowledged(&e) => {
            warn!("Interaction was already acknowledged");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn is_already_acknowledged(error: &serenity::Error) -> bool {
    match error {
        serenity::Error::Http(http_error) => is_already_acknowledged_http(http_error),
        _ => false,
    }
}

/// Interaction has already been acknowledged
const ALREADY_ACKNOWLEDGED: isize = 40060;

fn is_already_acknowledged_http(error: &HttpError) -> bool {
    matches!(error, HttpError::UnsuccessfulRequest(response) if is_already_acknowledged_json(&response.error))
}

fn is_already_acknowledged_json(error: &DiscordJsonError) -> bool {
    error.code == ALREADY_ACKNOWLEDGED
}

pub(crate) fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new().title(embed.title.as_str());
    if let Some(ref description) = embed.description {
        builder = builder.description(description.as_str());
    }
    for field in &embed.fields {
        builder = builder.field(field.name.as_str(), field.value.as_str(), field.inline);
    }
    if let Some(ref footer) = embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer.as_str()));
    }
    if let Some(color) = embed.color {
        builder = builder.colour(color);
    }
    builder
}
