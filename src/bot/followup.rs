//! Posting embeds, attaching reaction menus and acting on the selection.
//!
//! Menu waits run in spawned tasks so the command handler can return while
//! the requester makes up their mind. The reaction collector for a message
//! must exist before its icons are added: adding five icons takes several
//! rate-limited calls, and a click that lands before the collector is
//! registered is never delivered.

use super::{to_create_embed, Context, Data};
use crate::error::{Result, SousChefError};
use crate::menu::{Menu, MenuAction, MenuOutcome, PendingMenu, ReactionEvent};
use crate::recipe::{details_embed, summary_embed, Embed, RecipeRecord};
use crate::shelf::ShelfList;
use futures::stream::BoxStream;
use futures::StreamExt;
use serenity::all::{
    ChannelId, Context as SerenityContext, CreateMessage, Message, MessageId, Reaction,
    ReactionCollector, ReactionType, UserId,
};
use tracing::{debug, error, info};

/// Send an embed as a reply to the interaction
pub async fn send_embed(ctx: Context<'_>, embed: &Embed) -> Result<Message> {
    let handle = ctx
        .send(poise::CreateReply::default().embed(to_create_embed(embed)))
        .await?;
    Ok(handle.into_message().await?)
}

/// Reply with the summary and details embeds, returning the details message
pub async fn send_recipe(ctx: Context<'_>, record: &RecipeRecord) -> Result<Message> {
    send_embed(ctx, &summary_embed(record)).await?;
    send_embed(ctx, &details_embed(record)).await
}

/// Reactions on one message, as menu events
pub type ReactionEvents = BoxStream<'static, ReactionEvent>;

/// Start collecting reactions on `message_id`. Call before [`attach_menu`].
pub fn collect_reactions(ctx: &SerenityContext, message_id: MessageId) -> ReactionEvents {
    ReactionCollector::new(&ctx.shard)
        .message_id(message_id)
        .stream()
        .filter_map(|reaction| futures::future::ready(to_event(reaction)))
        .boxed()
}

pub async fn attach_menu(ctx: &SerenityContext, message: &Message, menu: &Menu) -> Result<()> {
    for icon in menu.icons() {
        message
            .react(ctx, ReactionType::Unicode(icon.to_string()))
            .await?;
    }
    Ok(())
}

/// Wait for the requester to pick one of five suggestions, then post that recipe
pub fn spawn_suggestion_menu(
    ctx: SerenityContext,
    data: Data,
    channel_id: ChannelId,
    pending: PendingMenu,
    events: ReactionEvents,
    names: Vec<String>,
) {
    tokio::spawn(async move {
        let outcome = pending.wait(events).await;
        let result = match outcome {
            MenuOutcome::Resolved(MenuAction::ShowSuggestion(index)) => {
                show_suggestion(&ctx, &data, channel_id, pending.requester_id, &names, index).await
            }
            MenuOutcome::Resolved(other) => {
                debug!(action = ?other, "Ignoring action on suggestion menu");
                Ok(())
            }
            MenuOutcome::Expired => {
                debug!(message_id = pending.message_id, "Suggestion menu expired");
                Ok(())
            }
        };
        if let Err(e) = result {
            report_failure(&ctx, channel_id, &e).await;
        }
    });
}

/// Wait for the requester to save, favorite or like a posted recipe
pub fn spawn_recipe_menu(
    ctx: SerenityContext,
    data: Data,
    channel_id: ChannelId,
    pending: PendingMenu,
    events: ReactionEvents,
    dish_name: String,
) {
    tokio::spawn(async move {
        let outcome = pending.wait(events).await;
        if let Err(e) =
            apply_recipe_action(&ctx, &data, channel_id, pending.requester_id, &dish_name, outcome).await
        {
            report_failure(&ctx, channel_id, &e).await;
        }
    });
}

fn to_event(reaction: Reaction) -> Option<ReactionEvent> {
    event_from_parts(reaction.message_id, reaction.user_id, reaction.emoji)
}

/// Only unicode reactions from a known user can select a menu action
fn event_from_parts(
    message_id: MessageId,
    user_id: Option<UserId>,
    emoji: ReactionType,
) -> Option<ReactionEvent> {
    match emoji {
        ReactionType::Unicode(emoji) => Some(ReactionEvent {
            message_id: message_id.get(),
            user_id: user_id?.get(),
            emoji,
        }),
        _ => None,
    }
}

async fn show_suggestion(
    ctx: &SerenityContext,
    data: &Data,
    channel_id: ChannelId,
    requester_id: u64,
    names: &[String],
    index: usize,
) -> Result<()> {
    let Some(dish_name) = names.get(index) else {
        channel_id
            .say(ctx, format!("There is no suggestion number {}.", index + 1))
            .await?;
        return Ok(());
    };

    info!(dish = %dish_name, "Showing selected suggestion");
    let (record, _) = data.chef.get_recipe(dish_name, 1).await?;

    channel_id
        .send_message(ctx, CreateMessage::new().embed(to_create_embed(&summary_embed(&record))))
        .await?;
    let message = channel_id
        .send_message(ctx, CreateMessage::new().embed(to_create_embed(&details_embed(&record))))
        .await?;

    let events = collect_reactions(ctx, message.id);
    let menu = Menu::recipe_options();
    attach_menu(ctx, &message, &menu).await?;
    let pending = PendingMenu::new(message.id.get(), menu, requester_id, data.reaction_timeout);

    let outcome = pending.wait(events).await;
    apply_recipe_action(ctx, data, channel_id, requester_id, &record.dish_name, outcome).await
}

async fn apply_recipe_action(
    ctx: &SerenityContext,
    data: &Data,
    channel_id: ChannelId,
    requester_id: u64,
    dish_name: &str,
    outcome: MenuOutcome,
) -> Result<()> {
    let action = match outcome {
        MenuOutcome::Resolved(action) => action,
        MenuOutcome::Expired => {
            debug!(dish = dish_name, "Recipe menu expired");
            return Ok(());
        }
    };
    let Some(list) = ShelfList::for_action(action) else {
        return Ok(());
    };

    let added = data.shelves.add_async(requester_id, list, dish_name).await?;
    let reply = if added {
        format!("<@{}> {} **{}**.", requester_id, list.verb(), dish_name)
    } else {
        format!("<@{}> already {} **{}**.", requester_id, list.verb(), dish_name)
    };
    channel_id.say(ctx, reply).await?;
    Ok(())
}

async fn report_failure(ctx: &SerenityContext, channel_id: ChannelId, error: &SousChefError) {
    error!(channel = %channel_id, error = %error, "Menu follow-up failed");
    if let Err(e) = channel_id
        .say(ctx, format!("Sorry, something went wrong: {}", error))
        .await
    {
        error!(error = %e, "Failed to report follow-up failure");
    }
}
