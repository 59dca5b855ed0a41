use super::{defer, followup, Context};
use crate::error::SousChefError;
use crate::menu::{Menu, PendingMenu};
use crate::recipe::{answer_embed, suggestions_embed};
use tracing::debug;

/// Sous Chef: type an ingredient or list of ingredients
#[poise::command(slash_command, guild_only)]
pub async fn contains(
    ctx: Context<'_>,
    #[description = "Ingredient or list of ingredients"]
    #[max_length = 200]
    ingredient: String,
    #[description = "Ingredients to exclude"]
    #[max_length = 200]
    allergies: Option<String>,
) -> Result<(), SousChefError> {
    defer(ctx).await?;
    let data = ctx.data();

    let suggestions = data
        .chef
        .suggest_dishes(&ingredient, allergies.as_deref())
        .await?;
    let embed = suggestions_embed(
        &suggestions.ingredient,
        suggestions.exclusions.as_deref(),
        &suggestions.raw,
    );

    let message = followup::send_embed(ctx, &embed).await?;
    let events = followup::collect_reactions(ctx.serenity_context(), message.id);
    let menu = Menu::suggestions();
    followup::attach_menu(ctx.serenity_context(), &message, &menu).await?;

    let pending = PendingMenu::new(
        message.id.get(),
        menu,
        ctx.author().id.get(),
        data.reaction_timeout,
    );
    followup::spawn_suggestion_menu(
        ctx.serenity_context().clone(),
        data.clone(),
        message.channel_id,
        pending,
        events,
        suggestions.names,
    );
    Ok(())
}

/// Sous Chef: use AI to find recipes that contain certain ingredients
#[poise::command(slash_command, guild_only)]
pub async fn get_recipe(
    ctx: Context<'_>,
    #[description = "Name of the dish"]
    #[max_length = 100]
    dish_name: String,
    #[description = "Number of servings (default 1)"]
    #[min = 1]
    #[max = 50]
    serving_count: Option<u32>,
) -> Result<(), SousChefError> {
    defer(ctx).await?;
    let data = ctx.data();

    let (record, source) = data
        .chef
        .get_recipe(&dish_name, serving_count.unwrap_or(1))
        .await?;
    debug!(dish = %record.dish_name, ?source, "Posting recipe");

    let message = followup::send_recipe(ctx, &record).await?;
    let events = followup::collect_reactions(ctx.serenity_context(), message.id);
    let menu = Menu::recipe_options();
    followup::attach_menu(ctx.serenity_context(), &message, &menu).await?;

    let pending = PendingMenu::new(
        message.id.get(),
        menu,
        ctx.author().id.get(),
        data.reaction_timeout,
    );
    followup::spawn_recipe_menu(
        ctx.serenity_context().clone(),
        data.clone(),
        message.channel_id,
        pending,
        events,
        record.dish_name,
    );
    Ok(())
}

/// Sous Chef: use AI to find solutions to your culinary problems
#[poise::command(slash_command, guild_only)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Your culinary question"]
    #[max_length = 250]
    query: String,
) -> Result<(), SousChefError> {
    defer(ctx).await?;

    let answer = ctx.data().chef.answer_question(&query).await?;
    followup::send_embed(ctx, &answer_embed(&query, &answer)).await?;
    Ok(())
}
