//! The three bot commands, run once in the terminal.

use super::build_chef;
use crate::chef::RecipeSource;
use crate::config;
use crate::error::Result;
use crate::recipe::{answer_embed, details_embed, suggestions_embed, summary_embed};
use crate::ui::{self, Spinner};
use std::path::Path;

/// Suggest dishes containing an ingredient
pub async fn run_suggest(ingredient: String, exclude: Option<String>, custom: Option<&Path>) -> Result<()> {
    let config = config::load_config(custom)?;
    let chef = build_chef(&config)?;

    let spinner = Spinner::new(&format!("Looking for dishes with {}...", ingredient));
    let suggestions = match chef.suggest_dishes(&ingredient, exclude.as_deref()).await {
        Ok(suggestions) => {
            spinner.finish_and_clear();
            suggestions
        }
        Err(e) => {
            spinner.finish_with_error("Suggestion request failed");
            return Err(e);
        }
    };

    ui::print_embed(&suggestions_embed(
        &suggestions.ingredient,
        suggestions.exclusions.as_deref(),
        &suggestions.raw,
    ));
    if let Some(first) = suggestions.names.first() {
        ui::print_info(&format!("Try: souschef cook \"{}\"", first));
    }
    Ok(())
}

/// Print a recipe, generating it on a cache miss
pub async fn run_cook(dish: String, servings: u32, json_output: bool, custom: Option<&Path>) -> Result<()> {
    let config = config::load_config(custom)?;
    let chef = build_chef(&config)?;

    let spinner = Spinner::new(&format!("Preparing {}...", dish));
    let (record, source) = match chef.get_recipe(&dish, servings).await {
        Ok(found) => {
            spinner.finish_and_clear();
            found
        }
        Err(e) => {
            spinner.finish_with_error("Recipe request failed");
            return Err(e);
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    ui::print_embed(&summary_embed(&record));
    ui::print_embed(&details_embed(&record));
    if source == RecipeSource::Cache {
        ui::print_info("Served from the recipe cache");
    }
    Ok(())
}

/// Answer a culinary question
pub async fn run_ask(query: String, custom: Option<&Path>) -> Result<()> {
    let config = config::load_config(custom)?;
    let chef = build_chef(&config)?;

    let spinner = Spinner::new("Thinking...");
    let answer = match chef.answer_question(&query).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            answer
        }
        Err(e) => {
            spinner.finish_with_error("Question request failed");
            return Err(e);
        }
    };

    ui::print_embed(&answer_embed(&query, &answer));
    Ok(())
}
