mod prompt;

pub use prompt::*;

use crate::error::{Result, SousChefError};
use crate::openai::CompletionProvider;
use crate::recipe::{parse_recipe, parse_suggestions, RecipeCache, RecipeRecord};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a recipe came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSource {
    Cache,
    Generated,
}

/// Dish suggestions for an ingredient
#[derive(Debug, Clone)]
pub struct Suggestions {
    pub ingredient: String,
    pub exclusions: Option<String>,
    /// The completion as returned, shown to the user verbatim
    pub raw: String,
    pub names: Vec<String>,
}

/// Runs the three cooking commands against a completion provider and the
/// recipe cache.
#[derive(Debug)]
pub struct SousChef {
    provider: Arc<dyn CompletionProvider>,
    cache: RecipeCache,
}

impl SousChef {
    pub fn new(provider: Arc<dyn CompletionProvider>, cache: RecipeCache) -> Self {
        SousChef { provider, cache }
    }

    pub fn cache(&self) -> &RecipeCache {
        &self.cache
    }

    pub async fn suggest_dishes(&self, ingredient: &str, exclusions: Option<&str>) -> Result<Suggestions> {
        let ingredient = required(ingredient, "ingredient")?;
        let exclusions = exclusions.map(str::trim).filter(|e| !e.is_empty());

        let request = build_suggestion_prompt(ingredient, exclusions);
        let raw = self.provider.complete(&request).await?;
        let names = parse_suggestions(&raw);
        debug!(ingredient, count = names.len(), "Parsed dish suggestions");

        Ok(Suggestions {
            ingredient: ingredient.to_string(),
            exclusions: exclusions.map(str::to_string),
            raw,
            names,
        })
    }

    /// Return the cached recipe for `dish_name`, generating and caching it on
    /// a miss. The serving count only affects newly generated recipes.
    pub async fn get_recipe(&self, dish_name: &str, servings: u32) -> Result<(RecipeRecord, RecipeSource)> {
        let dish_name = required(dish_name, "dish name")?;

        if let Some(record) = self.cache.load_async(dish_name).await? {
            info!(dish = dish_name, "Serving recipe from cache");
            return Ok((record, RecipeSource::Cache));
        }

        let request = build_recipe_prompt(dish_name, servings.max(1));
        info!(
            dish = dish_name,
            servings,
            model = self.provider.model_name(),
            "Generating recipe"
        );
        let raw = self.provider.complete(&request).await?;
        let record = parse_recipe(dish_name, &raw);
        // The completion is already paid for, so a cache failure only costs a
        // regeneration next time
        if let Err(e) = self.cache.save_async(&record).await {
            warn!(dish = dish_name, error = %e, "Failed to cache recipe");
        }

        Ok((record, RecipeSource::Generated))
    }

    pub async fn answer_question(&self, query: &str) -> Result<String> {
        let query = required(query, "question")?;
        let request = build_question_prompt(query);
        self.provider.complete(&request).await
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(SousChefError::InvalidInput(format!("A {} is required", what)))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::fake::FakeProvider;
    use tempfile::tempdir;

    const RECIPE: &str = "===\nPart 1: Ingredients\n- 200g spaghetti\n- 2 eggs\n- pecorino\n\
                          ===\nPart 2: Instructions\n1. Boil pasta\n2. Mix eggs and cheese\n3. Combine off heat\n\
                          ===\nPart 3: Description\nRoman classic.\n===\nPart 4: Spice factor: 1";

    fn chef(provider: FakeProvider, dir: &std::path::Path) -> (SousChef, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        let chef = SousChef::new(provider.clone(), RecipeCache::new(dir));
        (chef, provider)
    }

    #[tokio::test]
    async fn test_get_recipe_generates_then_hits_cache() {
        let dir = tempdir().unwrap();
        let (chef, provider) = chef(FakeProvider::with_response("carbonara", RECIPE), dir.path());

        let (first, source) = chef.get_recipe("Carbonara", 2).await.unwrap();
        assert_eq!(source, RecipeSource::Generated);
        assert_eq!(first.ingredients.len(), 3);
        assert_eq!(first.instructions.len(), 3);
        assert_eq!(first.spice_level, 1);
        assert!(provider
            .last_request()
            .unwrap()
            .messages[0]
            .content
            .contains("for 2 servings"));

        let (second, source) = chef.get_recipe("Carbonara", 6).await.unwrap();
        assert_eq!(source, RecipeSource::Cache);
        assert_eq!(second, first);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_get_recipe_trims_name_and_rejects_blank() {
        let dir = tempdir().unwrap();
        let (chef, _) = chef(FakeProvider::with_response("carbonara", RECIPE), dir.path());

        let (record, _) = chef.get_recipe("  Carbonara ", 0).await.unwrap();
        assert_eq!(record.dish_name, "Carbonara");
        assert!(chef.cache().load("Carbonara").is_some());

        let err = chef.get_recipe("   ", 1).await.unwrap_err();
        assert!(matches!(err, SousChefError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_completion_failure_is_not_cached() {
        let dir = tempdir().unwrap();
        let (chef, provider) = chef(FakeProvider::new(), dir.path());

        assert!(chef.get_recipe("Borscht", 1).await.is_err());
        assert!(chef.cache().load("Borscht").is_none());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_recipe() {
        let dir = tempdir().unwrap();
        // A regular file where the cache directory should be
        let blocker = dir.path().join("recipes");
        std::fs::write(&blocker, "").unwrap();
        let (chef, provider) = chef(FakeProvider::with_response("carbonara", RECIPE), &blocker);

        let (record, source) = chef.get_recipe("Carbonara", 1).await.unwrap();
        assert_eq!(source, RecipeSource::Generated);
        assert_eq!(record.ingredients.len(), 3);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_suggest_dishes() {
        let dir = tempdir().unwrap();
        let raw = "1. Shakshuka\n2. Frittata\n3. Quiche\n4. Omelette\n5. Egg curry";
        let (chef, provider) = chef(FakeProvider::with_response("contain eggs", raw), dir.path());

        let suggestions = chef.suggest_dishes("eggs", Some("  ")).await.unwrap();
        assert_eq!(suggestions.names.len(), 5);
        assert_eq!(suggestions.names[4], "Egg curry");
        assert_eq!(suggestions.raw, raw);
        assert!(suggestions.exclusions.is_none());
        assert!(!provider.last_request().unwrap().messages[1].content.contains("exclude"));
    }

    #[tokio::test]
    async fn test_answer_question() {
        let dir = tempdir().unwrap();
        let (chef, provider) = chef(
            FakeProvider::with_response("rest steak", "Five to ten minutes."),
            dir.path(),
        );

        let answer = chef.answer_question("How long do I rest steak?").await.unwrap();
        assert_eq!(answer, "Five to ten minutes.");
        assert_eq!(provider.last_request().unwrap().temperature, Some(0.0));
    }
}
