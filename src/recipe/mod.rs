mod cache;
mod parser;
mod present;

pub use cache::{CachedRecipe, RecipeCache, CACHE_VERSION};
pub use parser::{determine_difficulty, parse_recipe, parse_suggestions, DEFAULT_SPICE_LEVEL};
pub use present::{answer_embed, details_embed, suggestions_embed, summary_embed, Embed, EmbedField};

use serde::{Deserialize, Serialize};

/// A recipe parsed from a completion or loaded from the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub dish_name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_spice_level")]
    pub spice_level: u8,
}

fn default_spice_level() -> u8 {
    DEFAULT_SPICE_LEVEL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}
