//! Platform-neutral display documents for recipes and answers.

use super::{determine_difficulty, RecipeRecord};

/// Discord limits
const MAX_TITLE_LEN: usize = 256;
const MAX_DESCRIPTION_LEN: usize = 4096;
const MAX_FIELD_LEN: usize = 1024;

/// Discord "blurple"
pub const ANSWER_COLOR: u32 = 0x5865F2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub color: Option<u32>,
}

impl Embed {
    fn new(title: &str) -> Self {
        Embed {
            title: truncate(title, MAX_TITLE_LEN),
            ..Default::default()
        }
    }

    fn description(mut self, text: &str) -> Self {
        self.description = Some(truncate(text, MAX_DESCRIPTION_LEN));
        self
    }

    fn field(mut self, name: &str, value: &str, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: truncate(name, MAX_TITLE_LEN),
            value: truncate(value, MAX_FIELD_LEN),
            inline,
        });
        self
    }

    fn footer(mut self, text: &str) -> Self {
        self.footer = Some(text.to_string());
        self
    }
}

/// Title, difficulty, description and spice level
pub fn summary_embed(record: &RecipeRecord) -> Embed {
    let mut embed = Embed::new(&record.dish_name).description(&format!(
        "Difficulty: **{}**",
        determine_difficulty(record)
    ));
    if !record.description.is_empty() {
        embed = embed.field("Description", &record.description, false);
    }
    embed.field("Spice level", &format!("{}/10", record.spice_level), true)
}

/// Ingredients and numbered instructions
pub fn details_embed(record: &RecipeRecord) -> Embed {
    let ingredients = record
        .ingredients
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n");
    let instructions = record
        .instructions
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    Embed::new(&format!("{}: ingredients & instructions", record.dish_name))
        .field("Ingredients", or_placeholder(&ingredients), false)
        .field("Instructions", or_placeholder(&instructions), false)
        .footer("React with 💾 to save, ⭐ to favorite or ♥️ to like this recipe")
}

/// The five-dish suggestion list for an ingredient
pub fn suggestions_embed(ingredient: &str, exclusions: Option<&str>, raw: &str) -> Embed {
    let title = format!("Recipes that contain {}.", ingredient);
    let mut embed = Embed::new(&title);
    if let Some(excluded) = exclusions {
        embed = embed.description(&format!("Excluding: {}", excluded));
    }
    let rule = "=".repeat(embed.title.chars().count());
    embed
        .field(&rule, or_placeholder(raw.trim()), false)
        .footer("Click the numbers below to view recipe details")
}

/// A free-form answer titled with the question
pub fn answer_embed(query: &str, answer: &str) -> Embed {
    let mut embed = Embed::new(&capitalize(query)).description(answer);
    embed.color = Some(ANSWER_COLOR);
    embed
}

fn or_placeholder(text: &str) -> &str {
    if text.is_empty() {
        "_Nothing here_"
    } else {
        text
    }
}

/// First letter upper case, the rest lower case
fn capitalize(text: &str) -> String {
    let mut chars = text.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RecipeRecord {
        RecipeRecord {
            dish_name: "Shakshuka".to_string(),
            ingredients: vec!["4 eggs".to_string(), "1 can tomatoes".to_string()],
            instructions: vec!["Simmer tomatoes".to_string(), "Poach eggs".to_string()],
            description: "Eggs poached in spiced tomato sauce.".to_string(),
            spice_level: 6,
        }
    }

    #[test]
    fn test_summary_embed() {
        let embed = summary_embed(&record());
        assert_eq!(embed.title, "Shakshuka");
        assert_eq!(embed.description.as_deref(), Some("Difficulty: **Easy**"));
        assert_eq!(embed.fields[0].value, "Eggs poached in spiced tomato sauce.");
        assert_eq!(embed.fields[1].value, "6/10");
    }

    #[test]
    fn test_details_embed() {
        let embed = details_embed(&record());
        assert_eq!(embed.fields[0].value, "- 4 eggs\n- 1 can tomatoes");
        assert_eq!(embed.fields[1].value, "1. Simmer tomatoes\n2. Poach eggs");
        assert!(embed.footer.unwrap().contains("💾"));
    }

    #[test]
    fn test_empty_record_uses_placeholders() {
        let mut empty = record();
        empty.ingredients.clear();
        empty.instructions.clear();
        empty.description.clear();

        let summary = summary_embed(&empty);
        assert_eq!(summary.fields.len(), 1);

        let details = details_embed(&empty);
        assert!(details.fields.iter().all(|f| f.value == "_Nothing here_"));
    }

    #[test]
    fn test_long_fields_are_truncated() {
        let mut long = record();
        long.ingredients = vec!["x".repeat(100); 20];
        let embed = details_embed(&long);
        assert_eq!(embed.fields[0].value.chars().count(), MAX_FIELD_LEN);
        assert!(embed.fields[0].value.ends_with('…'));
    }

    #[test]
    fn test_suggestions_embed() {
        let embed = suggestions_embed("eggs", Some("dairy"), "1. Shakshuka\n2. Frittata");
        assert_eq!(embed.title, "Recipes that contain eggs.");
        assert_eq!(embed.description.as_deref(), Some("Excluding: dairy"));
        assert_eq!(embed.fields[0].name, "=".repeat(26));
        assert_eq!(
            embed.footer.as_deref(),
            Some("Click the numbers below to view recipe details")
        );

        let plain = suggestions_embed("eggs", None, "1. Shakshuka");
        assert!(plain.description.is_none());
    }

    #[test]
    fn test_answer_embed() {
        let embed = answer_embed("how do I CARAMELIZE onions?", "Slowly.");
        assert_eq!(embed.title, "How do i caramelize onions?");
        assert_eq!(embed.color, Some(ANSWER_COLOR));
    }
}
