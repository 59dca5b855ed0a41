use crate::openai::{ChatMessage, CompletionRequest};

const SUGGESTION_MAX_TOKENS: u32 = 150;
const RECIPE_MAX_TOKENS: u32 = 1000;
const ANSWER_MAX_TOKENS: u32 = 500;

/// Build the prompt asking for five dishes that use an ingredient
pub fn build_suggestion_prompt(ingredient: &str, exclusions: Option<&str>) -> CompletionRequest {
    let mut user_message = format!(
        "Create a list of 5 recipe names that contain {}, list only the names",
        ingredient
    );
    if let Some(excluded) = exclusions {
        user_message.push_str(&format!(" exclude recipes that contain {}", excluded));
    }

    CompletionRequest {
        messages: vec![
            ChatMessage::system("You are a helpful sous chef."),
            ChatMessage::user(user_message),
        ],
        max_tokens: SUGGESTION_MAX_TOKENS,
        temperature: None,
    }
}

/// Build the sectioned recipe prompt the parser expects a reply to
pub fn build_recipe_prompt(dish_name: &str, servings: u32) -> CompletionRequest {
    let system = format!(
        r#"You are a helpful sous chef preparing a concise recipe.
===
Part 1: List the Ingredients for {servings} servings
- ingredient 1
- ingredient 2
===
Part 2: Write concise Instructions
1.
2.
3.
===
Part 3: short Description of dish
===
Part 4: carefully consider a spice factor integer between one and ten"#,
        servings = servings
    );

    CompletionRequest {
        messages: vec![
            ChatMessage::system(system),
            ChatMessage::user(format!("Generate a step by step recipe for {}", dish_name)),
        ],
        max_tokens: RECIPE_MAX_TOKENS,
        temperature: None,
    }
}

/// Build the prompt for a free-form culinary question
pub fn build_question_prompt(query: &str) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(
                "You are a helpful sous chef. Please help me with my culinary problem. \
                 Do not respond to non culinary questions.",
            ),
            ChatMessage::user(format!("{}\nDo not respond to non culinary questions.", query)),
        ],
        max_tokens: ANSWER_MAX_TOKENS,
        temperature: Some(0.0),
    }
}
