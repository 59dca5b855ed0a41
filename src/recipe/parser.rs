//! Turns a free-form recipe completion into a [`RecipeRecord`].
//!
//! The completion is expected to list ingredients, instructions, a short
//! description and a spice factor, in that order. Sections are split on
//! `===` delimiter lines and on recognised headers (`Part 2: ...`,
//! `Ingredients:`, `**Instructions**`). Labelled sections go to their field;
//! the rest fill the remaining fields in order. Parsing never fails: anything
//! that cannot be recognised leaves its field empty.

use super::{Difficulty, RecipeRecord};

/// Spice level used when the completion does not carry a usable one
pub const DEFAULT_SPICE_LEVEL: u8 = 5;

const MAX_SUGGESTIONS: usize = 5;

/// Header labels longer than this are treated as ordinary text
const MAX_LABEL_WORDS: usize = 4;

/// Bare lines accepted as section titles without a colon or emphasis
const BARE_TITLES: &[&str] = &[
    "ingredients",
    "instructions",
    "directions",
    "method",
    "steps",
    "description",
    "spice",
    "spice level",
    "spice factor",
];

const NUMBER_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Ingredients,
    Instructions,
    Description,
    Spice,
}

const FIELD_ORDER: [Field; 4] = [
    Field::Ingredients,
    Field::Instructions,
    Field::Description,
    Field::Spice,
];

impl Field {
    fn index(self) -> usize {
        match self {
            Field::Ingredients => 0,
            Field::Instructions => 1,
            Field::Description => 2,
            Field::Spice => 3,
        }
    }
}

#[derive(Debug, Default)]
struct Section {
    field: Option<Field>,
    lines: Vec<String>,
}

#[derive(Debug, PartialEq)]
struct Header {
    field: Option<Field>,
    inline: Option<String>,
}

/// Parse a recipe completion for `dish_name`
pub fn parse_recipe(dish_name: &str, raw: &str) -> RecipeRecord {
    let mut slots: [Option<Vec<String>>; 4] = Default::default();
    let sections = split_sections(raw);

    // Labelled sections claim their field first
    let mut unlabelled = Vec::new();
    for section in sections {
        match section.field {
            Some(field) => slots[field.index()]
                .get_or_insert_with(Vec::new)
                .extend(section.lines),
            None => unlabelled.push(section.lines),
        }
    }

    let mut free = FIELD_ORDER
        .iter()
        .filter(|field| slots[field.index()].is_none())
        .copied()
        .collect::<Vec<_>>()
        .into_iter();
    for lines in unlabelled {
        match free.next() {
            Some(field) => slots[field.index()] = Some(lines),
            None => break,
        }
    }

    let [ingredients, instructions, description, spice] = slots.map(Option::unwrap_or_default);

    RecipeRecord {
        dish_name: dish_name.to_string(),
        ingredients: list_items(&ingredients),
        instructions: list_items(&instructions),
        description: description.join(" "),
        spice_level: parse_spice_level(&spice),
    }
}

/// Extract up to five dish names from a suggestion completion
pub fn parse_suggestions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .map(|line| {
            strip_list_marker(line)
                .trim_matches(|c: char| c == '"' || c == '*')
                .trim()
                .to_string()
        })
        .filter(|name| !name.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Rate how involved a recipe is from its ingredient and step counts
pub fn determine_difficulty(record: &RecipeRecord) -> Difficulty {
    let score = record.ingredients.len() + 2 * record.instructions.len();
    match score {
        0..=12 => Difficulty::Easy,
        13..=24 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

fn split_sections(raw: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::default();

    for line in raw.lines() {
        let trimmed = line.trim();

        if is_delimiter(trimmed) {
            push_section(&mut sections, std::mem::take(&mut current));
            continue;
        }

        if let Some(header) = parse_header(trimmed) {
            push_section(&mut sections, std::mem::take(&mut current));
            current.field = header.field;
            current.lines.extend(header.inline);
            continue;
        }

        if !trimmed.is_empty() {
            current.lines.push(trimmed.to_string());
        }
    }

    push_section(&mut sections, current);
    sections
}

fn push_section(sections: &mut Vec<Section>, section: Section) {
    if section.field.is_some() || !section.lines.is_empty() {
        sections.push(section);
    }
}

fn is_delimiter(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '=')
}

fn parse_header(line: &str) -> Option<Header> {
    if line.is_empty() || starts_with_list_marker(line) {
        return None;
    }

    let emphasized = line.starts_with('#') || line.starts_with("**") || line.starts_with("__");
    let text = strip_emphasis(line);

    if let Some(rest) = strip_part_prefix(text) {
        return Some(part_header(rest));
    }

    if let Some((label, value)) = text.split_once(':') {
        return labelled(label, value);
    }

    let lower = text.to_lowercase();
    if (emphasized && word_count(text) <= MAX_LABEL_WORDS) || BARE_TITLES.contains(&lower.as_str()) {
        return classify(text).map(|field| Header {
            field: Some(field),
            inline: None,
        });
    }

    None
}

/// `Label: value` where the label names a section
fn labelled(label: &str, value: &str) -> Option<Header> {
    let label = strip_emphasis(label);
    if word_count(label) > MAX_LABEL_WORDS {
        return None;
    }
    let field = classify(label)?;
    Some(Header {
        field: Some(field),
        inline: non_empty(strip_emphasis(value)),
    })
}

/// The text following `Part N:`, which is either a title or content
fn part_header(rest: &str) -> Header {
    if rest.is_empty() {
        return Header {
            field: None,
            inline: None,
        };
    }

    if let Some((label, value)) = rest.split_once(':') {
        if let Some(header) = labelled(label, value) {
            return header;
        }
    }

    match classify(rest) {
        Some(field) => Header {
            field: Some(field),
            inline: None,
        },
        None => Header {
            field: None,
            inline: Some(rest.to_string()),
        },
    }
}

fn classify(label: &str) -> Option<Field> {
    let label = label.to_lowercase();
    if label.contains("ingredient") {
        Some(Field::Ingredients)
    } else if ["instruction", "direction", "method", "preparation", "steps"]
        .iter()
        .any(|k| label.contains(k))
    {
        Some(Field::Instructions)
    } else if label.contains("descri") {
        Some(Field::Description)
    } else if label.contains("spic") {
        Some(Field::Spice)
    } else {
        None
    }
}

fn strip_part_prefix(text: &str) -> Option<&str> {
    if !text.get(..4)?.eq_ignore_ascii_case("part") {
        return None;
    }
    let rest = text[4..].trim_start();
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    Some(
        rest[digits..]
            .trim_start_matches(|c: char| matches!(c, ':' | '-' | '.' | ')') || c.is_whitespace())
            .trim_end(),
    )
}

fn strip_emphasis(text: &str) -> &str {
    text.trim()
        .trim_start_matches('#')
        .trim()
        .trim_matches(|c: char| c == '*' || c == '_')
        .trim()
}

fn starts_with_list_marker(line: &str) -> bool {
    let mut chars = line.chars();
    match chars.next() {
        Some('-') | Some('•') | Some('+') => true,
        Some('*') => chars.next().map_or(false, char::is_whitespace),
        Some(c) if c.is_ascii_digit() => true,
        _ => false,
    }
}

/// Remove bullets, `1.`/`1)` numbering and `Step 1:` prefixes
fn strip_list_marker(line: &str) -> &str {
    let mut s = line.trim();

    if s.starts_with(|c: char| matches!(c, '-' | '•' | '+')) || (s.starts_with('*') && !s.starts_with("**")) {
        s = s[s.chars().next().map_or(0, char::len_utf8)..].trim_start();
    }

    if s.get(..4).map_or(false, |p| p.eq_ignore_ascii_case("step")) {
        let rest = s[4..].trim_start();
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            s = rest[digits..]
                .trim_start_matches(|c: char| matches!(c, ':' | '.' | ')' | '-'))
                .trim_start();
        }
    }

    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &s[digits..];
        let mut chars = rest.chars();
        if matches!(chars.next(), Some('.') | Some(')')) {
            // "1.5 cups" is a quantity, not numbering
            if chars.next().map_or(true, char::is_whitespace) {
                s = rest[1..].trim_start();
            }
        }
    }

    s
}

fn list_items(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| strip_list_marker(line).trim_matches('*').trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Words that introduce the rating itself ("spice factor of 3", "rated 6")
const SPICE_CUES: &[&str] = &["factor", "level", "rated", "rating", "rate", "is", "score"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum SpiceToken {
    Number(u32),
    Word(String),
    Dash,
    Slash,
}

impl SpiceToken {
    fn number(&self) -> Option<u32> {
        match self {
            SpiceToken::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn is_word(&self, expected: &str) -> bool {
        matches!(self, SpiceToken::Word(w) if w == expected)
    }
}

fn spice_tokens(line: &str) -> Vec<SpiceToken> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let flush = |word: &mut String, tokens: &mut Vec<SpiceToken>| {
        if word.is_empty() {
            return;
        }
        let lower = word.to_lowercase();
        let token = if lower.chars().all(|c| c.is_ascii_digit()) {
            lower.parse().map(SpiceToken::Number).unwrap_or(SpiceToken::Word(lower))
        } else {
            match NUMBER_WORDS.iter().find(|(w, _)| *w == lower) {
                Some((_, n)) => SpiceToken::Number(*n),
                None => SpiceToken::Word(lower),
            }
        };
        tokens.push(token);
        word.clear();
    };

    for c in line.chars() {
        if c.is_alphanumeric() {
            word.push(c);
            continue;
        }
        flush(&mut word, &mut tokens);
        match c {
            '-' | '–' | '—' => tokens.push(SpiceToken::Dash),
            '/' => tokens.push(SpiceToken::Slash),
            _ => {}
        }
    }
    flush(&mut word, &mut tokens);
    tokens
}

/// Numbers that describe the scale rather than the rating: both ends of
/// "1 to 10", "1-10" and "between one and ten", and the 10 in "7/10" or
/// "out of 10".
fn scale_positions(tokens: &[SpiceToken]) -> Vec<bool> {
    let mut scale = vec![false; tokens.len()];
    for i in 0..tokens.len() {
        if tokens[i].number().is_none() {
            continue;
        }
        let next = tokens.get(i + 1);
        let after = tokens.get(i + 2).and_then(SpiceToken::number);

        let range_word = next.is_some_and(|t| *t == SpiceToken::Dash || t.is_word("to"));
        let between = i > 0 && tokens[i - 1].is_word("between") && next.is_some_and(|t| t.is_word("and"));
        if (range_word || between) && after.is_some() {
            scale[i] = true;
            scale[i + 2] = true;
        }

        if next == Some(&SpiceToken::Slash) && after.is_some() {
            scale[i + 2] = true;
        }
        if i >= 2 && tokens[i - 2].is_word("out") && tokens[i - 1].is_word("of") {
            scale[i] = true;
        }
    }
    scale
}

/// The first in-range number shortly after a cue word, else the last
/// in-range number that is not part of the scale
fn parse_spice_level(lines: &[String]) -> u8 {
    let mut cued = None;
    let mut last = None;

    for line in lines {
        let tokens = spice_tokens(line);
        let scale = scale_positions(&tokens);
        for (i, token) in tokens.iter().enumerate() {
            let Some(n @ 1..=10) = token.number() else {
                continue;
            };
            if scale[i] {
                continue;
            }
            last = Some(n);
            let window = &tokens[i.saturating_sub(3)..i];
            if cued.is_none() && window.iter().any(|t| SPICE_CUES.iter().any(|cue| t.is_word(cue))) {
                cued = Some(n);
            }
        }
    }

    match cued.or(last) {
        Some(n) => n as u8,
        None => DEFAULT_SPICE_LEVEL,
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimited_sections() {
        let record = parse_recipe("Pancakes", "- egg\n- flour\n===\n1. mix\n===\nTasty\n===\n7");
        assert_eq!(record.dish_name, "Pancakes");
        assert_eq!(record.ingredients, vec!["egg", "flour"]);
        assert_eq!(record.instructions, vec!["mix"]);
        assert_eq!(record.description, "Tasty");
        assert_eq!(record.spice_level, 7);
    }

    #[test]
    fn test_parse_prompt_shaped_completion() {
        let raw = "===\nPart 1: Ingredients for 2 servings\n- 2 eggs\n- 1.5 cups flour\n* 1 cup milk\n\
                   ===\nPart 2: Instructions\n1. Whisk the eggs.\n2) Fold in the flour.\nStep 3: Fry.\n\
                   ===\nPart 3: Description\nFluffy breakfast pancakes.\nGreat with syrup.\n\
                   Part 4: Spice factor: 2/10\n";
        let record = parse_recipe("Pancakes", raw);
        assert_eq!(record.ingredients, vec!["2 eggs", "1.5 cups flour", "1 cup milk"]);
        assert_eq!(
            record.instructions,
            vec!["Whisk the eggs.", "Fold in the flour.", "Fry."]
        );
        assert_eq!(record.description, "Fluffy breakfast pancakes. Great with syrup.");
        assert_eq!(record.spice_level, 2);
    }

    #[test]
    fn test_parse_markdown_headers_out_of_order() {
        let raw = "## Instructions\n1. Boil water\n2. Add pasta\n\n**Ingredients:**\n- pasta\n- salt\n\n\
                   Description: Simple and quick.\nSpice level: three";
        let record = parse_recipe("Pasta", raw);
        assert_eq!(record.ingredients, vec!["pasta", "salt"]);
        assert_eq!(record.instructions, vec!["Boil water", "Add pasta"]);
        assert_eq!(record.description, "Simple and quick.");
        assert_eq!(record.spice_level, 3);
    }

    #[test]
    fn test_missing_spice_section_uses_default() {
        let record = parse_recipe("Toast", "- bread\n===\n1. toast it\n===\nCrunchy");
        assert_eq!(record.spice_level, DEFAULT_SPICE_LEVEL);
        assert_eq!(record.description, "Crunchy");
    }

    #[test]
    fn test_out_of_range_spice_uses_default() {
        let record = parse_recipe("Vindaloo", "- chili\n===\n1. cook\n===\nHot\n===\n42");
        assert_eq!(record.spice_level, DEFAULT_SPICE_LEVEL);

        let record = parse_recipe("Vindaloo", "- chili\n===\n1. cook\n===\nHot\n===\nvery hot");
        assert_eq!(record.spice_level, DEFAULT_SPICE_LEVEL);
    }

    #[test]
    fn test_spice_scale_bounds_are_not_the_rating() {
        let spice = |text: &str| parse_spice_level(&[text.to_string()]);

        assert_eq!(
            spice("On a scale of one to ten, this dish has a spice factor of 3."),
            3
        );
        assert_eq!(spice("On a scale of 1 to 10: 4"), 4);
        assert_eq!(spice("Spice level (1-10): 6"), 6);
        assert_eq!(spice("A spice factor integer between one and ten: 2"), 2);
        assert_eq!(spice("I'd rate it a 7 out of 10"), 7);
        assert_eq!(spice("8/10, bring water"), 8);
        assert_eq!(spice("Rated 9 for heat, serves 2"), 9);
        assert_eq!(spice("Scale 1-10"), DEFAULT_SPICE_LEVEL);
    }

    #[test]
    fn test_spice_scale_phrasing_in_full_recipe() {
        let raw = "- chili\n===\n1. cook\n===\nHot\n===\nPart 4: Spice Factor\n\
                   On a scale of one to ten, this dish has a spice factor of 3.";
        assert_eq!(parse_recipe("Chili", raw).spice_level, 3);
    }

    #[test]
    fn test_unstructured_text_degrades() {
        let record = parse_recipe("Mystery", "");
        assert!(record.ingredients.is_empty());
        assert!(record.instructions.is_empty());
        assert!(record.description.is_empty());
        assert_eq!(record.spice_level, DEFAULT_SPICE_LEVEL);

        let record = parse_recipe("Mystery", "I'm not sure what that dish is.");
        assert_eq!(record.ingredients, vec!["I'm not sure what that dish is."]);
        assert!(record.instructions.is_empty());
    }

    #[test]
    fn test_well_formed_sections_fill_every_field() {
        let raws = [
            "- rice\n===\n1. steam\n===\nPlain\n===\n1",
            "Ingredients:\n- a\n- b\nInstructions:\n- c\nDescription: d\nSpice factor: 10",
            "===\nPart 1: List the Ingredients\n- x\n===\nPart 2: Write concise Instructions\n1. y\n===\nPart 3: short Description of dish\nz\nPart 4: carefully consider a spice factor\n6",
        ];
        for raw in raws {
            let record = parse_recipe("Dish", raw);
            assert!(!record.ingredients.is_empty(), "{raw}");
            assert!(!record.instructions.is_empty(), "{raw}");
            assert!((1..=10).contains(&record.spice_level), "{raw}");
        }
    }

    #[test]
    fn test_ingredient_with_spice_word_is_not_a_header() {
        let record = parse_recipe("Curry", "- Spice mix: 1 tsp\n- onion\n===\n1. fry\n===\nWarm\n===\n8");
        assert_eq!(record.ingredients, vec!["Spice mix: 1 tsp", "onion"]);
        assert_eq!(record.spice_level, 8);
    }

    #[test]
    fn test_parse_header_variants() {
        assert_eq!(
            parse_header("Part 4: Spice factor: 7"),
            Some(Header {
                field: Some(Field::Spice),
                inline: Some("7".to_string())
            })
        );
        assert_eq!(
            parse_header("Part 3: A creamy soup"),
            Some(Header {
                field: None,
                inline: Some("A creamy soup".to_string())
            })
        );
        assert_eq!(parse_header("Partially cover the pot"), None);
        assert_eq!(parse_header("Step 1: Add the ingredients"), None);
        assert_eq!(parse_header("Add ingredients gradually"), None);
    }

    #[test]
    fn test_parse_suggestions() {
        let raw = "Here are some ideas:\n1. Shakshuka\n2. \"Egg Fried Rice\"\n3) Carbonara\n- Frittata\n5. Quiche\n6. Omelette";
        assert_eq!(
            parse_suggestions(raw),
            vec!["Shakshuka", "Egg Fried Rice", "Carbonara", "Frittata", "Quiche"]
        );
    }

    #[test]
    fn test_determine_difficulty() {
        let mut record = parse_recipe("Salad", "- lettuce\n===\n1. toss");
        assert_eq!(determine_difficulty(&record), Difficulty::Easy);

        record.ingredients = vec!["x".to_string(); 10];
        record.instructions = vec!["y".to_string(); 5];
        assert_eq!(determine_difficulty(&record), Difficulty::Medium);

        record.instructions = vec!["y".to_string(); 12];
        assert_eq!(determine_difficulty(&record), Difficulty::Hard);
    }
}
