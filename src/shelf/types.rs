use crate::menu::MenuAction;
use serde::{Deserialize, Serialize};

/// The current shelf file version
pub const SHELF_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelfList {
    Saved,
    Favorites,
    Liked,
}

impl ShelfList {
    /// The list a recipe menu action writes to
    pub fn for_action(action: MenuAction) -> Option<Self> {
        match action {
            MenuAction::Save => Some(ShelfList::Saved),
            MenuAction::Favorite => Some(ShelfList::Favorites),
            MenuAction::Like => Some(ShelfList::Liked),
            MenuAction::ShowSuggestion(_) => None,
        }
    }

    /// Past-tense verb for confirmations
    pub fn verb(&self) -> &'static str {
        match self {
            ShelfList::Saved => "saved",
            ShelfList::Favorites => "favorited",
            ShelfList::Liked => "liked",
        }
    }
}

impl std::fmt::Display for ShelfList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShelfList::Saved => write!(f, "Saved"),
            ShelfList::Favorites => write!(f, "Favorites"),
            ShelfList::Liked => write!(f, "Liked"),
        }
    }
}

/// A user's saved, favorite and liked dishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelf {
    pub version: u32,
    #[serde(default)]
    pub saved: Vec<String>,
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub liked: Vec<String>,
}

impl Default for Shelf {
    fn default() -> Self {
        Shelf {
            version: SHELF_VERSION,
            saved: Vec::new(),
            favorites: Vec::new(),
            liked: Vec::new(),
        }
    }
}

impl Shelf {
    pub fn list(&self, list: ShelfList) -> &[String] {
        match list {
            ShelfList::Saved => &self.saved,
            ShelfList::Favorites => &self.favorites,
            ShelfList::Liked => &self.liked,
        }
    }

    fn list_mut(&mut self, list: ShelfList) -> &mut Vec<String> {
        match list {
            ShelfList::Saved => &mut self.saved,
            ShelfList::Favorites => &mut self.favorites,
            ShelfList::Liked => &mut self.liked,
        }
    }

    /// Add a dish to a list. Returns false if it was already there.
    pub fn add(&mut self, list: ShelfList, dish_name: &str) -> bool {
        let entries = self.list_mut(list);
        if entries.iter().any(|d| d == dish_name) {
            return false;
        }
        entries.push(dish_name.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty() && self.favorites.is_empty() && self.liked.is_empty()
    }
}
