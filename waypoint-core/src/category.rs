//! Keyword matching for free-text destination categories.
//!
//! Categories come from user input and the catalog, so matching is deliberately
//! loose: lower-case, split on anything non-alphanumeric, compare tokens.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Restaurant,
    Breakfast,
    Bar,
    Museum,
    Park,
}

const RESTAURANT_WORDS: &[&str] = &[
    "restaurant", "dining", "bistro", "eatery", "food", "brasserie", "trattoria",
    "pizzeria", "steakhouse", "tavern", "diner", "lunch", "dinner", "sushi", "ramen",
    "tapas",
];
const BREAKFAST_WORDS: &[&str] = &["breakfast", "brunch", "cafe", "coffee", "bakery", "patisserie"];
const BAR_WORDS: &[&str] = &["bar", "pub", "brewery", "cocktail", "nightlife", "club", "wine", "taproom"];
const MUSEUM_WORDS: &[&str] = &["museum", "gallery", "exhibition", "art", "monument"];
const PARK_WORDS: &[&str] = &["park", "garden", "beach", "trail", "viewpoint", "nature"];

fn words_for(kind: CategoryKind) -> &'static [&'static str] {
    match kind {
        CategoryKind::Restaurant => RESTAURANT_WORDS,
        CategoryKind::Breakfast => BREAKFAST_WORDS,
        CategoryKind::Bar => BAR_WORDS,
        CategoryKind::Museum => MUSEUM_WORDS,
        CategoryKind::Park => PARK_WORDS,
    }
}

/// Trimmed, lower-cased form used for equality between categories.
pub fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}

pub fn tokenize(category: &str) -> Vec<String> {
    category
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

fn token_matches(token: &str, word: &str) -> bool {
    token == word || token.strip_suffix('s') == Some(word)
}

/// Does any token of `category` name one of the given keywords?
pub fn has_keyword(category: &str, words: &[&str]) -> bool {
    tokenize(category)
        .iter()
        .any(|t| words.iter().any(|w| token_matches(t, w)))
}

/// Matched kinds of a category, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryKinds(Vec<CategoryKind>);

impl CategoryKinds {
    pub fn classify(category: &str) -> Self {
        let tokens = tokenize(category);
        let kinds = [
            CategoryKind::Restaurant,
            CategoryKind::Breakfast,
            CategoryKind::Bar,
            CategoryKind::Museum,
            CategoryKind::Park,
        ]
        .into_iter()
        .filter(|k| {
            tokens
                .iter()
                .any(|t| words_for(*k).iter().any(|w| token_matches(t, w)))
        })
        .collect();
        Self(kinds)
    }

    pub fn contains(&self, kind: CategoryKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_food(&self) -> bool {
        self.contains(CategoryKind::Restaurant) || self.contains(CategoryKind::Breakfast)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CategoryKind> + '_ {
        self.0.iter().copied()
    }
}
