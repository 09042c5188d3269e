use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed vocabulary of tags a recipe can be filed under.
///
/// Variants are declared in display order, which is also their sort order
/// inside a recipe's category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecipeCategory {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Vegan,
    Vegetarian,
    Italian,
    Japanese,
    Mexican,
    Indian,
}

impl RecipeCategory {
    /// Every category, in display order.
    pub const ALL: [RecipeCategory; 11] = [
        RecipeCategory::Breakfast,
        RecipeCategory::Lunch,
        RecipeCategory::Dinner,
        RecipeCategory::Dessert,
        RecipeCategory::Snack,
        RecipeCategory::Vegan,
        RecipeCategory::Vegetarian,
        RecipeCategory::Italian,
        RecipeCategory::Japanese,
        RecipeCategory::Mexican,
        RecipeCategory::Indian,
    ];

    /// Returns the human-readable label, which is also the parse form.
    pub fn label(&self) -> &'static str {
        match self {
            RecipeCategory::Breakfast => "Breakfast",
            RecipeCategory::Lunch => "Lunch",
            RecipeCategory::Dinner => "Dinner",
            RecipeCategory::Dessert => "Dessert",
            RecipeCategory::Snack => "Snack",
            RecipeCategory::Vegan => "Vegan",
            RecipeCategory::Vegetarian => "Vegetarian",
            RecipeCategory::Italian => "Italian",
            RecipeCategory::Japanese => "Japanese",
            RecipeCategory::Mexican => "Mexican",
            RecipeCategory::Indian => "Indian",
        }
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown recipe category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for RecipeCategory {
    type Err = UnknownCategory;

    /// Parses a category label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RecipeCategory::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
