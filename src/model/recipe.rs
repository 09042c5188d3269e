use super::category::RecipeCategory;
use super::draft::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use uuid::Uuid;

/// Identity of a recipe in a [`RecipeStore`](crate::RecipeStore).
///
/// Ids are random (v4) and are never reassigned once handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generates a fresh, unused identity.
    pub fn new() -> Self {
        RecipeId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(RecipeId)
    }
}

impl From<Uuid> for RecipeId {
    fn from(uuid: Uuid) -> Self {
        RecipeId(uuid)
    }
}

/// A single measured ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique within the owning recipe
    pub id: Uuid,
    pub name: String,
    /// Quantity for the recipe's baseline servings (never negative)
    pub amount: f64,
    /// Free-text measurement unit, e.g. "cup" or "g"
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Ingredient {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }

    /// Checks that the amount is a finite, non-negative quantity.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount.is_finite() && self.amount >= 0.0 {
            Ok(())
        } else {
            Err(ValidationError::InvalidAmount {
                name: self.name.clone(),
                amount: self.amount,
            })
        }
    }
}

/// One numbered step of a recipe's method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Unique within the owning recipe
    pub id: Uuid,
    /// One-indexed position in the recipe's instruction list
    pub step: u32,
    pub text: String,
}

impl Instruction {
    pub fn new(step: u32, text: impl Into<String>) -> Self {
        Instruction {
            id: Uuid::new_v4(),
            step,
            text: text.into(),
        }
    }
}

/// A dish with its metadata, ingredients and instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    /// Opaque image reference: a URL, a path, or an embedded data URL.
    /// Empty when the recipe has no image.
    #[serde(default)]
    pub image: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Cooking time in minutes
    pub cook_time: u32,
    /// Baseline serving count that ingredient amounts are written for
    pub servings: NonZeroU32,
    #[serde(default)]
    pub categories: BTreeSet<RecipeCategory>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Creates an empty recipe with a fresh id, stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        servings: NonZeroU32,
    ) -> Self {
        Recipe {
            id: RecipeId::new(),
            title: title.into(),
            description: description.into(),
            image: String::new(),
            prep_time: 0,
            cook_time: 0,
            servings,
            categories: BTreeSet::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            is_liked: false,
            created_at: Utc::now(),
        }
    }

    /// Total time in minutes, preparation plus cooking.
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }

    /// Returns the image to show for this recipe.
    ///
    /// Recipes without an image fall back to one of `placeholder_count`
    /// bundled placeholders, picked by the recipe's position in the list.
    pub fn display_image(&self, index: usize, placeholder_count: usize) -> String {
        if !self.image.is_empty() {
            return self.image.clone();
        }
        let slot = index % placeholder_count.max(1) + 1;
        format!("/placeholder-recipe-{slot}.jpg")
    }

    /// Checks that instruction steps run 1..=N in list order.
    pub fn steps_are_contiguous(&self) -> bool {
        self.instructions
            .iter()
            .enumerate()
            .all(|(index, instruction)| instruction.step as usize == index + 1)
    }
}

/// Rewrites instruction steps so they match list order, starting at 1.
pub(crate) fn renumber_instructions(instructions: &mut [Instruction]) {
    for (index, instruction) in instructions.iter_mut().enumerate() {
        instruction.step = index as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn servings(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_new_recipe_defaults() {
        let recipe = Recipe::new("Pancakes", "Fluffy", servings(4));
        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.servings.get(), 4);
        assert!(recipe.image.is_empty());
        assert!(recipe.categories.is_empty());
        assert!(!recipe.is_liked);
    }

    #[test]
    fn test_fresh_ids_differ() {
        let a = Recipe::new("A", "a", servings(1));
        let b = Recipe::new("A", "a", servings(1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_recipe_id_parse() {
        let id = RecipeId::new();
        let parsed: RecipeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<RecipeId>().is_err());
    }

    #[test]
    fn test_total_time() {
        let mut recipe = Recipe::new("Stew", "Slow", servings(6));
        recipe.prep_time = 20;
        recipe.cook_time = 90;
        assert_eq!(recipe.total_time(), 110);
    }

    #[test]
    fn test_display_image_placeholder_cycles() {
        let recipe = Recipe::new("Toast", "Crunchy", servings(1));
        assert_eq!(recipe.display_image(0, 5), "/placeholder-recipe-1.jpg");
        assert_eq!(recipe.display_image(4, 5), "/placeholder-recipe-5.jpg");
        assert_eq!(recipe.display_image(5, 5), "/placeholder-recipe-1.jpg");
        assert_eq!(recipe.display_image(3, 0), "/placeholder-recipe-1.jpg");
    }

    #[test]
    fn test_display_image_prefers_own_image() {
        let mut recipe = Recipe::new("Toast", "Crunchy", servings(1));
        recipe.image = "https://example.com/toast.jpg".to_string();
        assert_eq!(recipe.display_image(2, 5), "https://example.com/toast.jpg");
    }

    #[test]
    fn test_renumber_instructions() {
        let mut recipe = Recipe::new("Soup", "Hot", servings(2));
        recipe.instructions = vec![
            Instruction::new(2, "Chop"),
            Instruction::new(5, "Boil"),
            Instruction::new(9, "Serve"),
        ];
        assert!(!recipe.steps_are_contiguous());

        renumber_instructions(&mut recipe.instructions);
        assert!(recipe.steps_are_contiguous());
        let steps: Vec<u32> = recipe.instructions.iter().map(|i| i.step).collect();
        assert_eq!(steps, vec![1, 2, 3]);
    }

    #[test]
    fn test_json_shape() {
        let mut recipe = Recipe::new("Salad", "Green", servings(2));
        recipe.categories.insert(RecipeCategory::Vegan);
        recipe.ingredients.push(Ingredient::new("Lettuce", 1.0, "head"));

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["servings"], 2);
        assert_eq!(json["categories"][0], "Vegan");
        assert_eq!(json["ingredients"][0]["unit"], "head");
        assert_eq!(json["id"], recipe.id.to_string());
    }

    #[test]
    fn test_zero_servings_rejected_on_deserialize() {
        let mut json = serde_json::to_value(Recipe::new("X", "Y", servings(1))).unwrap();
        json["servings"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Recipe>(json).is_err());
    }
}
