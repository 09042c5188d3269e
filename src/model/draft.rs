use super::category::RecipeCategory;
use super::recipe::{renumber_instructions, Ingredient, Instruction, Recipe, RecipeId};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::num::NonZeroU32;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when a draft is submitted with missing or invalid fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Recipe title is required")]
    MissingTitle,

    #[error("Recipe description is required")]
    MissingDescription,

    #[error("Ingredient {name:?} needs a non-negative amount, got {amount}")]
    InvalidAmount { name: String, amount: f64 },
}

/// Editable form state for creating or editing a recipe.
///
/// A draft starts either empty or as a copy of an existing recipe. Calling
/// [`submit`](RecipeDraft::submit) produces the [`Recipe`] to hand to the
/// store: a new recipe gets a fresh id and creation time, an edited one
/// keeps its id, creation time and liked state.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: NonZeroU32,
    categories: BTreeSet<RecipeCategory>,
    pub ingredients: Vec<Ingredient>,
    instructions: Vec<Instruction>,
    /// Identity carried over from the recipe being edited
    origin: Option<DraftOrigin>,
}

#[derive(Debug, Clone, PartialEq)]
struct DraftOrigin {
    id: RecipeId,
    is_liked: bool,
    created_at: DateTime<Utc>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeDraft {
    /// An empty draft: one serving, no times, no lines.
    pub fn new() -> Self {
        RecipeDraft {
            title: String::new(),
            description: String::new(),
            image: String::new(),
            prep_time: 0,
            cook_time: 0,
            servings: NonZeroU32::MIN,
            categories: BTreeSet::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            origin: None,
        }
    }

    /// A draft pre-filled from an existing recipe, for editing.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        RecipeDraft {
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            image: recipe.image.clone(),
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            categories: recipe.categories.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            origin: Some(DraftOrigin {
                id: recipe.id,
                is_liked: recipe.is_liked,
                created_at: recipe.created_at,
            }),
        }
    }

    /// Returns true when this draft edits an existing recipe.
    pub fn is_edit(&self) -> bool {
        self.origin.is_some()
    }

    pub fn categories(&self) -> &BTreeSet<RecipeCategory> {
        &self.categories
    }

    /// Replaces the selected categories; duplicates collapse.
    pub fn set_categories(&mut self, categories: impl IntoIterator<Item = RecipeCategory>) {
        self.categories = categories.into_iter().collect();
    }

    pub fn set_image(&mut self, image: impl Into<String>) {
        self.image = image.into();
    }

    /// Appends a blank ingredient line and returns its id.
    pub fn add_ingredient(&mut self) -> Uuid {
        let ingredient = Ingredient::new("", 0.0, "");
        let id = ingredient.id;
        self.ingredients.push(ingredient);
        id
    }

    pub fn ingredient_mut(&mut self, id: Uuid) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|i| i.id == id)
    }

    /// Removes an ingredient line. Returns false if no line has that id.
    pub fn remove_ingredient(&mut self, id: Uuid) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i.id != id);
        self.ingredients.len() != before
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Appends a blank step numbered after the existing ones and returns its id.
    pub fn add_instruction(&mut self) -> Uuid {
        let step = self.instructions.len() as u32 + 1;
        let instruction = Instruction::new(step, "");
        let id = instruction.id;
        self.instructions.push(instruction);
        id
    }

    /// Sets the text of a step. Returns false if no step has that id.
    pub fn set_instruction_text(&mut self, id: Uuid, text: impl Into<String>) -> bool {
        match self.instructions.iter_mut().find(|i| i.id == id) {
            Some(instruction) => {
                instruction.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Removes a step; the remaining steps are renumbered 1..N.
    pub fn remove_instruction(&mut self, id: Uuid) -> bool {
        let before = self.instructions.len();
        self.instructions.retain(|i| i.id != id);
        renumber_instructions(&mut self.instructions);
        self.instructions.len() != before
    }

    /// Builds the recipe this draft describes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the title or description is blank, or if
    /// an ingredient amount is negative or not a number.
    pub fn submit(&self) -> Result<Recipe, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        for ingredient in &self.ingredients {
            ingredient.validate()?;
        }

        let (id, is_liked, created_at) = match &self.origin {
            Some(origin) => (origin.id, origin.is_liked, origin.created_at),
            None => (RecipeId::new(), false, Utc::now()),
        };

        let mut instructions = self.instructions.clone();
        renumber_instructions(&mut instructions);

        Ok(Recipe {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            categories: self.categories.clone(),
            ingredients: self.ingredients.clone(),
            instructions,
            is_liked,
            created_at,
        })
    }
}
