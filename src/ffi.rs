//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Ids, timestamps and categories cross the boundary as strings; the store
//! itself lives behind a single mutex so foreign threads can share it.

use crate::config::{Config, ConfigError};
use crate::photo::{self, DisplaySize, PercentCrop, PhotoError, PixelCrop};
use crate::{
    Ingredient, Instruction, Recipe, RecipeCategory, RecipeId, RecipeStore, ValidationError,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RecipeBoxError {
    #[error("Invalid id: {message}")]
    InvalidId { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Photo error: {message}")]
    PhotoError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

impl From<PhotoError> for RecipeBoxError {
    fn from(e: PhotoError) -> Self {
        RecipeBoxError::PhotoError {
            message: e.to_string(),
        }
    }
}

impl From<ConfigError> for RecipeBoxError {
    fn from(e: ConfigError) -> Self {
        RecipeBoxError::ConfigError {
            message: e.to_string(),
        }
    }
}

impl From<ValidationError> for RecipeBoxError {
    fn from(e: ValidationError) -> Self {
        RecipeBoxError::InvalidInput {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for RecipeBoxError {
    fn from(e: serde_json::Error) -> Self {
        RecipeBoxError::SerializationError {
            message: e.to_string(),
        }
    }
}

/// FFI-safe ingredient line.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiIngredient {
    /// UUID string; empty to have one generated
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// FFI-safe instruction step.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiInstruction {
    /// UUID string; empty to have one generated
    pub id: String,
    pub step: u32,
    pub text: String,
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    /// Id assigned by the book. Ignored on input: `add_recipe` assigns a
    /// new one and `update_recipe` uses its `id` argument.
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: u32,
    pub cook_time: u32,
    /// Must be at least 1
    pub servings: u32,
    /// Category labels, e.g. "Vegan"
    pub categories: Vec<String>,
    pub ingredients: Vec<FfiIngredient>,
    pub instructions: Vec<FfiInstruction>,
    pub is_liked: bool,
    /// RFC 3339 timestamp; empty for "now"
    pub created_at: String,
}

/// A crop rectangle in displayed-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct FfiCrop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&Ingredient> for FfiIngredient {
    fn from(i: &Ingredient) -> Self {
        FfiIngredient {
            id: i.id.to_string(),
            name: i.name.clone(),
            amount: i.amount,
            unit: i.unit.clone(),
        }
    }
}

impl TryFrom<FfiIngredient> for Ingredient {
    type Error = RecipeBoxError;

    fn try_from(i: FfiIngredient) -> Result<Self, Self::Error> {
        let ingredient = Ingredient {
            id: parse_line_id(&i.id)?,
            name: i.name,
            amount: i.amount,
            unit: i.unit,
        };
        ingredient.validate()?;
        Ok(ingredient)
    }
}

impl From<&Instruction> for FfiInstruction {
    fn from(i: &Instruction) -> Self {
        FfiInstruction {
            id: i.id.to_string(),
            step: i.step,
            text: i.text.clone(),
        }
    }
}

impl TryFrom<FfiInstruction> for Instruction {
    type Error = RecipeBoxError;

    fn try_from(i: FfiInstruction) -> Result<Self, Self::Error> {
        Ok(Instruction {
            id: parse_line_id(&i.id)?,
            step: i.step,
            text: i.text,
        })
    }
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id.to_string(),
            title: r.title.clone(),
            description: r.description.clone(),
            image: r.image.clone(),
            prep_time: r.prep_time,
            cook_time: r.cook_time,
            servings: r.servings.get(),
            categories: r.categories.iter().map(|c| c.to_string()).collect(),
            ingredients: r.ingredients.iter().map(FfiIngredient::from).collect(),
            instructions: r.instructions.iter().map(FfiInstruction::from).collect(),
            is_liked: r.is_liked,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

impl FfiRecipe {
    /// Convert to a [`Recipe`] stored under `id`.
    ///
    /// The record's own `id` string is not read; the store decides identity.
    fn into_recipe(self, id: RecipeId) -> Result<Recipe, RecipeBoxError> {
        let servings = parse_servings(self.servings)?;
        let categories = self
            .categories
            .iter()
            .map(|c| {
                c.parse::<RecipeCategory>()
                    .map_err(|e| RecipeBoxError::InvalidInput {
                        message: e.to_string(),
                    })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        let created_at = if self.created_at.is_empty() {
            Utc::now()
        } else {
            DateTime::parse_from_rfc3339(&self.created_at)
                .map_err(|e| RecipeBoxError::InvalidInput {
                    message: format!("created_at: {e}"),
                })?
                .with_timezone(&Utc)
        };

        let mut instructions = self
            .instructions
            .into_iter()
            .map(Instruction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        instructions.sort_by_key(|i| i.step);
        crate::model::renumber_instructions(&mut instructions);

        Ok(Recipe {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings,
            categories,
            ingredients: self
                .ingredients
                .into_iter()
                .map(Ingredient::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            instructions,
            is_liked: self.is_liked,
            created_at,
        })
    }
}

impl From<FfiCrop> for PixelCrop {
    fn from(c: FfiCrop) -> Self {
        PixelCrop {
            x: c.x,
            y: c.y,
            width: c.width,
            height: c.height,
        }
    }
}

impl From<PixelCrop> for FfiCrop {
    fn from(c: PixelCrop) -> Self {
        FfiCrop {
            x: c.x,
            y: c.y,
            width: c.width,
            height: c.height,
        }
    }
}

fn parse_recipe_id(id: &str) -> Result<RecipeId, RecipeBoxError> {
    id.parse().map_err(|e: uuid::Error| RecipeBoxError::InvalidId {
        message: format!("{id}: {e}"),
    })
}

fn parse_line_id(id: &str) -> Result<Uuid, RecipeBoxError> {
    if id.is_empty() {
        return Ok(Uuid::new_v4());
    }
    Uuid::parse_str(id).map_err(|e| RecipeBoxError::InvalidId {
        message: format!("{id}: {e}"),
    })
}

fn parse_servings(servings: u32) -> Result<NonZeroU32, RecipeBoxError> {
    NonZeroU32::new(servings).ok_or_else(|| RecipeBoxError::InvalidInput {
        message: "servings must be at least 1".to_string(),
    })
}

/// A shared recipe collection for a foreign view layer.
///
/// All operations lock one mutex for their whole duration, so they never
/// interleave. Reads return copies.
#[derive(uniffi::Object)]
pub struct FfiRecipeBook {
    store: Mutex<RecipeStore>,
    config: Config,
}

#[uniffi::export]
impl FfiRecipeBook {
    /// Creates an empty book with default settings.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_config(Config::default()))
    }

    /// Creates an empty book with settings read from YAML.
    #[uniffi::constructor]
    pub fn from_config_yaml(yaml: String) -> Result<Arc<Self>, RecipeBoxError> {
        let config = Config::from_yaml_str(&yaml)?;
        Ok(Arc::new(Self::with_config(config)))
    }

    /// Adds a recipe under a new id and returns that id.
    pub fn add_recipe(&self, recipe: FfiRecipe) -> Result<String, RecipeBoxError> {
        let recipe = recipe.into_recipe(RecipeId::new())?;
        Ok(self.lock().add_recipe(recipe).to_string())
    }

    /// Replaces a recipe's fields. Returns false if no recipe has `id`.
    pub fn update_recipe(&self, id: String, recipe: FfiRecipe) -> Result<bool, RecipeBoxError> {
        let id = parse_recipe_id(&id)?;
        let recipe = recipe.into_recipe(id)?;
        Ok(self.lock().update_recipe(id, recipe))
    }

    /// Removes a recipe. Returns false if no recipe has `id`.
    pub fn delete_recipe(&self, id: String) -> Result<bool, RecipeBoxError> {
        let id = parse_recipe_id(&id)?;
        Ok(self.lock().delete_recipe(id).is_some())
    }

    /// Flips a recipe's liked flag, returning the new value.
    pub fn toggle_like(&self, id: String) -> Result<Option<bool>, RecipeBoxError> {
        let id = parse_recipe_id(&id)?;
        Ok(self.lock().toggle_like(id))
    }

    pub fn get_recipe(&self, id: String) -> Result<Option<FfiRecipe>, RecipeBoxError> {
        let id = parse_recipe_id(&id)?;
        Ok(self.lock().get(id).map(FfiRecipe::from))
    }

    /// All recipes in insertion order.
    pub fn recipes(&self) -> Vec<FfiRecipe> {
        self.lock().recipes().iter().map(FfiRecipe::from).collect()
    }

    pub fn liked_recipes(&self) -> Vec<FfiRecipe> {
        self.lock().liked().into_iter().map(FfiRecipe::from).collect()
    }

    /// Recipes whose title, description or categories contain `query`.
    pub fn search(&self, query: String) -> Vec<FfiRecipe> {
        self.lock()
            .search(&query)
            .into_iter()
            .map(FfiRecipe::from)
            .collect()
    }

    pub fn count(&self) -> u32 {
        self.lock().len() as u32
    }

    /// A recipe's ingredients scaled to `servings`.
    pub fn scaled_ingredients(
        &self,
        id: String,
        servings: u32,
    ) -> Result<Option<Vec<FfiIngredient>>, RecipeBoxError> {
        let id = parse_recipe_id(&id)?;
        let servings = parse_servings(servings)?;
        let store = self.lock();
        Ok(store.get(id).map(|recipe| {
            crate::scale::scale_ingredients(&recipe.ingredients, recipe.servings, servings)
                .iter()
                .map(FfiIngredient::from)
                .collect()
        }))
    }

    /// The image to show for the recipe at `index` in a list.
    pub fn display_image(&self, id: String, index: u32) -> Result<Option<String>, RecipeBoxError> {
        let id = parse_recipe_id(&id)?;
        let placeholders = self.config.placeholder_images;
        Ok(self
            .lock()
            .get(id)
            .map(|recipe| recipe.display_image(index as usize, placeholders)))
    }

    /// The crop the photo cropper opens with, for an image shown at the given size.
    pub fn initial_crop(&self, display_width: f64, display_height: f64) -> FfiCrop {
        let display = DisplaySize {
            width: display_width,
            height: display_height,
        };
        PercentCrop::initial(self.config.crop_aspect_ratio)
            .to_pixels(display)
            .into()
    }

    /// Installs a stderr log subscriber filtered by the book's `log_filter`
    /// setting. Returns false if one was already set.
    pub fn init_logging(&self) -> bool {
        self.config.init_logging()
    }

    /// All recipes as a JSON array.
    pub fn to_json(&self) -> Result<String, RecipeBoxError> {
        Ok(serde_json::to_string(self.lock().recipes())?)
    }
}

impl FfiRecipeBook {
    fn with_config(config: Config) -> Self {
        FfiRecipeBook {
            store: Mutex::new(RecipeStore::new()),
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, RecipeStore> {
        // Store operations leave the collection consistent even if a caller panicked
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Scales ingredient amounts from `base_servings` to `servings`.
#[uniffi::export]
pub fn scale_ingredients(
    ingredients: Vec<FfiIngredient>,
    base_servings: u32,
    servings: u32,
) -> Result<Vec<FfiIngredient>, RecipeBoxError> {
    let base = parse_servings(base_servings)?;
    let current = parse_servings(servings)?;
    let ingredients = ingredients
        .into_iter()
        .map(Ingredient::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(crate::scale::scale_ingredients(&ingredients, base, current)
        .iter()
        .map(FfiIngredient::from)
        .collect())
}

/// Returns every category label, in display order.
#[uniffi::export]
pub fn recipe_categories() -> Vec<String> {
    RecipeCategory::ALL.iter().map(|c| c.to_string()).collect()
}

/// Reads a picked image file into a data URL.
#[uniffi::export]
pub fn image_to_data_url(bytes: Vec<u8>) -> Result<String, RecipeBoxError> {
    Ok(photo::file_to_data_url(&bytes)?)
}

/// Crops an image held as a data URL and returns the region as a JPEG data URL.
///
/// # Arguments
/// * `data_url` - The source image, as produced by `image_to_data_url`
/// * `crop` - Selection in displayed-image pixels
/// * `display_width`, `display_height` - Size the image was displayed at
#[uniffi::export]
pub fn crop_image(
    data_url: String,
    crop: FfiCrop,
    display_width: f64,
    display_height: f64,
) -> Result<String, RecipeBoxError> {
    let display = DisplaySize {
        width: display_width,
        height: display_height,
    };
    Ok(photo::crop_data_url(&data_url, &PixelCrop::from(crop), display)?)
}

/// Installs a stderr log subscriber. Returns false if one was already set.
#[uniffi::export]
pub fn init_logging(filter: String) -> bool {
    crate::logging::init_logging(&filter)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_recipe(title: &str) -> FfiRecipe {
        FfiRecipe {
            id: String::new(),
            title: title.to_string(),
            description: format!("Classic {title}"),
            image: String::new(),
            prep_time: 10,
            cook_time: 20,
            servings: 4,
            categories: vec!["Breakfast".to_string()],
            ingredients: vec![FfiIngredient {
                id: String::new(),
                name: "Flour".to_string(),
                amount: 2.0,
                unit: "cup".to_string(),
            }],
            instructions: vec![
                FfiInstruction {
                    id: String::new(),
                    step: 2,
                    text: "Cook".to_string(),
                },
                FfiInstruction {
                    id: String::new(),
                    step: 1,
                    text: "Mix".to_string(),
                },
            ],
            is_liked: false,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_add_and_get() {
        let book = FfiRecipeBook::new();
        let id = book.add_recipe(create_test_recipe("Pancakes")).unwrap();

        let recipe = book.get_recipe(id.clone()).unwrap().unwrap();
        assert_eq!(recipe.id, id);
        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.categories, vec!["Breakfast"]);
        assert!(!recipe.ingredients[0].id.is_empty());
        assert_eq!(recipe.instructions[0].text, "Mix");
        assert_eq!(recipe.instructions[0].step, 1);
        assert_eq!(recipe.instructions[1].step, 2);
        assert_eq!(book.count(), 1);
    }

    #[test]
    fn test_add_ignores_given_id() {
        let book = FfiRecipeBook::new();
        let mut recipe = create_test_recipe("Pancakes");
        let given = RecipeId::new().to_string();
        recipe.id = given.clone();

        let id = book.add_recipe(recipe).unwrap();
        assert_ne!(id, given);
        assert!(book.get_recipe(given).unwrap().is_none());
    }

    #[test]
    fn test_update_delete_toggle() {
        let book = FfiRecipeBook::new();
        let id = book.add_recipe(create_test_recipe("Pancakes")).unwrap();

        assert!(book
            .update_recipe(id.clone(), create_test_recipe("Crepes"))
            .unwrap());
        assert_eq!(book.get_recipe(id.clone()).unwrap().unwrap().title, "Crepes");

        assert_eq!(book.toggle_like(id.clone()).unwrap(), Some(true));
        assert_eq!(book.liked_recipes().len(), 1);

        assert!(book.delete_recipe(id.clone()).unwrap());
        assert!(!book.delete_recipe(id.clone()).unwrap());
        assert_eq!(book.toggle_like(id).unwrap(), None);
        assert_eq!(book.count(), 0);
    }

    #[test]
    fn test_record_id_is_never_parsed() {
        let book = FfiRecipeBook::new();
        let mut recipe = create_test_recipe("Pancakes");
        recipe.id = "recipe-1".to_string();
        let id = book.add_recipe(recipe).unwrap();

        let mut edit = create_test_recipe("Crepes");
        edit.id = "not a uuid either".to_string();
        assert!(book.update_recipe(id.clone(), edit).unwrap());

        let saved = book.get_recipe(id.clone()).unwrap().unwrap();
        assert_eq!(saved.id, id);
        assert_eq!(saved.title, "Crepes");
    }

    #[test]
    fn test_missing_id_is_noop() {
        let book = FfiRecipeBook::new();
        book.add_recipe(create_test_recipe("Pancakes")).unwrap();
        let before = book.recipes();

        let missing = RecipeId::new().to_string();
        assert!(!book
            .update_recipe(missing, create_test_recipe("Ghost"))
            .unwrap());
        assert_eq!(book.recipes(), before);
    }

    #[test]
    fn test_invalid_input() {
        let book = FfiRecipeBook::new();
        assert!(matches!(
            book.toggle_like("not-a-uuid".to_string()),
            Err(RecipeBoxError::InvalidId { .. })
        ));

        let mut zero_servings = create_test_recipe("Air");
        zero_servings.servings = 0;
        assert!(matches!(
            book.add_recipe(zero_servings),
            Err(RecipeBoxError::InvalidInput { .. })
        ));

        let mut negative_amount = create_test_recipe("Debt");
        negative_amount.ingredients[0].amount = -2.0;
        assert!(matches!(
            book.add_recipe(negative_amount),
            Err(RecipeBoxError::InvalidInput { .. })
        ));

        let mut unknown_category = create_test_recipe("Brunch");
        unknown_category.categories = vec!["Brunch".to_string()];
        assert!(matches!(
            book.add_recipe(unknown_category),
            Err(RecipeBoxError::InvalidInput { .. })
        ));
        assert_eq!(book.count(), 0);
    }

    #[test]
    fn test_search_and_scale() {
        let book = FfiRecipeBook::new();
        let id = book.add_recipe(create_test_recipe("Pancakes")).unwrap();
        book.add_recipe(create_test_recipe("Waffles")).unwrap();

        assert_eq!(book.search("PANCAKE".to_string()).len(), 1);
        assert_eq!(book.search("breakfast".to_string()).len(), 2);

        let scaled = book.scaled_ingredients(id, 6).unwrap().unwrap();
        assert_eq!(scaled[0].amount, 3.0);
        assert_eq!(scaled[0].unit, "cup");
    }

    #[test]
    fn test_scale_ingredients_function() {
        let ingredients = create_test_recipe("Pancakes").ingredients;
        let scaled = scale_ingredients(ingredients, 4, 2).unwrap();
        assert_eq!(scaled[0].amount, 1.0);
        assert!(scale_ingredients(vec![], 4, 0).is_err());
    }

    #[test]
    fn test_display_image_and_crop_from_config() {
        let book = FfiRecipeBook::from_config_yaml(
            "placeholder_images: 2\ncrop_aspect_ratio: 2.0".to_string(),
        )
        .unwrap();
        let id = book.add_recipe(create_test_recipe("Pancakes")).unwrap();

        assert_eq!(
            book.display_image(id, 3).unwrap().unwrap(),
            "/placeholder-recipe-2.jpg"
        );

        let crop = book.initial_crop(400.0, 300.0);
        assert_eq!(crop.width, 400.0);
        assert_eq!(crop.height, 150.0);
    }

    #[test]
    fn test_book_init_logging() {
        let book =
            FfiRecipeBook::from_config_yaml("log_filter: recipe_box=debug".to_string()).unwrap();
        book.init_logging();
        assert!(!book.init_logging());
        assert!(!init_logging("recipe_box=debug".to_string()));
    }

    #[test]
    fn test_to_json() {
        let book = FfiRecipeBook::new();
        book.add_recipe(create_test_recipe("Pancakes")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&book.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["title"], "Pancakes");
    }

    #[test]
    fn test_recipe_categories() {
        let categories = recipe_categories();
        assert_eq!(categories.len(), 11);
        assert_eq!(categories[0], "Breakfast");
        assert_eq!(categories[10], "Indian");
    }

    #[test]
    fn test_image_to_data_url_rejects_garbage() {
        assert!(matches!(
            image_to_data_url(b"nope".to_vec()),
            Err(RecipeBoxError::PhotoError { .. })
        ));
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
