//! Recipe data model.
//!
//! A [`Recipe`] owns its [`Ingredient`] and [`Instruction`] lines and is
//! filed under a set of [`RecipeCategory`] tags from a closed vocabulary.
//! New and edited recipes are assembled through a [`RecipeDraft`].

mod category;
mod draft;
mod recipe;

pub use category::{RecipeCategory, UnknownCategory};
pub use draft::{RecipeDraft, ValidationError};
pub use recipe::{Ingredient, Instruction, Recipe, RecipeId};

pub(crate) use recipe::renumber_instructions;
