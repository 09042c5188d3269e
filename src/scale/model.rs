use crate::{Ingredient, Recipe};
use std::num::NonZeroU32;

/// Serving counter behind a recipe's detail view.
///
/// Starts at the recipe's own servings. Decreasing stops at one serving,
/// increasing has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServingsAdjuster {
    base: NonZeroU32,
    current: NonZeroU32,
}

impl ServingsAdjuster {
    pub fn new(base: NonZeroU32) -> Self {
        Self {
            base,
            current: base,
        }
    }

    pub fn for_recipe(recipe: &Recipe) -> Self {
        Self::new(recipe.servings)
    }

    pub fn base(&self) -> NonZeroU32 {
        self.base
    }

    pub fn current(&self) -> NonZeroU32 {
        self.current
    }

    /// Add one serving.
    pub fn increase(&mut self) {
        self.current = self.current.saturating_add(1);
    }

    /// Remove one serving. Returns false, leaving the count alone, at one serving.
    pub fn decrease(&mut self) -> bool {
        match NonZeroU32::new(self.current.get() - 1) {
            Some(fewer) => {
                self.current = fewer;
                true
            }
            None => false,
        }
    }

    /// Whether the view can offer a decrease.
    pub fn can_decrease(&self) -> bool {
        self.current.get() > 1
    }

    /// Jump straight to `servings`.
    pub fn set(&mut self, servings: NonZeroU32) {
        self.current = servings;
    }

    pub fn reset(&mut self) {
        self.current = self.base;
    }

    /// True when amounts shown differ from the recipe as written.
    pub fn is_adjusted(&self) -> bool {
        self.current != self.base
    }

    /// `current / base`
    pub fn ratio(&self) -> f64 {
        f64::from(self.current.get()) / f64::from(self.base.get())
    }

    /// The recipe's ingredients scaled to the current serving count.
    pub fn adjusted_ingredients(&self, recipe: &Recipe) -> Vec<Ingredient> {
        super::scale_ingredients(&recipe.ingredients, recipe.servings, self.current)
    }
}
