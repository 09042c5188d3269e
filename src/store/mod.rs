//! In-memory recipe collection.
//!
//! [`RecipeStore`] is the authoritative list of recipes for the lifetime of
//! the process. It is a plain struct owned by the application and passed by
//! reference; nothing is persisted. Mutations address recipes by id, and an
//! id that matches nothing leaves the collection untouched rather than
//! failing.

use crate::search::SearchQuery;
use crate::{Recipe, RecipeId};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store with existing recipes, keeping their ids.
    ///
    /// A recipe whose id is already taken by an earlier one is given a fresh
    /// id, so every id in the store stays unique.
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut store = Self::default();
        for mut recipe in recipes {
            if store.position(recipe.id).is_some() {
                let id = store.fresh_id();
                debug!(duplicate = %recipe.id, %id, "reassigning duplicate recipe id");
                recipe.id = id;
            }
            store.recipes.push(recipe);
        }
        store
    }

    /// Adds a recipe under a freshly generated id and returns that id.
    ///
    /// Whatever id the given recipe carries is discarded.
    pub fn add_recipe(&mut self, mut recipe: Recipe) -> RecipeId {
        let id = self.fresh_id();
        recipe.id = id;
        debug!(%id, title = %recipe.title, "adding recipe");
        self.recipes.push(recipe);
        id
    }

    /// Replaces every field of the recipe with `id`, keeping its id and
    /// creation time.
    ///
    /// Returns false, changing nothing, if no recipe has that id.
    pub fn update_recipe(&mut self, id: RecipeId, mut recipe: Recipe) -> bool {
        match self.position(id) {
            Some(index) => {
                let slot = &mut self.recipes[index];
                recipe.id = id;
                recipe.created_at = slot.created_at;
                debug!(%id, title = %recipe.title, "updating recipe");
                *slot = recipe;
                true
            }
            None => {
                debug!(%id, "no recipe to update, ignoring");
                false
            }
        }
    }

    /// Removes the recipe with `id`, returning it if it was present.
    pub fn delete_recipe(&mut self, id: RecipeId) -> Option<Recipe> {
        let Some(index) = self.position(id) else {
            debug!(%id, "no recipe to delete, ignoring");
            return None;
        };
        debug!(%id, "deleting recipe");
        Some(self.recipes.remove(index))
    }

    /// Flips the liked flag of the recipe with `id` and returns the new value.
    pub fn toggle_like(&mut self, id: RecipeId) -> Option<bool> {
        let Some(recipe) = self.recipes.iter_mut().find(|r| r.id == id) else {
            debug!(%id, "no recipe to like, ignoring");
            return None;
        };
        recipe.is_liked = !recipe.is_liked;
        debug!(%id, liked = recipe.is_liked, "toggled like");
        Some(recipe.is_liked)
    }

    /// All recipes, in insertion order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Liked recipes, in insertion order.
    pub fn liked(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| r.is_liked).collect()
    }

    /// Recipes matching `query`; see [`crate::search::search`].
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        let query = SearchQuery::new(query);
        self.recipes.iter().filter(|r| query.matches(r)).collect()
    }

    fn position(&self, id: RecipeId) -> Option<usize> {
        self.recipes.iter().position(|r| r.id == id)
    }

    fn fresh_id(&self) -> RecipeId {
        // v4 collisions are not expected; the loop only guards the invariant
        loop {
            let id = RecipeId::new();
            if self.position(id).is_none() {
                return id;
            }
        }
    }
}
