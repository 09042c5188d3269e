//! Case-insensitive recipe filtering.
//!
//! A recipe matches when its title, description or one of its category
//! labels contains the query as a substring, ignoring case. There is no
//! tokenizing or ranking: results keep the order of the input.

use crate::Recipe;

mod model;

pub use model::SearchQuery;

/// Filter recipes whose title, description or categories contain `query`.
///
/// An empty query matches every recipe.
pub fn search<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    let query = SearchQuery::new(query);
    recipes.iter().filter(|r| query.matches(r)).collect()
}

/// Check a single recipe against `query`
pub fn matches(recipe: &Recipe, query: &str) -> bool {
    SearchQuery::new(query).matches(recipe)
}
