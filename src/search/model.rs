use crate::Recipe;

/// A normalized search query.
///
/// The needle is lowercased once so matching a whole collection does not
/// re-fold the query for every recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// True if the title, description or any category label contains the needle.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.is_empty() {
            return true;
        }
        contains_folded(&recipe.title, &self.needle)
            || contains_folded(&recipe.description, &self.needle)
            || recipe
                .categories
                .iter()
                .any(|category| contains_folded(category.label(), &self.needle))
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
