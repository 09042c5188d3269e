pub mod config;
pub mod ffi;
pub mod logging;
pub mod model;
pub mod photo;
pub mod scale;
pub mod search;
pub mod store;

pub use config::Config;
pub use model::*;
pub use scale::{scale_ingredients, ServingsAdjuster};
pub use search::search;
pub use store::RecipeStore;

uniffi::setup_scaffolding!();
