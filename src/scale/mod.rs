//! Serving-size scaling.
//!
//! Ingredient amounts are written for a recipe's baseline servings. Scaling
//! multiplies every amount by `current / base` and rounds the result to two
//! decimal places, half away from zero.

use crate::Ingredient;
use std::num::NonZeroU32;

mod model;

pub use model::ServingsAdjuster;

/// Scale ingredient amounts from `base` servings to `current` servings.
///
/// Ids, names and units are carried over unchanged and order is preserved.
/// Amounts are rounded even at the baseline, so an amount written with more
/// than two decimals comes back rounded.
pub fn scale_ingredients(
    ingredients: &[Ingredient],
    base: NonZeroU32,
    current: NonZeroU32,
) -> Vec<Ingredient> {
    ingredients
        .iter()
        .map(|ingredient| Ingredient {
            amount: scale_amount(ingredient.amount, base, current),
            ..ingredient.clone()
        })
        .collect()
}

/// `round(amount * current / base, 2)`
pub fn scale_amount(amount: f64, base: NonZeroU32, current: NonZeroU32) -> f64 {
    round_to_hundredths(amount * f64::from(current.get()) / f64::from(base.get()))
}

/// Round to two decimal places, half away from zero.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
