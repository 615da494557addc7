//! Diet adherence metrics.
//!
//! The summary is recomputed from the owner's full meal set on every request;
//! nothing here is cached or persisted.

use serde::Serialize;

use crate::database::Meal;

/// Adherence summary for one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietSummary {
    pub total_meals: u64,
    pub total_meals_on_diet: u64,
    pub total_meals_off_diet: u64,
    /// Longest contiguous run of on-diet meals in chronological order
    pub best_on_diet_sequence: u64,
}

/// Compute the summary over an owner's meals.
///
/// The input is expected in insertion order. The streak walk needs the meals
/// oldest-first, which is NOT the order the listing endpoint uses - the two
/// views are independent, so this sorts its own copy. The sort is stable,
/// keeping meals with equal timestamps in insertion order.
pub fn summarize(meals: &[Meal]) -> DietSummary {
    let total_meals = meals.len() as u64;
    let total_meals_on_diet = meals.iter().filter(|m| m.is_on_diet).count() as u64;

    let mut chronological: Vec<&Meal> = meals.iter().collect();
    chronological.sort_by_key(|m| m.recorded_at);

    let mut run = 0u64;
    let mut best = 0u64;
    for meal in chronological {
        if meal.is_on_diet {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }

    DietSummary {
        total_meals,
        total_meals_on_diet,
        total_meals_off_diet: total_meals - total_meals_on_diet,
        best_on_diet_sequence: best,
    }
}
