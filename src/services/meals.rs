//! Meal ownership rules, CRUD, and listing.
//!
//! Every operation is scoped to the caller's owner key. A meal that exists
//! but belongs to someone else is reported exactly like a meal that does not
//! exist, so identifiers cannot be enumerated by other sessions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::{Meal, MealStore};
use crate::error::ApiError;
use crate::services::summary::{self, DietSummary};

/// Mutable meal fields, used both for creation and full replacement
#[derive(Debug, Clone)]
pub struct MealInput {
    pub name: String,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
    pub is_on_diet: bool,
}

/// Insert a new meal owned by `session_id`
pub async fn create_meal(
    store: &dyn MealStore,
    session_id: Uuid,
    input: MealInput,
) -> Result<(), ApiError> {
    let meal = Meal {
        id: Uuid::new_v4(),
        session_id,
        name: input.name,
        description: input.description,
        recorded_at: input.recorded_at,
        is_on_diet: input.is_on_diet,
        created_at: Utc::now(),
    };
    store.insert_meal(&meal).await?;
    Ok(())
}

/// Fetch one meal, enforcing ownership.
///
/// Absence and ownership mismatch both come back as [`ApiError::NotFound`].
pub async fn get_meal(
    store: &dyn MealStore,
    session_id: Uuid,
    meal_id: Uuid,
) -> Result<Meal, ApiError> {
    match store.find_meal_by_id(meal_id).await? {
        Some(meal) if meal.session_id == session_id => Ok(meal),
        _ => Err(ApiError::NotFound),
    }
}

/// Replace the mutable fields of an owned meal.
///
/// Identifier and owner are immutable; same `NotFound` semantics as
/// [`get_meal`].
pub async fn update_meal(
    store: &dyn MealStore,
    session_id: Uuid,
    meal_id: Uuid,
    input: MealInput,
) -> Result<(), ApiError> {
    let mut meal = get_meal(store, session_id, meal_id).await?;

    meal.name = input.name;
    meal.description = input.description;
    meal.recorded_at = input.recorded_at;
    meal.is_on_diet = input.is_on_diet;

    // The record can disappear between fetch and write; keep the signal
    // identical to the ownership check
    if !store.update_meal(&meal).await? {
        return Err(ApiError::NotFound);
    }
    Ok(())
}

/// Delete an owned meal, with the same `NotFound` semantics as [`get_meal`]
pub async fn delete_meal(
    store: &dyn MealStore,
    session_id: Uuid,
    meal_id: Uuid,
) -> Result<(), ApiError> {
    let meal = get_meal(store, session_id, meal_id).await?;

    if !store.delete_meal(meal.id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(())
}

/// All meals owned by `session_id`, most recent first.
///
/// Stable sort over the store's insertion order, so meals sharing a timestamp
/// keep a deterministic relative position.
pub async fn list_meals(store: &dyn MealStore, session_id: Uuid) -> Result<Vec<Meal>, ApiError> {
    let mut meals = store.list_meals_by_owner(session_id).await?;
    meals.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    Ok(meals)
}

/// Adherence summary over the owner's full meal set
pub async fn summarize(store: &dyn MealStore, session_id: Uuid) -> Result<DietSummary, ApiError> {
    let meals = store.list_meals_by_owner(session_id).await?;
    Ok(summary::summarize(&meals))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::database::MemoryStore;

    fn input(name: &str, at: DateTime<Utc>, on_diet: bool) -> MealInput {
        MealInput {
            name: name.to_string(),
            description: format!("{name} description"),
            recorded_at: at,
            is_on_diet: on_diet,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn owners_never_see_each_others_meals() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        create_meal(&store, alice, input("Breakfast", at(1, 8), true))
            .await
            .unwrap();
        create_meal(&store, bob, input("Lunch", at(1, 12), false))
            .await
            .unwrap();

        let alice_meals = list_meals(&store, alice).await.unwrap();
        assert_eq!(alice_meals.len(), 1);
        assert_eq!(alice_meals[0].name, "Breakfast");

        let bob_meals = list_meals(&store, bob).await.unwrap();
        assert_eq!(bob_meals.len(), 1);
        assert_eq!(bob_meals[0].name, "Lunch");
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        create_meal(&store, owner, input("Breakfast", at(1, 8), true))
            .await
            .unwrap();
        create_meal(&store, owner, input("Dinner", at(1, 21), true))
            .await
            .unwrap();
        create_meal(&store, owner, input("Lunch", at(1, 12), false))
            .await
            .unwrap();

        let names: Vec<_> = list_meals(&store, owner)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["Dinner", "Lunch", "Breakfast"]);
    }

    #[tokio::test]
    async fn foreign_and_missing_meals_are_indistinguishable() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        create_meal(&store, alice, input("Breakfast", at(1, 8), true))
            .await
            .unwrap();
        let alice_meal = list_meals(&store, alice).await.unwrap().remove(0);

        // Bob probing Alice's id and probing a random id must look the same
        let foreign = get_meal(&store, bob, alice_meal.id).await;
        let missing = get_meal(&store, bob, Uuid::new_v4()).await;
        assert!(matches!(foreign, Err(ApiError::NotFound)));
        assert!(matches!(missing, Err(ApiError::NotFound)));

        let foreign_update = update_meal(
            &store,
            bob,
            alice_meal.id,
            input("Hijacked", at(1, 9), false),
        )
        .await;
        assert!(matches!(foreign_update, Err(ApiError::NotFound)));

        let foreign_delete = delete_meal(&store, bob, alice_meal.id).await;
        assert!(matches!(foreign_delete, Err(ApiError::NotFound)));

        // Alice's record is untouched
        let still_there = get_meal(&store, alice, alice_meal.id).await.unwrap();
        assert_eq!(still_there.name, "Breakfast");
        assert!(still_there.is_on_diet);
    }

    #[tokio::test]
    async fn update_replaces_fields_but_not_identity() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        create_meal(&store, owner, input("Breakfast", at(1, 8), true))
            .await
            .unwrap();
        let meal = list_meals(&store, owner).await.unwrap().remove(0);

        update_meal(&store, owner, meal.id, input("Dinner", at(1, 21), false))
            .await
            .unwrap();

        let updated = get_meal(&store, owner, meal.id).await.unwrap();
        assert_eq!(updated.id, meal.id);
        assert_eq!(updated.session_id, owner);
        assert_eq!(updated.name, "Dinner");
        assert_eq!(updated.description, "Dinner description");
        assert_eq!(updated.recorded_at, at(1, 21));
        assert!(!updated.is_on_diet);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        create_meal(&store, owner, input("Breakfast", at(1, 8), true))
            .await
            .unwrap();
        let meal = list_meals(&store, owner).await.unwrap().remove(0);

        delete_meal(&store, owner, meal.id).await.unwrap();

        assert!(matches!(
            get_meal(&store, owner, meal.id).await,
            Err(ApiError::NotFound)
        ));
        assert!(list_meals(&store, owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn summary_matches_the_metrics_scenario() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        create_meal(&store, owner, input("Breakfast", at(1, 8), true))
            .await
            .unwrap();
        create_meal(&store, owner, input("Lunch", at(1, 12), false))
            .await
            .unwrap();
        create_meal(&store, owner, input("Snack", at(1, 17), true))
            .await
            .unwrap();
        create_meal(&store, owner, input("Dinner", at(1, 21), true))
            .await
            .unwrap();
        create_meal(&store, owner, input("Breakfast", at(2, 8), true))
            .await
            .unwrap();

        let summary = summarize(&store, owner).await.unwrap();
        assert_eq!(summary.total_meals, 5);
        assert_eq!(summary.total_meals_on_diet, 4);
        assert_eq!(summary.total_meals_off_diet, 1);
        assert_eq!(summary.best_on_diet_sequence, 3);
    }

    #[tokio::test]
    async fn summary_for_unknown_owner_is_all_zeros() {
        let store = MemoryStore::new();
        let summary = summarize(&store, Uuid::new_v4()).await.unwrap();
        assert_eq!(summary.total_meals, 0);
        assert_eq!(summary.best_on_diet_sequence, 0);
    }
}
