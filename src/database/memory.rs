//! In-process record store.
//!
//! Keeps users and meals in plain `Vec`s behind a `parking_lot` lock, which
//! makes insertion order implicit. Used by the test suites and as a fallback
//! when the server is started without a configured database.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::database::models::{Meal, User};
use crate::database::{MealStore, StoreError};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    meals: Vec<Meal>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateKey);
        }
        inner.users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_meal(&self, meal: &Meal) -> Result<(), StoreError> {
        self.inner.write().meals.push(meal.clone());
        Ok(())
    }

    async fn find_meal_by_id(&self, id: Uuid) -> Result<Option<Meal>, StoreError> {
        let inner = self.inner.read();
        Ok(inner.meals.iter().find(|m| m.id == id).cloned())
    }

    async fn list_meals_by_owner(&self, session_id: Uuid) -> Result<Vec<Meal>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .meals
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn update_meal(&self, meal: &Meal) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        match inner.meals.iter_mut().find(|m| m.id == meal.id) {
            Some(slot) => {
                // Replace in place so the record keeps its insertion slot
                *slot = meal.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_meal(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        let before = inner.meals.len();
        inner.meals.retain(|m| m.id != id);
        Ok(inner.meals.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn meal(session_id: Uuid, name: &str) -> Meal {
        Meal {
            id: Uuid::new_v4(),
            session_id,
            name: name.to_string(),
            description: String::new(),
            recorded_at: Utc::now(),
            is_on_diet: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn meals_come_back_in_insertion_order() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        for name in ["first", "second", "third"] {
            store.insert_meal(&meal(owner, name)).await.unwrap();
        }

        let listed = store.list_meals_by_owner(owner).await.unwrap();
        let names: Vec<_> = listed.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        let user = User {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            password: "secret".to_string(),
            created_at: Utc::now(),
        };

        store.insert_user(&user).await.unwrap();

        let again = User {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            ..user
        };
        assert!(matches!(
            store.insert_user(&again).await,
            Err(StoreError::DuplicateKey)
        ));
    }
}
