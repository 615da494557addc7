//! User registration.

use chrono::Utc;
use uuid::Uuid;

use crate::database::{MealStore, StoreError, User};
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register a new user under the caller's owner key.
///
/// Emails are unique across all users. The lookup-then-insert pair is not
/// atomic; the unique constraint catches the race and reports the same
/// [`ApiError::DuplicateEmail`].
pub async fn register_user(
    store: &dyn MealStore,
    session_id: Uuid,
    new_user: NewUser,
) -> Result<(), ApiError> {
    if store.find_user_by_email(&new_user.email).await?.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let user = User {
        id: Uuid::new_v4(),
        session_id,
        name: new_user.name,
        email: new_user.email,
        password: new_user.password,
        created_at: Utc::now(),
    };

    match store.insert_user(&user).await {
        Ok(()) => Ok(()),
        Err(StoreError::DuplicateKey) => Err(ApiError::DuplicateEmail),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn distinct_emails_register_independently() {
        let store = MemoryStore::new();

        register_user(&store, Uuid::new_v4(), new_user("a@example.com"))
            .await
            .unwrap();
        register_user(&store, Uuid::new_v4(), new_user("b@example.com"))
            .await
            .unwrap();

        assert!(
            store
                .find_user_by_email("a@example.com")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .find_user_by_email("b@example.com")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn second_registration_with_same_email_fails() {
        let store = MemoryStore::new();

        register_user(&store, Uuid::new_v4(), new_user("a@example.com"))
            .await
            .unwrap();
        let second = register_user(&store, Uuid::new_v4(), new_user("a@example.com")).await;

        assert!(matches!(second, Err(ApiError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn session_key_is_attached_to_the_record() {
        let store = MemoryStore::new();
        let session_id = Uuid::new_v4();

        register_user(&store, session_id, new_user("a@example.com"))
            .await
            .unwrap();

        let user = store
            .find_user_by_email("a@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.session_id, session_id);
        assert_eq!(user.name, "Test User");
    }
}
