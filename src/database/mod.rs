//! # Database Module
//!
//! The record store behind the diet service. The [`MealStore`] trait is the
//! contract the core logic programs against; `connection` provides the
//! PostgreSQL implementation (tokio-postgres + deadpool) and `memory` an
//! in-process one used by the test suites and as a no-database fallback.

pub mod connection;
pub mod memory;
pub mod migrations;
pub mod models;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use connection::{DatabaseConfig, DatabaseConnection};
pub use memory::MemoryStore;
pub use models::{Meal, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write (duplicate user email)
    #[error("duplicate key")]
    DuplicateKey,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Operations the core requires of a record store.
///
/// Implementations return owner-filtered meals in insertion order and leave
/// timestamp ordering to the caller: listing wants newest-first while the
/// streak computation wants oldest-first, and the two views must stay
/// independent.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn insert_meal(&self, meal: &Meal) -> Result<(), StoreError>;

    async fn find_meal_by_id(&self, id: Uuid) -> Result<Option<Meal>, StoreError>;

    /// All meals owned by `session_id`, in insertion order
    async fn list_meals_by_owner(&self, session_id: Uuid) -> Result<Vec<Meal>, StoreError>;

    /// Replace the mutable fields of an existing meal; returns `false` when
    /// no record with that id exists
    async fn update_meal(&self, meal: &Meal) -> Result<bool, StoreError>;

    /// Returns `false` when no record with that id exists
    async fn delete_meal(&self, id: Uuid) -> Result<bool, StoreError>;
}
