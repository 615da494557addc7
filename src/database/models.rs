//! Record types stored by the diet service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

/// Trait for converting from tokio-postgres Row
pub trait FromRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error>
    where
        Self: Sized;
}

/// Registered user account.
///
/// `session_id` is the owner key handed out at registration; it is assigned
/// once and never changes. The password is stored as received - credential
/// hardening is handled outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A recorded meal.
///
/// `id` and `session_id` are immutable once inserted; name, description,
/// recorded timestamp and the on-diet flag may be replaced in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub description: String,
    /// Caller-supplied date+time the meal was eaten
    pub recorded_at: DateTime<Utc>,
    pub is_on_diet: bool,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Meal {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            recorded_at: row.try_get("recorded_at")?,
            is_on_diet: row.try_get("is_on_diet")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
