//! PostgreSQL connection management.
//!
//! Connection pooling with tokio-postgres and deadpool, plus the [`MealStore`]
//! implementation that backs the service in production.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::database::models::{FromRow, Meal, User};
use crate::database::{MealStore, StoreError};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub max_size: usize,
    pub timeouts: deadpool_postgres::Timeouts,
}

impl DatabaseConfig {
    /// Create configuration from a database URL
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = url::Url::parse(url).context("Failed to parse database URL")?;

        if parsed.scheme() != "postgresql" && parsed.scheme() != "postgres" {
            anyhow::bail!("Invalid database URL scheme, expected postgresql or postgres");
        }

        Ok(Self {
            host: parsed.host_str().unwrap_or("localhost").to_string(),
            port: parsed.port().unwrap_or(5432),
            user: parsed.username().to_string(),
            password: parsed.password().unwrap_or("").to_string(),
            dbname: parsed.path().trim_start_matches('/').to_string(),
            max_size: 16,
            timeouts: deadpool_postgres::Timeouts {
                wait: Some(Duration::from_secs(30)),
                create: Some(Duration::from_secs(30)),
                recycle: Some(Duration::from_secs(30)),
            },
        })
    }
}

/// Database connection wrapper
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: Pool,
}

impl DatabaseConnection {
    /// Create a new database connection with the provided configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let masked_host = format!("{}:{}/{}", config.host, config.port, config.dbname);
        tracing::info!("🔌 Connecting to database: {}", masked_host);

        let mut pg_config = tokio_postgres::Config::new();
        pg_config.host(&config.host);
        pg_config.port(config.port);
        pg_config.user(&config.user);
        pg_config.password(&config.password);
        pg_config.dbname(&config.dbname);

        let tls_connector = TlsConnector::builder()
            .build()
            .context("Failed to build TLS connector")?;
        let tls = MakeTlsConnector::new(tls_connector);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, tls, mgr_config);

        let pool = Pool::builder(mgr)
            .max_size(config.max_size)
            .wait_timeout(config.timeouts.wait)
            .create_timeout(config.timeouts.create)
            .recycle_timeout(config.timeouts.recycle)
            .runtime(deadpool_postgres::Runtime::Tokio1)
            .build()
            .context("Failed to create database pool")?;

        // Test the connection
        let client = pool
            .get()
            .await
            .context("Failed to get connection from pool")?;
        client
            .query("SELECT 1", &[])
            .await
            .context("Failed to test database connection")?;

        tracing::info!("✅ Database connection established successfully");

        Ok(Self { pool })
    }

    /// Create connection from database URL
    pub async fn from_url(url: &str) -> Result<Self> {
        let config = DatabaseConfig::from_url(url)?;
        Self::new(config).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    async fn client(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.context("Failed to get DB connection")
    }
}

#[async_trait]
impl MealStore for DatabaseConnection {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let client = self.client().await?;
        let result = client
            .execute(
                "INSERT INTO users (id, session_id, name, email, password, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
                &[
                    &user.id,
                    &user.session_id,
                    &user.name,
                    &user.email,
                    &user.password,
                    &user.created_at,
                ],
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => {
                Err(StoreError::DuplicateKey)
            }
            Err(e) => Err(StoreError::Other(
                anyhow::Error::new(e).context("Failed to insert user"),
            )),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let client = self.client().await?;
        let row = client
            .query_opt("SELECT * FROM users WHERE email = $1", &[&email])
            .await
            .context("Failed to query user by email")?;
        Ok(row
            .map(|r| User::from_row(&r))
            .transpose()
            .context("Failed to decode user row")?)
    }

    async fn insert_meal(&self, meal: &Meal) -> Result<(), StoreError> {
        let client = self.client().await?;
        client
            .execute(
                "INSERT INTO meals (id, session_id, name, description, recorded_at, is_on_diet, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
                &[
                    &meal.id,
                    &meal.session_id,
                    &meal.name,
                    &meal.description,
                    &meal.recorded_at,
                    &meal.is_on_diet,
                    &meal.created_at,
                ],
            )
            .await
            .context("Failed to insert meal")?;
        Ok(())
    }

    async fn find_meal_by_id(&self, id: Uuid) -> Result<Option<Meal>, StoreError> {
        let client = self.client().await?;
        let row = client
            .query_opt("SELECT * FROM meals WHERE id = $1", &[&id])
            .await
            .context("Failed to query meal by id")?;
        Ok(row
            .map(|r| Meal::from_row(&r))
            .transpose()
            .context("Failed to decode meal row")?)
    }

    async fn list_meals_by_owner(&self, session_id: Uuid) -> Result<Vec<Meal>, StoreError> {
        let client = self.client().await?;
        // created_at/id ordering reproduces insertion order across runs;
        // timestamp ordering is left to the caller
        let rows = client
            .query(
                "SELECT * FROM meals WHERE session_id = $1 ORDER BY created_at, id",
                &[&session_id],
            )
            .await
            .context("Failed to query meals by owner")?;
        Ok(rows
            .iter()
            .map(Meal::from_row)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to decode meal rows")?)
    }

    async fn update_meal(&self, meal: &Meal) -> Result<bool, StoreError> {
        let client = self.client().await?;
        let n = client
            .execute(
                "UPDATE meals SET name = $1, description = $2, recorded_at = $3, is_on_diet = $4 \
                 WHERE id = $5",
                &[
                    &meal.name,
                    &meal.description,
                    &meal.recorded_at,
                    &meal.is_on_diet,
                    &meal.id,
                ],
            )
            .await
            .context("Failed to update meal")?;
        Ok(n > 0)
    }

    async fn delete_meal(&self, id: Uuid) -> Result<bool, StoreError> {
        let client = self.client().await?;
        let n = client
            .execute("DELETE FROM meals WHERE id = $1", &[&id])
            .await
            .context("Failed to delete meal")?;
        Ok(n > 0)
    }
}
