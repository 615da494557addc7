//! Meal routes: CRUD, listing, and the adherence summary.
//!
//! Everything under `/meals` sits behind [`session::require_session`]; the
//! handlers read the resolved owner key from request extensions and never
//! touch the cookie themselves.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router, middleware};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::AppState;
use crate::services::meals::{self, MealInput};
use crate::services::summary::DietSummary;
use crate::session::{self, Session};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    pub name: String,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
    pub is_on_diet: bool,
}

impl MealRequest {
    fn into_input(self) -> Result<MealInput, ApiError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::Validation("name must not be empty".to_string()));
        }
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(ApiError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        Ok(MealInput {
            name,
            description,
            recorded_at: self.recorded_at,
            is_on_diet: self.is_on_diet,
        })
    }
}

/// POST /meals
pub async fn create_meal(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(payload): Json<MealRequest>,
) -> Result<StatusCode, ApiError> {
    meals::create_meal(state.store.as_ref(), session.id, payload.into_input()?).await?;
    Ok(StatusCode::CREATED)
}

/// GET /meals
pub async fn list_meals(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, ApiError> {
    let meals = meals::list_meals(state.store.as_ref(), session.id).await?;
    Ok(Json(json!({ "meals": meals })))
}

/// GET /meals/{id}
pub async fn get_meal(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let meal = meals::get_meal(state.store.as_ref(), session.id, id).await?;
    Ok(Json(json!({ "meal": meal })))
}

/// PUT /meals/{id}
pub async fn update_meal(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MealRequest>,
) -> Result<StatusCode, ApiError> {
    meals::update_meal(state.store.as_ref(), session.id, id, payload.into_input()?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /meals/{id}
pub async fn delete_meal(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    meals::delete_meal(state.store.as_ref(), session.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /meals/summary
pub async fn summary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<DietSummary>, ApiError> {
    let summary = meals::summarize(state.store.as_ref(), session.id).await?;
    Ok(Json(summary))
}

pub fn create_meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/summary", get(summary))
        .route(
            "/meals/{id}",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
        .layer(middleware::from_fn(session::require_session))
}
