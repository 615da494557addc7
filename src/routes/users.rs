//! User registration routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::AppState;
use crate::services::users::{self, NewUser};
use crate::session;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /users
///
/// Registers a user. When the caller presents no `sessionId` cookie a fresh
/// owner key is minted and handed back as a Set-Cookie; an existing cookie is
/// reused verbatim so the new account shares the caller's meal history.
pub async fn create_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    let email = payload.email.trim().to_lowercase();
    if !is_plausible_email(&email) {
        return Err(ApiError::Validation("invalid email address".to_string()));
    }

    let (session_id, minted) = match session::session_from_jar(&jar) {
        Some(id) => (id, false),
        None => (session::mint_session_id(), true),
    };

    users::register_user(
        state.store.as_ref(),
        session_id,
        NewUser {
            name,
            email,
            password: payload.password,
        },
    )
    .await?;

    let jar = if minted {
        jar.add(session::session_cookie(session_id))
    } else {
        jar
    };

    Ok((jar, StatusCode::CREATED))
}

// Schema-level validation lives with the transport; the wider ecosystem of
// address verification (MX lookups etc.) is out of scope
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

pub fn create_user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user))
}
