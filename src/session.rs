//! Session resolution and the owner-key cookie contract.
//!
//! Every meal a user records is bound to an opaque session identifier, minted
//! once at registration and presented back through the `sessionId` cookie.
//! The token is the sole ownership key: it is never validated against the
//! user table, because owner-filtered queries simply come back empty for
//! unknown tokens.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::config::CONFIG;
use crate::error::ApiError;

/// Name of the cookie carrying the owner key
pub const SESSION_COOKIE: &str = "sessionId";

/// Owner key injected into request extensions by [`require_session`]
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub id: Uuid,
}

/// Mint a fresh owner key (128-bit random, collision probability negligible)
pub fn mint_session_id() -> Uuid {
    Uuid::new_v4()
}

/// Read the owner key from the presented cookies, if any.
///
/// A cookie that does not parse as a UUID is treated as absent.
pub fn session_from_jar(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
}

/// Build the `sessionId` cookie handed back to a newly registered caller
pub fn session_cookie(session_id: Uuid) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, session_id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::days(CONFIG.session.cookie_max_age_days));
    cookie
}

/// Middleware guarding the meal routes.
///
/// Extracts the `sessionId` cookie, parses it into an owner key, and injects
/// a [`Session`] into request extensions for downstream handlers. Requests
/// without a usable cookie are rejected with 401 before reaching any handler.
pub async fn require_session(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());

    let session_id = match session_from_jar(&jar) {
        Some(id) => id,
        None => {
            tracing::warn!("Missing or malformed {} cookie", SESSION_COOKIE);
            return Err(ApiError::Unauthorized);
        }
    };

    req.extensions_mut().insert(Session { id: session_id });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_ids_are_unique() {
        let a = mint_session_id();
        let b = mint_session_id();
        assert_ne!(a, b);
    }

    #[test]
    fn jar_roundtrip() {
        let id = mint_session_id();
        let jar = CookieJar::new().add(session_cookie(id));
        assert_eq!(session_from_jar(&jar), Some(id));
    }

    #[test]
    fn garbage_cookie_is_treated_as_absent() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "not-a-uuid"));
        assert_eq!(session_from_jar(&jar), None);
    }
}
