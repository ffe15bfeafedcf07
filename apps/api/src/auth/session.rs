//! Explicit session context.
//!
//! Handlers that need an authenticated caller take a [`Session`] argument;
//! the extractor resolves the bearer token against `user_sessions` once per
//! request and hands the handler the token together with the user profile.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};

use crate::auth::repository;
use crate::errors::AppError;
use crate::models::user::{UserProfile, UserRole};
use crate::state::AppState;

/// Checked in order. The two `x-` headers are aliases still sent by older clients.
const TOKEN_HEADERS: &[&str] = &["authorization", "x-session-token", "x-authorization"];

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn require_role(&self, role: UserRole) -> Result<(), AppError> {
        if self.user.user_type == role {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Pulls the session token out of the request headers, accepting either
/// `Authorization: Bearer <token>` or one of the legacy headers.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    TOKEN_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(strip_bearer)
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    match (value.get(..6), value.get(6..)) {
        (Some(scheme), Some(rest))
            if scheme.eq_ignore_ascii_case("bearer")
                && (rest.is_empty() || rest.starts_with(char::is_whitespace)) =>
        {
            rest.trim()
        }
        _ => value,
    }
}

pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at <= now
}

/// Resolves a token to its user, rejecting unknown and expired sessions.
pub async fn resolve(state: &AppState, token: String) -> Result<Session, AppError> {
    let row = repository::find_session(&state.db, &token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid session token".to_string()))?;

    if is_expired(row.expires_at, Utc::now()) {
        return Err(AppError::Unauthorized("Session expired".to_string()));
    }

    let user = UserProfile::try_from(row.user)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt user row: {e}")))?;

    Ok(Session { token, user })
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Session token not provided".to_string()))?;
        resolve(state, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Duration;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_bearer_token_extracted() {
        let map = headers(&[("authorization", "Bearer abc123")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_legacy_headers_accepted() {
        let map = headers(&[("x-session-token", "tok")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("tok"));

        let map = headers(&[("x-authorization", "Bearer tok2")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("tok2"));
    }

    #[test]
    fn test_authorization_wins_over_legacy() {
        let map = headers(&[("authorization", "Bearer primary"), ("x-session-token", "legacy")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("primary"));
    }

    #[test]
    fn test_empty_bearer_falls_through() {
        let map = headers(&[("authorization", "Bearer "), ("x-session-token", "legacy")]);
        assert_eq!(token_from_headers(&map).as_deref(), Some("legacy"));
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        assert!(is_expired(now, now));
        assert!(is_expired(now - Duration::seconds(1), now));
        assert!(!is_expired(now + Duration::days(30), now));
    }
}
