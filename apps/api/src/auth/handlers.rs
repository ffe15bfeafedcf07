use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{generate_session_token, hash_password, verify_password};
use crate::auth::repository;
use crate::auth::session::Session;
use crate::errors::AppError;
use crate::models::user::{UserProfile, UserRole, UserRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    pub user_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub session_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_registration(req: RegisterRequest) -> Result<NewUser, AppError> {
    let email = normalize_email(&req.email);
    let full_name = req.full_name.trim().to_string();
    if email.is_empty() || req.password.is_empty() || full_name.is_empty() {
        return Err(AppError::Validation(
            "email, password and full_name are required".to_string(),
        ));
    }
    let role = match req.user_type.as_deref() {
        None => UserRole::Applicant,
        Some(raw) => raw.parse::<UserRole>().map_err(AppError::Validation)?,
    };
    Ok(NewUser {
        email,
        password: req.password,
        full_name,
        role,
    })
}

/// The row values a profile update resolves to.
#[derive(Debug, PartialEq)]
pub struct ProfileChanges {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
}

/// Applies a partial profile update to the stored user. Changing the
/// password requires the current one.
pub fn resolve_profile_update(
    current: &UserRow,
    update: ProfileUpdateRequest,
) -> Result<ProfileChanges, AppError> {
    let email = match update.email {
        Some(email) => {
            let email = normalize_email(&email);
            if email.is_empty() {
                return Err(AppError::Validation("email cannot be empty".to_string()));
            }
            email
        }
        None => current.email.clone(),
    };

    let full_name = match update.full_name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("full_name cannot be empty".to_string()));
            }
            name
        }
        None => current.full_name.clone(),
    };

    let password_hash = match update.new_password.filter(|p| !p.is_empty()) {
        Some(new_password) => {
            let current_password = update.current_password.unwrap_or_default();
            if !verify_password(&current_password, &current.password_hash) {
                return Err(AppError::Validation(
                    "current_password is incorrect".to_string(),
                ));
            }
            hash_password(&new_password)
        }
        None => current.password_hash.clone(),
    };

    Ok(ProfileChanges {
        email,
        full_name,
        password_hash,
    })
}

fn to_profile(row: UserRow) -> Result<UserProfile, AppError> {
    UserProfile::try_from(row).map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt user row: {e}")))
}

async fn open_session(state: &AppState, user: &UserProfile) -> Result<String, AppError> {
    let token = generate_session_token();
    let expires_at = Utc::now() + Duration::days(state.config.session_ttl_days);
    repository::insert_session(&state.db, user.id, &token, expires_at).await?;
    Ok(token)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let new_user = validate_registration(req)?;

    let row = repository::insert_user(
        &state.db,
        &new_user.email,
        &hash_password(&new_user.password),
        &new_user.full_name,
        new_user.role,
    )
    .await
    .map_err(|e| AppError::conflict_on_duplicate(e, "A user with this email already exists"))?;

    let user = to_profile(row)?;
    let session_token = open_session(&state, &user).await?;
    info!("Registered {} account {}", user.user_type, user.id);

    Ok(Json(AuthResponse {
        success: true,
        session_token,
        user,
    }))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let row = repository::find_user_by_email(&state.db, &email)
        .await?
        .filter(|row| verify_password(&req.password, &row.password_hash))
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    let user = to_profile(row)?;
    let session_token = open_session(&state, &user).await?;
    info!("User {} logged in", user.id);

    Ok(Json(AuthResponse {
        success: true,
        session_token,
        user,
    }))
}

/// GET /api/v1/auth/session
pub async fn handle_verify_session(session: Session) -> Json<SessionResponse> {
    Json(SessionResponse {
        success: true,
        user: session.user,
    })
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<LogoutResponse>, AppError> {
    repository::expire_session(&state.db, &session.token).await?;
    info!("User {} logged out", session.user.id);
    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(session: Session) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        success: true,
        profile: session.user,
    })
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<ProfileUpdateRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let current = repository::find_user_by_id(&state.db, session.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.user.id)))?;

    let changes = resolve_profile_update(&current, update)?;
    let row = repository::update_user(
        &state.db,
        current.id,
        &changes.email,
        &changes.full_name,
        &changes.password_hash,
    )
    .await
    .map_err(|e| AppError::conflict_on_duplicate(e, "A user with this email already exists"))?;

    info!("Profile updated for user {}", row.id);
    Ok(Json(ProfileResponse {
        success: true,
        profile: to_profile(row)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn register(email: &str, password: &str, name: &str, user_type: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: name.to_string(),
            user_type: user_type.map(str::to_string),
        }
    }

    fn stored_user() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "anna@example.com".to_string(),
            password_hash: hash_password("old-pass"),
            full_name: "Anna".to_string(),
            user_type: "applicant".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_registration_normalizes_email_and_defaults_role() {
        let user = validate_registration(register("  Anna@Example.COM ", "pw", " Anna ", None)).unwrap();
        assert_eq!(user.email, "anna@example.com");
        assert_eq!(user.full_name, "Anna");
        assert_eq!(user.role, UserRole::Applicant);
    }

    #[test]
    fn test_registration_accepts_legacy_company_role() {
        let user = validate_registration(register("hr@corp.ru", "pw", "HR", Some("company"))).unwrap();
        assert_eq!(user.role, UserRole::Employer);
    }

    #[test]
    fn test_registration_rejects_missing_fields_and_bad_role() {
        assert!(matches!(
            validate_registration(register("", "pw", "A", None)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_registration(register("a@b.c", "pw", "A", Some("admin"))),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_profile_update_keeps_unchanged_fields() {
        let current = stored_user();
        let changes = resolve_profile_update(
            &current,
            ProfileUpdateRequest {
                full_name: Some("Anna K".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(changes.full_name, "Anna K");
        assert_eq!(changes.email, current.email);
        assert_eq!(changes.password_hash, current.password_hash);
    }

    #[test]
    fn test_password_change_requires_current_password() {
        let current = stored_user();
        let wrong = resolve_profile_update(
            &current,
            ProfileUpdateRequest {
                current_password: Some("nope".to_string()),
                new_password: Some("new-pass".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(wrong, Err(AppError::Validation(_))));

        let right = resolve_profile_update(
            &current,
            ProfileUpdateRequest {
                current_password: Some("old-pass".to_string()),
                new_password: Some("new-pass".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(verify_password("new-pass", &right.password_hash));
    }

    #[test]
    fn test_empty_new_password_is_ignored() {
        let current = stored_user();
        let changes = resolve_profile_update(
            &current,
            ProfileUpdateRequest {
                new_password: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(changes.password_hash, current.password_hash);
    }
}
