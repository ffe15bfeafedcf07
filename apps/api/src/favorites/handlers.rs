use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::session::Session;
use crate::errors::AppError;
use crate::favorites::repository::{self, FavoriteVacancy};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub vacancy_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct FavoriteCreatedResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FavoriteRemovedResponse {
    pub removed: bool,
    pub message: String,
}

/// GET /api/v1/favorites
pub async fn handle_list_favorites(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<FavoriteVacancy>>, AppError> {
    Ok(Json(repository::list_favorites(&state.db, session.user.id).await?))
}

/// POST /api/v1/favorites
pub async fn handle_add_favorite(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteCreatedResponse>), AppError> {
    if !repository::vacancy_exists(&state.db, req.vacancy_id).await? {
        return Err(AppError::NotFound(format!("Vacancy {} not found", req.vacancy_id)));
    }

    let id = repository::add_favorite(&state.db, session.user.id, req.vacancy_id)
        .await
        .map_err(|e| AppError::conflict_on_duplicate(e, "Vacancy is already in favorites"))?;
    info!("User {} favorited vacancy {}", session.user.id, req.vacancy_id);

    Ok((
        StatusCode::CREATED,
        Json(FavoriteCreatedResponse {
            id,
            message: "Added to favorites".to_string(),
        }),
    ))
}

/// DELETE /api/v1/favorites/:vacancy_id
///
/// Idempotent: removing a vacancy that is not a favorite still succeeds.
pub async fn handle_remove_favorite(
    State(state): State<AppState>,
    session: Session,
    Path(vacancy_id): Path<Uuid>,
) -> Result<Json<FavoriteRemovedResponse>, AppError> {
    let removed = repository::remove_favorite(&state.db, session.user.id, vacancy_id).await?;
    Ok(Json(FavoriteRemovedResponse {
        removed,
        message: "Removed from favorites".to_string(),
    }))
}
