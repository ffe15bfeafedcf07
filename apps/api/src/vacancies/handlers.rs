use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::session::Session;
use crate::errors::AppError;
use crate::models::user::UserRole;
use crate::models::vacancy::{Vacancy, VacancyInput, VacancyStatus};
use crate::state::AppState;
use crate::vacancies::browser::VacancyBrowser;
use crate::vacancies::criteria::{is_any_sentinel, VacancyQuery};
use crate::vacancies::repository;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `None` means every status; an absent parameter means active vacancies only.
pub fn status_filter(raw: Option<&str>) -> Result<Option<VacancyStatus>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Some(VacancyStatus::Active)),
        Some(raw) if is_any_sentinel(raw) => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(AppError::Validation),
    }
}

/// GET /api/v1/vacancies
///
/// Loads the snapshot from Postgres, then narrows it with the query's filter criteria.
pub async fn handle_list_vacancies(
    State(state): State<AppState>,
    Query(query): Query<VacancyQuery>,
) -> Result<Json<Vec<Vacancy>>, AppError> {
    let status = status_filter(query.status.as_deref())?;
    let snapshot = repository::list_vacancies(&state.db, status, query.employer_id).await?;
    let browser = VacancyBrowser::with_criteria(snapshot, query.criteria());
    Ok(Json(browser.into_visible()))
}

/// GET /api/v1/vacancies/:id
pub async fn handle_get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vacancy>, AppError> {
    let vacancy = repository::view_vacancy(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vacancy {id} not found")))?;
    Ok(Json(vacancy))
}

/// POST /api/v1/vacancies
pub async fn handle_create_vacancy(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<VacancyInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    session.require_role(UserRole::Employer)?;
    let input = input.normalized().map_err(AppError::Validation)?;

    let id = repository::insert_vacancy(&state.db, session.user.id, &input).await?;
    info!("Employer {} created vacancy {id}", session.user.id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Vacancy created".to_string(),
        }),
    ))
}

/// PUT /api/v1/vacancies/:id
pub async fn handle_update_vacancy(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(input): Json<VacancyInput>,
) -> Result<Json<MessageResponse>, AppError> {
    session.require_role(UserRole::Employer)?;
    let input = input.normalized().map_err(AppError::Validation)?;

    let owner = repository::find_owner(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vacancy {id} not found")))?;
    if owner != session.user.id {
        return Err(AppError::Forbidden);
    }

    repository::update_vacancy(&state.db, id, &input).await?;
    info!("Employer {} updated vacancy {id} ({})", session.user.id, input.status);

    Ok(Json(MessageResponse {
        message: "Vacancy updated".to_string(),
    }))
}
