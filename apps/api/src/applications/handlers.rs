use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::applications::repository;
use crate::auth::session::Session;
use crate::errors::AppError;
use crate::models::application::{ApplicantApplication, ApplicationStatus, EmployerApplication};
use crate::models::user::UserRole;
use crate::models::vacancy::VacancyStatus;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationListQuery {
    pub vacancy_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub vacancy_id: Uuid,
    pub resume_id: Option<Uuid>,
    #[serde(default)]
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Applicants see their own applications; employers see those on their vacancies.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApplicationList {
    Applicant(Vec<ApplicantApplication>),
    Employer(Vec<EmployerApplication>),
}

#[derive(Debug, Serialize)]
pub struct ApplicationCreatedResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdatedResponse {
    pub id: Uuid,
    pub status: ApplicationStatus,
}

/// Applications are only accepted on vacancies that exist and are still open.
pub fn ensure_open(vacancy_id: Uuid, stored_status: Option<&str>) -> Result<(), AppError> {
    let status = stored_status
        .ok_or_else(|| AppError::NotFound(format!("Vacancy {vacancy_id} not found")))?;
    match status.parse::<VacancyStatus>() {
        Ok(VacancyStatus::Active) => Ok(()),
        _ => Err(AppError::Validation(format!(
            "Vacancy {vacancy_id} is not accepting applications"
        ))),
    }
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Json<ApplicationList>, AppError> {
    let list = match session.user.user_type {
        UserRole::Applicant => ApplicationList::Applicant(
            repository::list_for_applicant(&state.db, session.user.id).await?,
        ),
        UserRole::Employer => ApplicationList::Employer(
            repository::list_for_employer(&state.db, session.user.id, query.vacancy_id).await?,
        ),
    };
    Ok(Json(list))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationCreatedResponse>), AppError> {
    session.require_role(UserRole::Applicant)?;

    let status = repository::vacancy_status(&state.db, req.vacancy_id).await?;
    ensure_open(req.vacancy_id, status.as_deref())?;

    if let Some(resume_id) = req.resume_id {
        let owner = repository::resume_owner(&state.db, resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
        if owner != session.user.id {
            return Err(AppError::Forbidden);
        }
    }

    let id = repository::insert_application(
        &state.db,
        req.vacancy_id,
        session.user.id,
        req.resume_id,
        req.cover_letter.trim(),
    )
    .await
    .map_err(|e| AppError::conflict_on_duplicate(e, "You have already applied to this vacancy"))?;
    info!("Applicant {} applied to vacancy {}", session.user.id, req.vacancy_id);

    Ok((
        StatusCode::CREATED,
        Json(ApplicationCreatedResponse {
            id,
            message: "Application sent".to_string(),
        }),
    ))
}

/// PUT /api/v1/applications/:id
pub async fn handle_update_application_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<StatusUpdatedResponse>, AppError> {
    session.require_role(UserRole::Employer)?;
    let status: ApplicationStatus = req.status.parse().map_err(AppError::Validation)?;

    let employer = repository::application_employer(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    if employer != session.user.id {
        return Err(AppError::Forbidden);
    }

    repository::update_status(&state.db, id, status).await?;
    info!("Employer {} set application {id} to {status}", session.user.id);

    Ok(Json(StatusUpdatedResponse { id, status }))
}
