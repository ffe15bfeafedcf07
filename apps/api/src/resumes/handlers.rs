use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::session::Session;
use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeFields, ResumeInput, ResumeRow};
use crate::models::user::UserProfile;
use crate::resumes::editor::SectionEdit;
use crate::resumes::repository;
use crate::state::AppState;

pub const DEFAULT_RESUME_TITLE: &str = "Моё резюме";

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub success: bool,
    pub resume: ResumeDocument,
}

#[derive(Debug, Serialize)]
pub struct ResumeCreatedResponse {
    pub success: bool,
    pub resume_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Fills blank title / name / email from the defaults and the account owner.
pub fn with_defaults(mut fields: ResumeFields, owner: &UserProfile) -> ResumeFields {
    fn blank(value: &Option<String>) -> bool {
        value.as_deref().map_or(true, |v| v.trim().is_empty())
    }

    if blank(&fields.title) {
        fields.title = Some(DEFAULT_RESUME_TITLE.to_string());
    }
    if blank(&fields.full_name) {
        fields.full_name = Some(owner.full_name.clone());
    }
    if blank(&fields.email) {
        fields.email = Some(owner.email.clone());
    }
    fields
}

/// 404 for a missing resume, 403 when it belongs to someone else.
pub fn ensure_owner(resume: Option<ResumeRow>, id: Uuid, user_id: Uuid) -> Result<ResumeRow, AppError> {
    let resume = resume.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    if resume.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(resume)
}

async fn owned_resume(state: &AppState, session: &Session, id: Uuid) -> Result<ResumeRow, AppError> {
    let resume = repository::find_resume(&state.db, id).await?;
    ensure_owner(resume, id, session.user.id)
}

/// GET /api/v1/resumes/me
pub async fn handle_get_my_resume(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = repository::latest_for_user(&state.db, session.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    let mut conn = state.db.acquire().await?;
    let sections = repository::load_sections(&mut conn, resume.id).await?;

    Ok(Json(ResumeResponse {
        success: true,
        resume: ResumeDocument { resume, sections },
    }))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<ResumeInput>,
) -> Result<Json<ResumeCreatedResponse>, AppError> {
    let fields = with_defaults(input.fields, &session.user);

    let mut tx = state.db.begin().await?;
    let resume = repository::insert_resume(&mut tx, session.user.id, &fields).await?;
    repository::replace_sections(&mut tx, resume.id, &input.sections).await?;
    tx.commit().await?;

    info!("User {} created resume {}", session.user.id, resume.id);
    Ok(Json(ResumeCreatedResponse {
        success: true,
        resume_id: resume.id,
    }))
}

/// PUT /api/v1/resumes/:id
///
/// Full replacement: header fields and every section are overwritten.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(input): Json<ResumeInput>,
) -> Result<Json<SuccessResponse>, AppError> {
    owned_resume(&state, &session, id).await?;
    let fields = with_defaults(input.fields, &session.user);

    let mut tx = state.db.begin().await?;
    repository::update_header(&mut tx, id, &fields).await?;
    repository::replace_sections(&mut tx, id, &input.sections).await?;
    tx.commit().await?;

    info!("User {} updated resume {id}", session.user.id);
    Ok(Json(SuccessResponse { success: true }))
}

/// PATCH /api/v1/resumes/:id/sections
///
/// Applies one append / remove / replace edit and returns the updated resume.
pub async fn handle_edit_section(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(edit): Json<SectionEdit>,
) -> Result<Json<ResumeResponse>, AppError> {
    // Lock, read, edit and write in one transaction so concurrent edits queue up.
    let mut tx = state.db.begin().await?;
    let locked = repository::lock_resume(&mut tx, id).await?;
    ensure_owner(locked, id, session.user.id)?;

    let mut sections = repository::load_sections(&mut tx, id).await?;
    sections
        .apply(edit)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    repository::replace_sections(&mut tx, id, &sections).await?;
    let resume = repository::touch(&mut tx, id).await?;
    tx.commit().await?;

    Ok(Json(ResumeResponse {
        success: true,
        resume: ResumeDocument { resume, sections },
    }))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    owned_resume(&state, &session, id).await?;
    repository::delete_resume(&state.db, id).await?;
    info!("User {} deleted resume {id}", session.user.id);
    Ok(Json(SuccessResponse { success: true }))
}
