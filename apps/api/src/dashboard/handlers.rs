use axum::{extract::State, Json};

use crate::applications::repository as applications;
use crate::auth::session::Session;
use crate::dashboard::summary::{
    summarize_applicant, summarize_employer, ApplicantDashboard, EmployerDashboard,
};
use crate::errors::AppError;
use crate::favorites::repository as favorites;
use crate::models::user::UserRole;
use crate::state::AppState;
use crate::vacancies::repository as vacancies;

/// GET /api/v1/dashboard/applicant
pub async fn handle_applicant_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ApplicantDashboard>, AppError> {
    session.require_role(UserRole::Applicant)?;

    let applications = applications::list_for_applicant(&state.db, session.user.id).await?;
    let favorite_count = favorites::count_favorites(&state.db, session.user.id).await?;

    Ok(Json(summarize_applicant(
        applications.iter().map(|a| a.status.as_str()),
        usize::try_from(favorite_count).unwrap_or_default(),
    )))
}

/// GET /api/v1/dashboard/employer
///
/// Covers every vacancy the employer owns, open or closed.
pub async fn handle_employer_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<EmployerDashboard>, AppError> {
    session.require_role(UserRole::Employer)?;

    let owned = vacancies::list_vacancies(&state.db, None, Some(session.user.id)).await?;
    let applications = applications::list_for_employer(&state.db, session.user.id, None).await?;

    Ok(Json(summarize_employer(
        &owned,
        applications.iter().map(|a| a.status.as_str()),
    )))
}
