pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::dashboard::handlers as dashboard;
use crate::favorites::handlers as favorites;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::vacancies::handlers as vacancies;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth & profile
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/session", get(auth::handle_verify_session))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route(
            "/api/v1/profile",
            get(auth::handle_get_profile).put(auth::handle_update_profile),
        )
        // Vacancies
        .route(
            "/api/v1/vacancies",
            get(vacancies::handle_list_vacancies).post(vacancies::handle_create_vacancy),
        )
        .route(
            "/api/v1/vacancies/:id",
            get(vacancies::handle_get_vacancy).put(vacancies::handle_update_vacancy),
        )
        // Resumes
        .route("/api/v1/resumes", post(resumes::handle_create_resume))
        .route("/api/v1/resumes/me", get(resumes::handle_get_my_resume))
        .route(
            "/api/v1/resumes/:id",
            put(resumes::handle_update_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/sections",
            patch(resumes::handle_edit_section),
        )
        // Favorites
        .route(
            "/api/v1/favorites",
            get(favorites::handle_list_favorites).post(favorites::handle_add_favorite),
        )
        .route(
            "/api/v1/favorites/:vacancy_id",
            axum::routing::delete(favorites::handle_remove_favorite),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications).post(applications::handle_create_application),
        )
        .route(
            "/api/v1/applications/:id",
            put(applications::handle_update_application_status),
        )
        // Dashboards
        .route(
            "/api/v1/dashboard/applicant",
            get(dashboard::handle_applicant_dashboard),
        )
        .route(
            "/api/v1/dashboard/employer",
            get(dashboard::handle_employer_dashboard),
        )
        .with_state(state)
}
