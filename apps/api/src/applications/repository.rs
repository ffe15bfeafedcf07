use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::{ApplicantApplication, ApplicationStatus, EmployerApplication};

pub async fn list_for_applicant(
    pool: &PgPool,
    applicant_id: Uuid,
) -> Result<Vec<ApplicantApplication>, sqlx::Error> {
    sqlx::query_as::<_, ApplicantApplication>(
        r#"
        SELECT a.id, a.vacancy_id, a.resume_id, a.cover_letter, a.status,
               a.created_at, a.updated_at,
               v.title, v.company, v.salary_min, v.salary_max
        FROM applications a
        JOIN vacancies v ON a.vacancy_id = v.id
        WHERE a.applicant_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(applicant_id)
    .fetch_all(pool)
    .await
}

/// Applications on the employer's vacancies, optionally narrowed to one vacancy.
pub async fn list_for_employer(
    pool: &PgPool,
    employer_id: Uuid,
    vacancy_id: Option<Uuid>,
) -> Result<Vec<EmployerApplication>, sqlx::Error> {
    sqlx::query_as::<_, EmployerApplication>(
        r#"
        SELECT a.id, a.vacancy_id, a.applicant_id, a.resume_id, a.cover_letter, a.status,
               a.created_at, a.updated_at,
               v.title, v.company, u.full_name, u.email, r.position, r.phone
        FROM applications a
        JOIN vacancies v ON a.vacancy_id = v.id
        JOIN users u ON a.applicant_id = u.id
        LEFT JOIN resumes r ON a.resume_id = r.id
        WHERE v.employer_id = $1
          AND ($2::uuid IS NULL OR a.vacancy_id = $2)
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(employer_id)
    .bind(vacancy_id)
    .fetch_all(pool)
    .await
}

/// Status of the vacancy, or `None` if it does not exist.
pub async fn vacancy_status(pool: &PgPool, vacancy_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT status FROM vacancies WHERE id = $1")
        .bind(vacancy_id)
        .fetch_optional(pool)
        .await
}

pub async fn resume_owner(pool: &PgPool, resume_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_application(
    pool: &PgPool,
    vacancy_id: Uuid,
    applicant_id: Uuid,
    resume_id: Option<Uuid>,
    cover_letter: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO applications (vacancy_id, applicant_id, resume_id, cover_letter)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(vacancy_id)
    .bind(applicant_id)
    .bind(resume_id)
    .bind(cover_letter)
    .fetch_one(pool)
    .await
}

/// Employer that owns the vacancy an application targets.
pub async fn application_employer(
    pool: &PgPool,
    application_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT v.employer_id
        FROM applications a
        JOIN vacancies v ON a.vacancy_id = v.id
        WHERE a.id = $1
        "#,
    )
    .bind(application_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE applications SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(status.as_str())
        .bind(application_id)
        .execute(pool)
        .await?;
    Ok(())
}
