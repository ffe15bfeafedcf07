use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vacancy::{Vacancy, VacancyInput, VacancyStatus};

/// Vacancies with the given status (any status when `None`), newest first.
pub async fn list_vacancies(
    pool: &PgPool,
    status: Option<VacancyStatus>,
    employer_id: Option<Uuid>,
) -> Result<Vec<Vacancy>, sqlx::Error> {
    sqlx::query_as::<_, Vacancy>(
        r#"
        SELECT v.*, u.full_name AS employer_name
        FROM vacancies v
        JOIN users u ON v.employer_id = u.id
        WHERE ($1::text IS NULL OR v.status = $1)
          AND ($2::uuid IS NULL OR v.employer_id = $2)
        ORDER BY v.created_at DESC
        "#,
    )
    .bind(status.map(|s| s.as_str()))
    .bind(employer_id)
    .fetch_all(pool)
    .await
}

/// Fetches one vacancy and counts the view in the same statement.
pub async fn view_vacancy(pool: &PgPool, id: Uuid) -> Result<Option<Vacancy>, sqlx::Error> {
    sqlx::query_as::<_, Vacancy>(
        r#"
        WITH viewed AS (
            UPDATE vacancies SET views_count = views_count + 1
            WHERE id = $1
            RETURNING *
        )
        SELECT v.*, u.full_name AS employer_name
        FROM viewed v
        JOIN users u ON v.employer_id = u.id
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_owner(pool: &PgPool, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT employer_id FROM vacancies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_vacancy(
    pool: &PgPool,
    employer_id: Uuid,
    input: &VacancyInput,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO vacancies (
            employer_id, title, company, location, salary_min, salary_max,
            employment_type, experience, description, requirements, tags, status
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id
        "#,
    )
    .bind(employer_id)
    .bind(&input.title)
    .bind(&input.company)
    .bind(&input.location)
    .bind(input.salary_min)
    .bind(input.salary_max)
    .bind(&input.employment_type)
    .bind(&input.experience)
    .bind(&input.description)
    .bind(&input.requirements)
    .bind(&input.tags)
    .bind(input.status.as_str())
    .fetch_one(pool)
    .await
}

pub async fn update_vacancy(pool: &PgPool, id: Uuid, input: &VacancyInput) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE vacancies SET
            title = $1, company = $2, location = $3, salary_min = $4, salary_max = $5,
            employment_type = $6, experience = $7, description = $8, requirements = $9,
            tags = $10, status = $11, updated_at = NOW()
        WHERE id = $12
        "#,
    )
    .bind(&input.title)
    .bind(&input.company)
    .bind(&input.location)
    .bind(input.salary_min)
    .bind(input.salary_max)
    .bind(&input.employment_type)
    .bind(&input.experience)
    .bind(&input.description)
    .bind(&input.requirements)
    .bind(&input.tags)
    .bind(input.status.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
