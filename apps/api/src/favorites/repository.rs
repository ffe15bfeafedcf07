use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::vacancy::Vacancy;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FavoriteVacancy {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vacancy: Vacancy,
    pub favorited_at: DateTime<Utc>,
}

pub async fn list_favorites(pool: &PgPool, user_id: Uuid) -> Result<Vec<FavoriteVacancy>, sqlx::Error> {
    sqlx::query_as::<_, FavoriteVacancy>(
        r#"
        SELECT v.*, u.full_name AS employer_name, f.created_at AS favorited_at
        FROM favorites f
        JOIN vacancies v ON f.vacancy_id = v.id
        JOIN users u ON v.employer_id = u.id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn count_favorites(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn vacancy_exists(pool: &PgPool, vacancy_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM vacancies WHERE id = $1)")
        .bind(vacancy_id)
        .fetch_one(pool)
        .await
}

pub async fn add_favorite(pool: &PgPool, user_id: Uuid, vacancy_id: Uuid) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO favorites (user_id, vacancy_id) VALUES ($1, $2) RETURNING id")
        .bind(user_id)
        .bind(vacancy_id)
        .fetch_one(pool)
        .await
}

/// Returns whether a favorite was actually removed.
pub async fn remove_favorite(pool: &PgPool, user_id: Uuid, vacancy_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND vacancy_id = $2")
        .bind(user_id)
        .bind(vacancy_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
