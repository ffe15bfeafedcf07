use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::resume::{Education, Experience, ResumeFields, ResumeRow, ResumeSections, Skill};

/// The caller's most recently created resume.
pub async fn latest_for_user(pool: &PgPool, user_id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_resume(pool: &PgPool, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Row-locks the resume until the surrounding transaction ends, serializing
/// section edits on the same resume.
pub async fn lock_resume(conn: &mut PgConnection, id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(LOCK_RESUME_SQL)
        .bind(id)
        .fetch_optional(conn)
        .await
}

const LOCK_RESUME_SQL: &str = "SELECT * FROM resumes WHERE id = $1 FOR UPDATE";

/// Sections come back in authoring order so that index-based edits line up.
pub async fn load_sections(conn: &mut PgConnection, resume_id: Uuid) -> Result<ResumeSections, sqlx::Error> {
    let experience = sqlx::query_as::<_, Experience>(
        r#"
        SELECT company, position, start_date, end_date, is_current, description
        FROM resume_experience WHERE resume_id = $1 ORDER BY position_index
        "#,
    )
    .bind(resume_id)
    .fetch_all(&mut *conn)
    .await?;

    let education = sqlx::query_as::<_, Education>(
        r#"
        SELECT institution, degree, field_of_study, start_date, end_date, is_current
        FROM resume_education WHERE resume_id = $1 ORDER BY position_index
        "#,
    )
    .bind(resume_id)
    .fetch_all(&mut *conn)
    .await?;

    let skills = sqlx::query_as::<_, Skill>(
        "SELECT skill_name, skill_level FROM resume_skills WHERE resume_id = $1 ORDER BY position_index",
    )
    .bind(resume_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(ResumeSections {
        experience,
        education,
        skills,
    })
}

/// `fields` must already carry resolved title, full_name and email.
pub async fn insert_resume(
    conn: &mut PgConnection,
    user_id: Uuid,
    fields: &ResumeFields,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (
            user_id, title, full_name, email, phone, location,
            position, salary_min, salary_max, about_me, photo_url, is_published
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(fields.title.as_deref().unwrap_or_default())
    .bind(fields.full_name.as_deref().unwrap_or_default())
    .bind(fields.email.as_deref().unwrap_or_default())
    .bind(&fields.phone)
    .bind(&fields.location)
    .bind(&fields.position)
    .bind(fields.salary_min)
    .bind(fields.salary_max)
    .bind(&fields.about_me)
    .bind(&fields.photo_url)
    .bind(fields.is_published)
    .fetch_one(conn)
    .await
}

pub async fn update_header(
    conn: &mut PgConnection,
    id: Uuid,
    fields: &ResumeFields,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE resumes SET
            title = $1, full_name = $2, email = $3, phone = $4, location = $5,
            position = $6, salary_min = $7, salary_max = $8, about_me = $9,
            photo_url = $10, is_published = $11, updated_at = NOW()
        WHERE id = $12
        "#,
    )
    .bind(fields.title.as_deref().unwrap_or_default())
    .bind(fields.full_name.as_deref().unwrap_or_default())
    .bind(fields.email.as_deref().unwrap_or_default())
    .bind(&fields.phone)
    .bind(&fields.location)
    .bind(&fields.position)
    .bind(fields.salary_min)
    .bind(fields.salary_max)
    .bind(&fields.about_me)
    .bind(&fields.photo_url)
    .bind(fields.is_published)
    .bind(id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn touch(conn: &mut PgConnection, id: Uuid) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("UPDATE resumes SET updated_at = NOW() WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_one(conn)
        .await
}

/// Deletes and re-inserts all three sections. Run inside a transaction.
pub async fn replace_sections(
    conn: &mut PgConnection,
    resume_id: Uuid,
    sections: &ResumeSections,
) -> Result<(), sqlx::Error> {
    for table in ["resume_experience", "resume_education", "resume_skills"] {
        sqlx::query(&format!("DELETE FROM {table} WHERE resume_id = $1"))
            .bind(resume_id)
            .execute(&mut *conn)
            .await?;
    }

    for (index, exp) in sections.experience.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO resume_experience (
                resume_id, position_index, company, position, start_date, end_date, is_current, description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(resume_id)
        .bind(index as i32)
        .bind(&exp.company)
        .bind(&exp.position)
        .bind(&exp.start_date)
        .bind(&exp.end_date)
        .bind(exp.is_current)
        .bind(&exp.description)
        .execute(&mut *conn)
        .await?;
    }

    for (index, edu) in sections.education.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO resume_education (
                resume_id, position_index, institution, degree, field_of_study, start_date, end_date, is_current
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(resume_id)
        .bind(index as i32)
        .bind(&edu.institution)
        .bind(&edu.degree)
        .bind(&edu.field_of_study)
        .bind(&edu.start_date)
        .bind(&edu.end_date)
        .bind(edu.is_current)
        .execute(&mut *conn)
        .await?;
    }

    for (index, skill) in sections.skills.iter().enumerate() {
        sqlx::query(
            "INSERT INTO resume_skills (resume_id, position_index, skill_name, skill_level) VALUES ($1, $2, $3, $4)",
        )
        .bind(resume_id)
        .bind(index as i32)
        .bind(&skill.skill_name)
        .bind(&skill.skill_level)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_query_takes_row_lock() {
        assert!(LOCK_RESUME_SQL.ends_with("FOR UPDATE"));
        assert!(LOCK_RESUME_SQL.contains("WHERE id = $1"));
    }
}
