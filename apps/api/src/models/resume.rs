use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub position: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub about_me: Option<String>,
    pub photo_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dates are kept as the free-form strings the form submits ("2021-03", "2021-03-01").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub institution: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub skill_name: String,
    pub skill_level: Option<String>,
}

/// Editable header fields of a resume. Absent fields fall back to defaults
/// on create and are cleared on a full update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeFields {
    pub title: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub position: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub about_me: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// The three ordered sub-sections of a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSections {
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Request body for resume create and full update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeInput {
    #[serde(flatten)]
    pub fields: ResumeFields,
    #[serde(flatten)]
    pub sections: ResumeSections,
}

/// A resume header together with its sections, as returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeDocument {
    #[serde(flatten)]
    pub resume: ResumeRow,
    #[serde(flatten)]
    pub sections: ResumeSections,
}
