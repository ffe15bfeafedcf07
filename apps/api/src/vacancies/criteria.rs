//! Filter criteria for the vacancy browser, plus the caller-side coercion that
//! turns raw form / query-string input into well-typed criteria.

#![allow(dead_code)]

use serde::Deserialize;
use uuid::Uuid;

/// Sentinel values a select control sends for "no constraint".
const ANY_SENTINELS: &[&str] = &["all", "any"];

/// The active constraints applied to a vacancy list. `None` means the
/// corresponding predicate is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub employment_type: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaField {
    Search,
    Location,
    SalaryMin,
    SalaryMax,
    EmploymentType,
    Experience,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Updates a single field from raw user input. Blank input clears text
    /// fields, "all"/"any" clears the select fields, and a salary bound that
    /// does not parse as an integer is cleared rather than rejected.
    pub fn set(&mut self, field: CriteriaField, raw: &str) {
        match field {
            CriteriaField::Search => self.search = text_value(raw),
            CriteriaField::Location => self.location = text_value(raw),
            CriteriaField::SalaryMin => self.salary_min = parse_salary_bound(raw),
            CriteriaField::SalaryMax => self.salary_max = parse_salary_bound(raw),
            CriteriaField::EmploymentType => self.employment_type = choice_value(raw),
            CriteriaField::Experience => self.experience = choice_value(raw),
        }
    }

    /// Builder form of [`FilterCriteria::set`].
    pub fn with(mut self, field: CriteriaField, raw: &str) -> Self {
        self.set(field, raw);
        self
    }

    /// Number of predicates that will actually run.
    pub fn active_count(&self) -> usize {
        [
            self.search.is_some(),
            self.location.is_some(),
            self.salary_min.is_some(),
            self.salary_max.is_some(),
            self.employment_type.is_some(),
            self.experience.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Parses a salary bound typed by the user. Empty, non-numeric and
/// out-of-range input all map to `None`.
pub fn parse_salary_bound(raw: &str) -> Option<i64> {
    let cleaned: String = raw.trim().chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<i64>().ok()
}

fn text_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn choice_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_any_sentinel(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn is_any_sentinel(value: &str) -> bool {
    ANY_SENTINELS
        .iter()
        .any(|sentinel| value.eq_ignore_ascii_case(sentinel))
}

/// Query string of `GET /api/v1/vacancies`. Salary bounds arrive as raw
/// strings so that malformed input degrades to "no bound" instead of a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VacancyQuery {
    pub status: Option<String>,
    pub employer_id: Option<Uuid>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub employment_type: Option<String>,
    pub experience: Option<String>,
}

impl VacancyQuery {
    pub fn criteria(&self) -> FilterCriteria {
        let fields = [
            (CriteriaField::Search, &self.search),
            (CriteriaField::Location, &self.location),
            (CriteriaField::SalaryMin, &self.salary_min),
            (CriteriaField::SalaryMax, &self.salary_max),
            (CriteriaField::EmploymentType, &self.employment_type),
            (CriteriaField::Experience, &self.experience),
        ];

        fields
            .into_iter()
            .fold(FilterCriteria::default(), |criteria, (field, raw)| match raw {
                Some(raw) => criteria.with(field, raw),
                None => criteria,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_salary_bound_accepts_grouped_digits() {
        assert_eq!(parse_salary_bound("250000"), Some(250_000));
        assert_eq!(parse_salary_bound(" 250 000 "), Some(250_000));
    }

    #[test]
    fn test_parse_salary_bound_coerces_garbage_to_absent() {
        assert_eq!(parse_salary_bound(""), None);
        assert_eq!(parse_salary_bound("abc"), None);
        assert_eq!(parse_salary_bound("12.5"), None);
        assert_eq!(parse_salary_bound("99999999999999999999999"), None);
    }

    #[test]
    fn test_set_clears_on_sentinels() {
        let mut criteria = FilterCriteria::default()
            .with(CriteriaField::EmploymentType, "Удалённо")
            .with(CriteriaField::Search, "rust");
        assert_eq!(criteria.active_count(), 2);

        criteria.set(CriteriaField::EmploymentType, "all");
        criteria.set(CriteriaField::Search, "   ");
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_all_is_a_valid_search_term() {
        let criteria = FilterCriteria::default().with(CriteriaField::Search, "all");
        assert_eq!(criteria.search.as_deref(), Some("all"));
    }

    #[test]
    fn test_query_to_criteria() {
        let query = VacancyQuery {
            search: Some("Python".to_string()),
            salary_min: Some("not-a-number".to_string()),
            salary_max: Some("300000".to_string()),
            experience: Some("any".to_string()),
            ..Default::default()
        };
        let criteria = query.criteria();
        assert_eq!(criteria.search.as_deref(), Some("Python"));
        assert_eq!(criteria.salary_min, None);
        assert_eq!(criteria.salary_max, Some(300_000));
        assert_eq!(criteria.experience, None);
    }
}
