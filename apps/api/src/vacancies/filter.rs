//! Vacancy filter engine.
//!
//! A pure, stateless conjunction of predicates over an in-memory vacancy list.
//! Every active criterion must hold for a vacancy to be kept; inactive ones
//! (unset, empty, or the "all" sentinel on select fields) are skipped. The
//! input is never mutated and the output preserves input order.

use crate::models::vacancy::Vacancy;
use crate::vacancies::criteria::{is_any_sentinel, FilterCriteria};

/// Returns the vacancies matching every active criterion, in input order.
pub fn filter(vacancies: &[Vacancy], criteria: &FilterCriteria) -> Vec<Vacancy> {
    let predicates = Predicates::from(criteria);
    vacancies
        .iter()
        .filter(|vacancy| predicates.matches(vacancy))
        .cloned()
        .collect()
}

/// Criteria resolved once per call: needles lowercased, inactive fields dropped.
struct Predicates<'a> {
    search: Option<String>,
    location: Option<String>,
    salary_floor: Option<i64>,
    salary_ceiling: Option<i64>,
    employment_type: Option<&'a str>,
    experience: Option<&'a str>,
}

impl<'a> From<&'a FilterCriteria> for Predicates<'a> {
    fn from(criteria: &'a FilterCriteria) -> Self {
        Predicates {
            search: active_text(&criteria.search).map(str::to_lowercase),
            location: active_text(&criteria.location).map(str::to_lowercase),
            salary_floor: criteria.salary_min,
            salary_ceiling: criteria.salary_max,
            employment_type: active_choice(&criteria.employment_type),
            experience: active_choice(&criteria.experience),
        }
    }
}

impl Predicates<'_> {
    fn matches(&self, vacancy: &Vacancy) -> bool {
        self.search_matches(vacancy)
            && self.location_matches(vacancy)
            && self.salary_floor_matches(vacancy)
            && self.salary_ceiling_matches(vacancy)
            && exact_matches(self.employment_type, vacancy.employment_type.as_deref())
            && exact_matches(self.experience, vacancy.experience.as_deref())
    }

    fn search_matches(&self, vacancy: &Vacancy) -> bool {
        let Some(needle) = self.search.as_deref() else {
            return true;
        };
        contains_lowercase(&vacancy.title, needle)
            || contains_lowercase(&vacancy.company, needle)
            || vacancy.tags.iter().any(|tag| contains_lowercase(tag, needle))
    }

    fn location_matches(&self, vacancy: &Vacancy) -> bool {
        match (self.location.as_deref(), vacancy.location.as_deref()) {
            (None, _) => true,
            (Some(needle), Some(location)) => contains_lowercase(location, needle),
            (Some(_), None) => false,
        }
    }

    // An unknown salary never satisfies a bound.
    fn salary_floor_matches(&self, vacancy: &Vacancy) -> bool {
        match self.salary_floor {
            None => true,
            Some(floor) => vacancy.salary_min.is_some_and(|min| min >= floor),
        }
    }

    fn salary_ceiling_matches(&self, vacancy: &Vacancy) -> bool {
        match self.salary_ceiling {
            None => true,
            Some(ceiling) => vacancy.salary_max.is_some_and(|max| max <= ceiling),
        }
    }
}

fn exact_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

fn contains_lowercase(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

fn active_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn active_choice(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && !is_any_sentinel(v))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::vacancies::criteria::CriteriaField;
    use chrono::Utc;
    use uuid::Uuid;

    pub(crate) fn make_vacancy(
        title: &str,
        company: &str,
        location: Option<&str>,
        salary: (Option<i64>, Option<i64>),
        employment_type: Option<&str>,
        experience: Option<&str>,
        tags: &[&str],
    ) -> Vacancy {
        Vacancy {
            id: Uuid::new_v4(),
            employer_id: Uuid::new_v4(),
            employer_name: "Employer".to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: location.map(str::to_string),
            salary_min: salary.0,
            salary_max: salary.1,
            employment_type: employment_type.map(str::to_string),
            experience: experience.map(str::to_string),
            description: None,
            requirements: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status: "active".to_string(),
            views_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Vacancy> {
        vec![
            make_vacancy(
                "Senior Frontend Developer",
                "TechCorp",
                Some("Москва"),
                (Some(250_000), Some(350_000)),
                Some("Полная занятость"),
                Some("3-6 лет"),
                &["React", "TypeScript", "Next.js"],
            ),
            make_vacancy(
                "Backend Python Developer",
                "DataLabs",
                Some("Санкт-Петербург"),
                (Some(200_000), Some(300_000)),
                Some("Удалённо"),
                Some("1-3 года"),
                &["Python", "Django", "PostgreSQL"],
            ),
            make_vacancy(
                "UI/UX Designer",
                "CreativeStudio",
                None,
                (None, Some(250_000)),
                Some("Гибрид"),
                None,
                &["Figma"],
            ),
            make_vacancy(
                "Data Engineer",
                "Reactive Systems",
                Some("Москва"),
                (Some(400_000), Some(150_000)),
                None,
                Some("3-6 лет"),
                &[],
            ),
        ]
    }

    fn matches(vacancy: &Vacancy, criteria: &FilterCriteria) -> bool {
        filter(std::slice::from_ref(vacancy), criteria).len() == 1
    }

    fn titles(vacancies: &[Vacancy]) -> Vec<&str> {
        vacancies.iter().map(|v| v.title.as_str()).collect()
    }

    fn is_ordered_subsequence(sub: &[Vacancy], full: &[Vacancy]) -> bool {
        let mut remaining = full.iter();
        sub.iter()
            .all(|wanted| remaining.any(|candidate| candidate.id == wanted.id))
    }

    fn is_set(criteria: &FilterCriteria, field: CriteriaField) -> bool {
        match field {
            CriteriaField::Search => criteria.search.is_some(),
            CriteriaField::Location => criteria.location.is_some(),
            CriteriaField::SalaryMin => criteria.salary_min.is_some(),
            CriteriaField::SalaryMax => criteria.salary_max.is_some(),
            CriteriaField::EmploymentType => criteria.employment_type.is_some(),
            CriteriaField::Experience => criteria.experience.is_some(),
        }
    }

    fn criteria_grid() -> Vec<FilterCriteria> {
        let base = FilterCriteria::default();
        vec![
            base.clone(),
            base.clone().with(CriteriaField::Search, "developer"),
            base.clone().with(CriteriaField::Search, "react"),
            base.clone().with(CriteriaField::Location, "моск"),
            base.clone().with(CriteriaField::SalaryMin, "200000"),
            base.clone().with(CriteriaField::SalaryMax, "300000"),
            base.clone().with(CriteriaField::EmploymentType, "Удалённо"),
            base.clone().with(CriteriaField::Experience, "3-6 лет"),
            base.clone()
                .with(CriteriaField::Search, "developer")
                .with(CriteriaField::SalaryMin, "220000"),
        ]
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let vacancies = sample();
        assert_eq!(filter(&vacancies, &FilterCriteria::default()), vacancies);
    }

    #[test]
    fn test_sentinel_criteria_is_identity() {
        let vacancies = sample();
        let criteria = FilterCriteria {
            search: Some(String::new()),
            employment_type: Some("all".to_string()),
            experience: Some("ALL".to_string()),
            ..Default::default()
        };
        assert_eq!(filter(&vacancies, &criteria), vacancies);
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let vacancies = sample();
        for criteria in criteria_grid() {
            let result = filter(&vacancies, &criteria);
            assert!(
                is_ordered_subsequence(&result, &vacancies),
                "not a subsequence for {criteria:?}"
            );
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let vacancies = sample();
        for criteria in criteria_grid() {
            let once = filter(&vacancies, &criteria);
            let twice = filter(&once, &criteria);
            assert_eq!(once, twice, "not idempotent for {criteria:?}");
        }
    }

    #[test]
    fn test_adding_constraints_never_grows_result() {
        let vacancies = sample();
        let extra = [
            (CriteriaField::Location, "моск"),
            (CriteriaField::SalaryMin, "100000"),
            (CriteriaField::SalaryMax, "320000"),
            (CriteriaField::Experience, "3-6 лет"),
        ];
        for criteria in criteria_grid() {
            let broad = filter(&vacancies, &criteria);
            // Only fields that are still unset add a predicate; overwriting one
            // could loosen it.
            for (field, raw) in extra.into_iter().filter(|(field, _)| !is_set(&criteria, *field)) {
                let narrow = filter(&vacancies, &criteria.clone().with(field, raw));
                assert!(narrow.len() <= broad.len());
                assert!(narrow.iter().all(|v| broad.contains(v)));
            }
        }
    }

    #[test]
    fn test_unknown_salary_min_excluded_by_any_floor() {
        let vacancies = sample();
        for floor in ["0", "1", "-100"] {
            let criteria = FilterCriteria::default().with(CriteriaField::SalaryMin, floor);
            let result = filter(&vacancies, &criteria);
            assert!(!titles(&result).contains(&"UI/UX Designer"));
        }
    }

    #[test]
    fn test_unknown_salary_max_excluded_by_any_ceiling() {
        let open_ended = make_vacancy(
            "Staff Engineer",
            "TechCorp",
            None,
            (Some(300_000), None),
            None,
            None,
            &[],
        );
        for ceiling in ["1", "300000", "9999999999"] {
            let criteria = FilterCriteria::default().with(CriteriaField::SalaryMax, ceiling);
            assert!(!matches(&open_ended, &criteria), "kept under ceiling {ceiling}");
        }
        assert!(matches(&open_ended, &FilterCriteria::default()));
    }

    #[test]
    fn test_experience_mismatch_and_absent_excluded() {
        let vacancies = sample();
        let criteria = FilterCriteria::default().with(CriteriaField::Experience, "1-3 года");
        // "3-6 лет" differs and the designer has no experience set.
        assert_eq!(
            titles(&filter(&vacancies, &criteria)),
            vec!["Backend Python Developer"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let vacancies = sample();
        let upper = filter(
            &vacancies,
            &FilterCriteria::default().with(CriteriaField::Search, "REACT"),
        );
        let lower = filter(
            &vacancies,
            &FilterCriteria::default().with(CriteriaField::Search, "react"),
        );
        assert_eq!(upper, lower);
        // Matches the React tag and the "Reactive" company name.
        assert_eq!(
            titles(&upper),
            vec!["Senior Frontend Developer", "Data Engineer"]
        );
    }

    #[test]
    fn test_salary_floor_above_min_excludes() {
        let vacancies = vec![make_vacancy(
            "Backend Python Developer",
            "DataLabs",
            None,
            (Some(200_000), Some(300_000)),
            None,
            None,
            &["Python"],
        )];
        let criteria = FilterCriteria::default().with(CriteriaField::SalaryMin, "250000");
        assert!(filter(&vacancies, &criteria).is_empty());
    }

    #[test]
    fn test_search_matches_tag() {
        let vacancies = vec![make_vacancy(
            "Backend Developer",
            "DataLabs",
            None,
            (Some(200_000), Some(300_000)),
            None,
            None,
            &["Python"],
        )];
        let criteria = FilterCriteria::default().with(CriteriaField::Search, "python");
        assert_eq!(filter(&vacancies, &criteria), vacancies);
    }

    #[test]
    fn test_employment_type_mismatch_excluded() {
        let vacancy = make_vacancy(
            "Senior Frontend Developer",
            "TechCorp",
            None,
            (None, None),
            Some("Полная занятость"),
            None,
            &[],
        );
        let criteria = FilterCriteria::default().with(CriteriaField::EmploymentType, "Удалённо");
        assert!(!matches(&vacancy, &criteria));
    }

    #[test]
    fn test_employment_type_is_case_sensitive() {
        let vacancy = make_vacancy(
            "Dev",
            "Co",
            None,
            (None, None),
            Some("Remote"),
            None,
            &[],
        );
        let criteria = FilterCriteria::default().with(CriteriaField::EmploymentType, "remote");
        assert!(!matches(&vacancy, &criteria));
    }

    #[test]
    fn test_location_requires_present_location() {
        let vacancies = sample();
        let criteria = FilterCriteria::default().with(CriteriaField::Location, "МОСКВА");
        assert_eq!(
            titles(&filter(&vacancies, &criteria)),
            vec!["Senior Frontend Developer", "Data Engineer"]
        );
    }

    #[test]
    fn test_inverted_salary_range_checks_each_bound_independently() {
        let vacancies = sample();
        // Data Engineer has min 400k / max 150k.
        let criteria = FilterCriteria::default()
            .with(CriteriaField::SalaryMin, "350000")
            .with(CriteriaField::SalaryMax, "200000");
        assert_eq!(titles(&filter(&vacancies, &criteria)), vec!["Data Engineer"]);
    }

    #[test]
    fn test_input_is_untouched() {
        let vacancies = sample();
        let snapshot = vacancies.clone();
        let _ = filter(
            &vacancies,
            &FilterCriteria::default().with(CriteriaField::Search, "python"),
        );
        assert_eq!(vacancies, snapshot);
    }
}
