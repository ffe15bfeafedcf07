use serde::Serialize;

use crate::models::application::ApplicationStatus;
use crate::models::vacancy::{Vacancy, VacancyStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl StatusCounts {
    /// Unrecognised statuses are counted as pending, the state every application starts in.
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        statuses
            .into_iter()
            .fold(StatusCounts::default(), |mut counts, raw| {
                match raw.parse().unwrap_or(ApplicationStatus::Pending) {
                    ApplicationStatus::Pending => counts.pending += 1,
                    ApplicationStatus::Accepted => counts.accepted += 1,
                    ApplicationStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantDashboard {
    pub applications: usize,
    pub favorites: usize,
    pub by_status: StatusCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployerDashboard {
    pub vacancies: usize,
    pub active_vacancies: usize,
    pub total_views: i64,
    pub applications: usize,
    pub by_status: StatusCounts,
}

pub fn summarize_applicant<'a>(
    application_statuses: impl IntoIterator<Item = &'a str>,
    favorites: usize,
) -> ApplicantDashboard {
    let by_status = StatusCounts::tally(application_statuses);
    ApplicantDashboard {
        applications: by_status.pending + by_status.accepted + by_status.rejected,
        favorites,
        by_status,
    }
}

pub fn summarize_employer<'a>(
    vacancies: &[Vacancy],
    application_statuses: impl IntoIterator<Item = &'a str>,
) -> EmployerDashboard {
    let by_status = StatusCounts::tally(application_statuses);
    EmployerDashboard {
        vacancies: vacancies.len(),
        active_vacancies: vacancies
            .iter()
            .filter(|v| v.status == VacancyStatus::Active.as_str())
            .count(),
        total_views: vacancies.iter().map(|v| v.views_count).sum(),
        applications: by_status.pending + by_status.accepted + by_status.rejected,
        by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vacancies::filter::tests::make_vacancy;

    #[test]
    fn test_tally_treats_unknown_as_pending() {
        let counts = StatusCounts::tally(["pending", "accepted", "weird", "rejected", "accepted"]);
        assert_eq!(
            counts,
            StatusCounts {
                pending: 2,
                accepted: 2,
                rejected: 1
            }
        );
    }

    #[test]
    fn test_applicant_summary() {
        let summary = summarize_applicant(["pending", "rejected"], 3);
        assert_eq!(summary.applications, 2);
        assert_eq!(summary.favorites, 3);
        assert_eq!(summary.by_status.rejected, 1);
    }

    #[test]
    fn test_employer_summary_counts_views_and_active() {
        let mut open = make_vacancy("A", "Co", None, (None, None), None, None, &[]);
        open.views_count = 10;
        let mut closed = make_vacancy("B", "Co", None, (None, None), None, None, &[]);
        closed.status = "closed".to_string();
        closed.views_count = 5;

        let summary = summarize_employer(&[open, closed], ["pending", "pending", "accepted"]);
        assert_eq!(summary.vacancies, 2);
        assert_eq!(summary.active_vacancies, 1);
        assert_eq!(summary.total_views, 15);
        assert_eq!(summary.applications, 3);
        assert_eq!(summary.by_status.pending, 2);
    }

    #[test]
    fn test_empty_employer_summary() {
        let summary = summarize_employer(&[], std::iter::empty());
        assert_eq!(summary.total_views, 0);
        assert_eq!(summary.by_status, StatusCounts::default());
    }
}
