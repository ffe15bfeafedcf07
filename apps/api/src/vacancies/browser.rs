#![allow(dead_code)]

use tracing::debug;

use crate::models::vacancy::Vacancy;
use crate::vacancies::criteria::{CriteriaField, FilterCriteria};
use crate::vacancies::filter::filter;

/// Browsing session over the most recently loaded vacancy snapshot.
///
/// The visible list is recomputed synchronously whenever the snapshot or
/// any criterion changes, so `visible()` is always consistent with both.
#[derive(Debug, Clone, Default)]
pub struct VacancyBrowser {
    snapshot: Vec<Vacancy>,
    criteria: FilterCriteria,
    visible: Vec<Vacancy>,
}

impl VacancyBrowser {
    pub fn new(snapshot: Vec<Vacancy>) -> Self {
        let mut browser = VacancyBrowser {
            snapshot,
            ..Default::default()
        };
        browser.recompute();
        browser
    }

    pub fn with_criteria(snapshot: Vec<Vacancy>, criteria: FilterCriteria) -> Self {
        let mut browser = VacancyBrowser {
            snapshot,
            criteria,
            visible: Vec::new(),
        };
        browser.recompute();
        browser
    }

    /// Swaps in a freshly loaded snapshot. Older loads are simply discarded.
    pub fn replace_snapshot(&mut self, snapshot: Vec<Vacancy>) {
        self.snapshot = snapshot;
        self.recompute();
    }

    pub fn update_criteria(&mut self, field: CriteriaField, raw: &str) {
        self.criteria.set(field, raw);
        self.recompute();
    }

    pub fn reset_criteria(&mut self) {
        self.criteria = FilterCriteria::default();
        self.recompute();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn snapshot(&self) -> &[Vacancy] {
        &self.snapshot
    }

    pub fn visible(&self) -> &[Vacancy] {
        &self.visible
    }

    pub fn into_visible(self) -> Vec<Vacancy> {
        self.visible
    }

    fn recompute(&mut self) {
        self.visible = filter(&self.snapshot, &self.criteria);
        debug!(
            total = self.snapshot.len(),
            visible = self.visible.len(),
            active = self.criteria.active_count(),
            "vacancy filter recomputed"
        );
    }
}
