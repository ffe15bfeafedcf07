// Applicant and employer cabinet summaries.

pub mod handlers;
pub mod summary;
