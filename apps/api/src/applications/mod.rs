// Applicant responses to vacancies and the employer's review of them.

pub mod handlers;
pub mod repository;
