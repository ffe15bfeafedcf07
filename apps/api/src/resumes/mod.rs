// Applicant resumes: a header plus ordered experience, education and skills sections.

pub mod editor;
pub mod handlers;
pub mod repository;
