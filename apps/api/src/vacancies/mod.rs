// Vacancy browsing and employer-side vacancy management.
// The filter engine is pure; handlers load a snapshot from Postgres and run it.

pub mod browser;
pub mod criteria;
pub mod filter;
pub mod handlers;
pub mod repository;
