//! Wardwise — hospital operations analytics.
//!
//! Derives risk scores, occupancy forecasts, disease-pattern summaries,
//! workload rankings and resource advisories from a hospital's patient,
//! admission, appointment, theatre, staffing and ward records, with optional
//! free-text insights from a pluggable text-generation service.
//!
//! The analytics engine itself is stateless: pure functions over rows that
//! the repository layer fetches, behind facades that degrade to documented
//! fallbacks instead of failing.

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod insights;
pub mod models;
