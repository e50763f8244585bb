//! Optional free-text insights over a pluggable text-generation service.
//!
//! The collaborator contract is fixed and small: a prompt and system string
//! go in, unstructured text comes out. The whole module functions with the
//! collaborator absent — every operation degrades to a documented fixed
//! fallback rather than erroring.

pub mod client;
pub mod prompt;
pub mod service;

pub use client::GenerationClient;
pub use service::InsightService;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("No text-generation service is configured")]
    Disabled,

    #[error("Cannot reach text-generation service at {0}")]
    Connection(String),

    #[error("Text-generation service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Failed to parse generation response: {0}")]
    ResponseParsing(String),
}

/// A text-generation capability. Implemented by the HTTP client in
/// production and by canned generators in tests.
pub trait TextGenerator {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, InsightError>;
}
