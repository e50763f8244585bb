//! The analytics engine: stateless closed-form derivations over fetched rows.
//!
//! Every scoring and summarizing function is pure — it reads only its
//! arguments and fixed constant tables, so identical inputs always produce
//! identical output. Each has a thin facade that performs the fetch through
//! the repository layer and applies the degrade-never-fail policy: callers
//! always receive a well-shaped value, and a degraded one is marked with the
//! fallback path that produced it.

pub mod advisor;
pub mod forecast;
pub mod knowledge;
pub mod patterns;
pub mod report;
pub mod risk;

use serde::Serialize;

/// Which fallback path produced a degraded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The upstream fetch failed.
    DataUnavailable,
    /// No row exists for the identified subject.
    SubjectNotFound,
    /// Fewer historical points than the estimator needs.
    InsufficientHistory,
    /// No text-generation service is configured.
    GeneratorUnavailable,
    /// The text-generation service errored.
    GeneratorFailed,
}

/// A derived value that always exists: either computed from real inputs, or
/// the documented fallback for a failure the caller never has to handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derived<T> {
    pub value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackReason>,
}

impl<T> Derived<T> {
    pub fn computed(value: T) -> Self {
        Self {
            value,
            fallback: None,
        }
    }

    pub fn degraded(value: T, reason: FallbackReason) -> Self {
        Self {
            value,
            fallback: Some(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}
