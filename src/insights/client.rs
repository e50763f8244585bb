//! Blocking HTTP client for an Ollama-style `/api/generate` endpoint.

use serde::{Deserialize, Serialize};

use crate::config;

use super::{InsightError, TextGenerator};

/// Default request timeout. Generation on modest hardware is slow.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub struct GenerationClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GenerationClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Build from configuration. None when no endpoint is configured,
    /// which disables free-text insights entirely.
    pub fn from_config() -> Option<Self> {
        config::generation_endpoint().map(|url| Self::new(&url, DEFAULT_TIMEOUT_SECS))
    }
}

/// Request body for `/api/generate`
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from `/api/generate`
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl TextGenerator for GenerationClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, InsightError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                InsightError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                InsightError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                InsightError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(InsightError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| InsightError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }
}
