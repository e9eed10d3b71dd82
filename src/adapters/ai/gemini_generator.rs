//! Gemini Generator - Implementation of LessonGenerator for Google's
//! Generative Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let generator = GeminiGenerator::new(config)?;
//! ```
//!
//! A key carried on the request options overrides the configured key, so a
//! deployment can run keyless and let each caller bring their own.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::generation::GenerationRequest;
use crate::ports::{GeneratorError, LessonGenerator};

/// Configuration for the Gemini generator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-1.5-flash", "gemini-1.5-pro").
    pub model: String,
    /// Base URL for the API (default: https://generativelanguage.googleapis.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gemini API generator implementation.
pub struct GeminiGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGenerator {
    /// Creates a new Gemini generator with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL with the effective key.
    fn generate_url(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, api_key
        )
    }

    /// Picks the request's key when non-empty, otherwise the configured key.
    fn effective_key<'a>(&'a self, request: &'a GenerationRequest) -> &'a str {
        let per_request = request.options.api_key.expose_secret();
        if per_request.is_empty() {
            self.config.api_key.expose_secret()
        } else {
            per_request
        }
    }

    /// Assembles the instruction prompt from the request.
    fn build_prompt(request: &GenerationRequest) -> String {
        let mut prompt = String::new();

        if request.options.analyze_only {
            prompt.push_str(
                "Analyze the following lesson plan against the national curriculum \
                 requirements. Report gaps and strengths; do not rewrite the plan.\n\n",
            );
        } else {
            prompt.push_str(
                "Rewrite the following lesson plan to meet the national curriculum \
                 requirements, keeping the teacher's intent and structure.\n\n",
            );
        }

        prompt.push_str(&format!(
            "Subject: {}\nGrade: {}\n\n",
            request.subject.display_name(),
            request.grade.value()
        ));

        prompt.push_str("Lesson plan:\n");
        prompt.push_str(&request.content);
        prompt.push('\n');

        if let Some(distribution) = &request.distribution_content {
            prompt.push_str("\nCurriculum distribution for reference:\n");
            prompt.push_str(distribution);
            prompt.push('\n');
        }

        if request.options.detailed_report {
            prompt.push_str(
                "\nAppend a detailed report mapping each activity to the competencies \
                 it develops.\n",
            );
        }

        if request.options.comparison_export {
            prompt.push_str(
                "\nPresent the result as a side-by-side comparison of the original \
                 and revised plan, suitable for export.\n",
            );
        }

        prompt
    }

    /// Sends the request, mapping transport failures.
    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, GeneratorError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Self::build_prompt(request),
                }],
            }],
        };

        self.client
            .post(self.generate_url(self.effective_key(request)))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::network(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    GeneratorError::network(format!("Connection failed: {}", e))
                } else {
                    GeneratorError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GeneratorError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GeneratorError::AuthenticationFailed),
            429 => Err(GeneratorError::rate_limited(Self::parse_retry_after(
                &error_body,
            ))),
            400 => Err(GeneratorError::InvalidRequest(error_body)),
            500..=599 => Err(GeneratorError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GeneratorError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from the error body, defaulting to 30 seconds.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(secs) = parsed
                .get("error")
                .and_then(|e| e.get("details"))
                .and_then(|d| d.as_array())
                .and_then(|details| {
                    details.iter().find_map(|d| {
                        d.get("retryDelay")
                            .and_then(|r| r.as_str())
                            .and_then(|s| s.trim_end_matches('s').parse::<u32>().ok())
                    })
                })
            {
                return secs;
            }
        }
        30
    }

    /// Extracts the generated text from a successful response.
    async fn parse_response(&self, response: Response) -> Result<String, GeneratorError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::parse(format!("Failed to parse response: {}", e)))?;

        let text = gemini_response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}

#[async_trait]
impl LessonGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        tracing::debug!(
            model = %self.config.model,
            subject = ?request.subject,
            grade = request.grade.value(),
            "Sending generation request to Gemini"
        );

        let response = self.send_request(request).await?;
        let text = self.parse_response(response).await?;

        tracing::debug!(chars = text.len(), "Received generation response");
        Ok(text)
    }
}

// --- Wire format types ---

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::{GenerationOptions, Grade, Subject};

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            Subject::Math,
            Grade::new(7).unwrap(),
            "Chapter 3: linear equations",
        )
    }

    #[test]
    fn prompt_contains_subject_grade_and_content() {
        let prompt = GeminiGenerator::build_prompt(&request());
        assert!(prompt.contains("Mathematics"));
        assert!(prompt.contains("Grade: 7"));
        assert!(prompt.contains("linear equations"));
    }

    #[test]
    fn analyze_only_changes_the_instruction() {
        let req = request().with_options(GenerationOptions::default().with_analyze_only(true));
        let prompt = GeminiGenerator::build_prompt(&req);
        assert!(prompt.contains("Analyze"));
        assert!(!prompt.contains("Rewrite"));

        let prompt = GeminiGenerator::build_prompt(&request());
        assert!(prompt.contains("Rewrite"));
    }

    #[test]
    fn distribution_and_flags_extend_the_prompt() {
        let req = request()
            .with_distribution_content("week 12: equations")
            .with_options(
                GenerationOptions::default()
                    .with_detailed_report(true)
                    .with_comparison_export(true),
            );
        let prompt = GeminiGenerator::build_prompt(&req);
        assert!(prompt.contains("week 12: equations"));
        assert!(prompt.contains("detailed report"));
        assert!(prompt.contains("side-by-side"));
    }

    #[test]
    fn per_request_key_overrides_configured_key() {
        let generator = GeminiGenerator::new(GeminiConfig::new("configured-key")).unwrap();

        let req = request();
        assert_eq!(generator.effective_key(&req), "configured-key");

        let req = request().with_options(GenerationOptions::new("user-key"));
        assert_eq!(generator.effective_key(&req), "user-key");
    }

    #[test]
    fn generate_url_embeds_model_and_key() {
        let generator = GeminiGenerator::new(
            GeminiConfig::new("k")
                .with_model("gemini-1.5-pro")
                .with_base_url("http://localhost:8080"),
        )
        .unwrap();

        assert_eq!(
            generator.generate_url("k"),
            "http://localhost:8080/v1beta/models/gemini-1.5-pro:generateContent?key=k"
        );
    }

    #[test]
    fn retry_after_reads_gemini_error_details() {
        let body = r#"{"error":{"details":[{"retryDelay":"12s"}]}}"#;
        assert_eq!(GeminiGenerator::parse_retry_after(body), 12);
        assert_eq!(GeminiGenerator::parse_retry_after("not json"), 30);
    }

    #[test]
    fn parses_candidate_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"Lesson "},{"text":"plan"}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let text: String = response.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "Lesson plan");
    }

    #[test]
    fn empty_candidates_yield_empty_text() {
        let json = r#"{"candidates":[]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.candidates.is_empty());
    }
}
