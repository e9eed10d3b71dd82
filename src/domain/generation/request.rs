//! Generation request value objects.
//!
//! One `GenerationRequest` is created per user action and discarded after the
//! outcome is produced. The options bag is an exhaustive struct; there is no
//! loosely-typed passthrough.

use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// School subject the lesson plan belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Literature,
    NaturalScience,
    HistoryGeography,
    English,
    Informatics,
    CivicEducation,
}

impl Subject {
    /// Human-readable name used in prompts and display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Subject::Math => "Mathematics",
            Subject::Literature => "Literature",
            Subject::NaturalScience => "Natural Science",
            Subject::HistoryGeography => "History & Geography",
            Subject::English => "English",
            Subject::Informatics => "Informatics",
            Subject::CivicEducation => "Civic Education",
        }
    }
}

/// School grade, validated to 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;

    /// Creates a grade, rejecting values outside 1..=12.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "grade",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Generation options. Each flag has a documented effect on the prompt;
/// unknown options cannot be smuggled in.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Analyze the lesson plan only; do not rewrite it.
    pub analyze_only: bool,
    /// Append a detailed competency report to the output.
    pub detailed_report: bool,
    /// Produce a side-by-side comparison suitable for export.
    pub comparison_export: bool,
    /// API key for the generation service. Overrides the configured key
    /// when non-empty.
    pub api_key: Secret<String>,
}

impl GenerationOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            analyze_only: false,
            detailed_report: false,
            comparison_export: false,
            api_key: Secret::new(api_key.into()),
        }
    }

    pub fn with_analyze_only(mut self, on: bool) -> Self {
        self.analyze_only = on;
        self
    }

    pub fn with_detailed_report(mut self, on: bool) -> Self {
        self.detailed_report = on;
        self
    }

    pub fn with_comparison_export(mut self, on: bool) -> Self {
        self.comparison_export = on;
        self
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// A single content-generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub subject: Subject,
    pub grade: Grade,
    /// Primary lesson text. Must be non-empty after trimming.
    pub content: String,
    /// Optional curriculum-distribution reference text.
    pub distribution_content: Option<String>,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    pub fn new(subject: Subject, grade: Grade, content: impl Into<String>) -> Self {
        Self {
            subject,
            grade,
            content: content.into(),
            distribution_content: None,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_distribution_content(mut self, content: impl Into<String>) -> Self {
        self.distribution_content = Some(content.into());
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Checks local preconditions. The only one is non-empty content; grade
    /// and subject are valid by construction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(())
    }
}
