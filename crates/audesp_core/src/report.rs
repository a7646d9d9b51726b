//! Diagnostic model of a validation pass.
//!
//! A validation pass produces `ValidationError` findings with one of three
//! severities. `ValidationResult::aggregate` sorts them into the result
//! surfaces and is the only way the validator builds a result, which keeps
//! `is_valid == errors.is_empty()` true by construction.

use crate::{DocValue, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks submission readiness
    Error,
    /// Flags a likely mistake
    Warning,
    /// Advisory only
    Info,
}

impl Severity {
    /// Returns the lowercase name of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding against one leaf of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Local key name
    pub field: String,

    /// Dotted/indexed address within the tree (e.g., `contratos[2].valor_total`)
    pub path: String,

    /// Human-readable description
    pub message: String,

    /// Severity of the finding
    pub severity: Severity,

    /// Corrective action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Offending value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DocValue>,

    /// Type the schema expects at this path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<String>,
}

impl ValidationError {
    /// Creates a new finding.
    pub fn new(
        field: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            field: field.into(),
            path: path.into(),
            message: message.into(),
            severity,
            suggestion: None,
            value: None,
            expected_type: None,
        }
    }

    /// Creates an `error` finding.
    pub fn error(
        field: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(field, path, message, Severity::Error)
    }

    /// Creates a `warning` finding.
    pub fn warning(
        field: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(field, path, message, Severity::Warning)
    }

    /// Creates an `info` finding.
    pub fn info(
        field: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(field, path, message, Severity::Info)
    }

    /// Attaches a corrective suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attaches the offending value.
    pub fn with_value(mut self, value: DocValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Attaches the expected type.
    pub fn with_expected_type(mut self, expected_type: impl Into<String>) -> Self {
        self.expected_type = Some(expected_type.into());
        self
    }

    /// Overrides the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the top-level section this finding belongs to
    /// (`contratos[2].valor_total` → `contratos`).
    pub fn section(&self) -> &str {
        let end = self
            .path
            .find(['.', '['])
            .unwrap_or(self.path.len());
        &self.path[..end]
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.message)
    }
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when no `error` finding was produced
    pub is_valid: bool,

    /// Findings with `error` severity
    pub errors: Vec<ValidationError>,

    /// Findings with `warning` severity
    pub warnings: Vec<ValidationError>,

    /// Free-text advice
    pub suggestions: Vec<String>,

    /// Satisfied required fields over required fields, 0 to 100
    pub completion_percentage: f64,

    /// Elapsed time of the validation pass in milliseconds
    pub duration: f64,
}

/// Per-section tally of findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    /// True when the section has no errors
    pub valid: bool,
    /// Number of errors in the section
    pub error_count: usize,
    /// Number of warnings in the section
    pub warning_count: usize,
}

impl ValidationResult {
    /// Creates a well-formed result with no findings.
    pub fn empty(duration: f64) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            completion_percentage: 100.0,
            duration,
        }
    }

    /// Sorts findings into the result surfaces.
    ///
    /// `error` and `warning` findings go to their lists and keep their own
    /// `suggestion`. Each `info` finding becomes exactly one `suggestions`
    /// entry (its suggestion, else its message). `summary` lines are appended
    /// after the info entries.
    pub fn aggregate(
        findings: Vec<ValidationError>,
        summary: Vec<String>,
        completion_percentage: f64,
        duration: f64,
    ) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();

        for finding in findings {
            match finding.severity {
                Severity::Error => errors.push(finding),
                Severity::Warning => warnings.push(finding),
                Severity::Info => suggestions.push(finding.suggestion.unwrap_or(finding.message)),
            }
        }
        suggestions.extend(summary);

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            suggestions,
            completion_percentage,
            duration,
        }
    }

    /// Groups errors and warnings by top-level section.
    pub fn section_summary(&self) -> BTreeMap<String, SectionSummary> {
        let mut sections: BTreeMap<String, SectionSummary> = BTreeMap::new();

        for finding in self.errors.iter().chain(self.warnings.iter()) {
            let entry = sections
                .entry(finding.section().to_string())
                .or_insert(SectionSummary {
                    valid: true,
                    error_count: 0,
                    warning_count: 0,
                });
            match finding.severity {
                Severity::Error => {
                    entry.error_count += 1;
                    entry.valid = false;
                }
                Severity::Warning => entry.warning_count += 1,
                Severity::Info => {}
            }
        }

        sections
    }

    /// Serializes the result as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
