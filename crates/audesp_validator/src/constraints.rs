//! Constraint validation logic.
//!
//! This module checks the constraints a schema attaches to a field:
//! - AllowedValues: the value must be one of a predefined set
//! - Range: a numeric value must lie within inclusive bounds
//! - Length: a string (in characters) or sequence must have a bounded length
//! - Pattern: a scalar must match a regex pattern
//!
//! Constraints are only checked on present values whose type already
//! matched; presence and type are the schema validator's responsibility.

use audesp_core::{DocValue, FieldConstraint, FieldSpec, Severity, ValidationError};
use regex::Regex;
use std::collections::HashMap;
use tracing::warn;

/// Findings of a constraint pass over one value.
#[derive(Debug, Default)]
pub struct ConstraintReport {
    /// The value breaks a constraint
    pub violations: Vec<ValidationError>,
    /// The constraint itself is broken (e.g., an invalid pattern)
    pub schema_issues: Vec<ValidationError>,
}

impl ConstraintReport {
    /// Returns true if the value satisfied every constraint.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validates field constraints, caching compiled patterns.
pub struct ConstraintValidator {
    /// Compiled patterns, or the compile error of an invalid one
    regex_cache: HashMap<String, Result<Regex, String>>,
}

impl ConstraintValidator {
    /// Creates a new constraint validator.
    pub fn new() -> Self {
        Self {
            regex_cache: HashMap::new(),
        }
    }

    /// Checks every constraint of a field against a present value.
    pub fn validate(&mut self, spec: &FieldSpec, value: &DocValue, path: &str) -> ConstraintReport {
        let mut report = ConstraintReport::default();
        let severity = if spec.required {
            Severity::Error
        } else {
            Severity::Warning
        };

        for constraint in spec.constraint_list() {
            let violation = match constraint {
                FieldConstraint::AllowedValues { values } => {
                    self.validate_allowed_values(spec, value, values, path)
                }
                FieldConstraint::Range { min, max } => {
                    self.validate_range(spec, value, *min, *max, path)
                }
                FieldConstraint::Length { min, max } => {
                    self.validate_length(spec, value, *min, *max, path)
                }
                FieldConstraint::Pattern { regex } => {
                    match self.validate_pattern(spec, value, regex, path) {
                        Ok(violation) => violation,
                        Err(issue) => {
                            report.schema_issues.push(issue);
                            None
                        }
                    }
                }
            };

            if let Some(violation) = violation {
                report.violations.push(
                    violation
                        .with_severity(severity)
                        .with_value(value.clone())
                        .with_expected_type(spec.field_type.as_str()),
                );
            }
        }

        report
    }

    /// Validates that a scalar is in the allowed set.
    fn validate_allowed_values(
        &self,
        spec: &FieldSpec,
        value: &DocValue,
        allowed: &[String],
        path: &str,
    ) -> Option<ValidationError> {
        let label = spec.display_label();
        let rendered = match value {
            DocValue::String(_) | DocValue::Int(_) | DocValue::Float(_) | DocValue::Bool(_) => {
                value.to_plain_string()
            }
            _ => {
                return Some(ValidationError::error(
                    &spec.name,
                    path,
                    format!(
                        "Lista de valores permitidos não se aplica a {} em {}",
                        value.type_name(),
                        label
                    ),
                ));
            }
        };

        if allowed.iter().any(|a| *a == rendered) {
            return None;
        }

        Some(
            ValidationError::error(
                &spec.name,
                path,
                format!("Valor não permitido em {}: '{}'", label, rendered),
            )
            .with_suggestion(format!("Use um dos valores: {}", allowed.join(", "))),
        )
    }

    /// Validates that a numeric value is within a range.
    fn validate_range(
        &self,
        spec: &FieldSpec,
        value: &DocValue,
        min: Option<f64>,
        max: Option<f64>,
        path: &str,
    ) -> Option<ValidationError> {
        let label = spec.display_label();
        let Some(number) = value.as_f64() else {
            return Some(ValidationError::error(
                &spec.name,
                path,
                format!("Valor não numérico em {}", label),
            ));
        };

        let below = min.is_some_and(|m| number < m);
        let above = max.is_some_and(|m| number > m);
        if !below && !above {
            return None;
        }

        let bounds = match (min, max) {
            (Some(min), Some(max)) => format!("entre {} e {}", min, max),
            (Some(min), None) => format!("maior ou igual a {}", min),
            (None, Some(max)) => format!("menor ou igual a {}", max),
            (None, None) => return None,
        };

        Some(
            ValidationError::error(
                &spec.name,
                path,
                format!("Valor fora do intervalo em {}: {}", label, number),
            )
            .with_suggestion(format!("Informe um valor {}", bounds)),
        )
    }

    /// Validates the length of a string or sequence.
    fn validate_length(
        &self,
        spec: &FieldSpec,
        value: &DocValue,
        min: Option<usize>,
        max: Option<usize>,
        path: &str,
    ) -> Option<ValidationError> {
        let (length, unit) = match value {
            DocValue::String(s) => (s.chars().count(), "caracteres"),
            DocValue::Array(items) => (items.len(), "itens"),
            _ => return None,
        };

        let label = spec.display_label();
        if let Some(min) = min.filter(|m| length < *m) {
            return Some(
                ValidationError::error(
                    &spec.name,
                    path,
                    format!("{} muito curto: {} {}", label, length, unit),
                )
                .with_suggestion(format!("Comprimento mínimo: {} {}", min, unit)),
            );
        }
        if let Some(max) = max.filter(|m| length > *m) {
            return Some(
                ValidationError::error(
                    &spec.name,
                    path,
                    format!("{} muito longo: {} {}", label, length, unit),
                )
                .with_suggestion(format!("Comprimento máximo: {} {}", max, unit)),
            );
        }

        None
    }

    /// Validates that a scalar matches a regex pattern.
    ///
    /// Returns `Err` with a schema warning when the pattern does not compile.
    fn validate_pattern(
        &mut self,
        spec: &FieldSpec,
        value: &DocValue,
        pattern: &str,
        path: &str,
    ) -> Result<Option<ValidationError>, ValidationError> {
        let rendered = match value {
            DocValue::String(_) | DocValue::Int(_) | DocValue::Float(_) => value.to_plain_string(),
            _ => return Ok(None),
        };

        let label = spec.display_label();
        let regex = match self.get_or_compile_regex(pattern) {
            Ok(regex) => regex,
            Err(error) => {
                warn!(field = %spec.name, pattern, %error, "Invalid regex pattern in schema");
                return Err(ValidationError::warning(
                    &spec.name,
                    path,
                    format!("Padrão inválido no esquema para {}: {}", label, error),
                ));
            }
        };

        if regex.is_match(&rendered) {
            return Ok(None);
        }

        Ok(Some(
            ValidationError::error(
                &spec.name,
                path,
                format!("Formato inválido em {}: '{}'", label, rendered),
            )
            .with_suggestion(format!("O valor deve seguir o padrão {}", pattern)),
        ))
    }

    /// Gets a compiled regex from cache or compiles and caches it.
    fn get_or_compile_regex(&mut self, pattern: &str) -> Result<&Regex, String> {
        self.regex_cache
            .entry(pattern.to_string())
            .or_insert_with(|| Regex::new(pattern).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl Default for ConstraintValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audesp_core::{FieldSpecBuilder, FieldType};

    fn with_constraint(field_type: FieldType, required: bool, constraint: FieldConstraint) -> FieldSpec {
        FieldSpecBuilder::new("campo", field_type)
            .required(required)
            .constraint(constraint)
            .build()
    }

    #[test]
    fn test_allowed_values() {
        let spec = with_constraint(
            FieldType::String,
            true,
            FieldConstraint::AllowedValues {
                values: vec!["PIX".to_string(), "TED".to_string()],
            },
        );
        let mut validator = ConstraintValidator::new();

        assert!(validator.validate(&spec, &DocValue::from("PIX"), "campo").passed());

        let report = validator.validate(&spec, &DocValue::from("Cheque"), "campo");
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].severity, Severity::Error);
        assert_eq!(
            report.violations[0].suggestion.as_deref(),
            Some("Use um dos valores: PIX, TED")
        );
    }

    #[test]
    fn test_allowed_values_numbers() {
        let spec = with_constraint(
            FieldType::Integer,
            false,
            FieldConstraint::AllowedValues {
                values: vec!["1".to_string(), "2".to_string()],
            },
        );
        let mut validator = ConstraintValidator::new();

        assert!(validator.validate(&spec, &DocValue::Int(2), "campo").passed());
        assert!(validator.validate(&spec, &DocValue::Float(1.0), "campo").passed());

        let report = validator.validate(&spec, &DocValue::Int(3), "campo");
        assert_eq!(report.violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_range() {
        let spec = with_constraint(
            FieldType::Integer,
            true,
            FieldConstraint::Range {
                min: Some(1.0),
                max: Some(12.0),
            },
        );
        let mut validator = ConstraintValidator::new();

        assert!(validator.validate(&spec, &DocValue::Int(1), "mes").passed());
        assert!(validator.validate(&spec, &DocValue::Int(12), "mes").passed());

        let report = validator.validate(&spec, &DocValue::Int(13), "mes");
        assert_eq!(report.violations.len(), 1);
        assert_eq!(
            report.violations[0].suggestion.as_deref(),
            Some("Informe um valor entre 1 e 12")
        );
        assert_eq!(report.violations[0].value, Some(DocValue::Int(13)));
    }

    #[test]
    fn test_open_range() {
        let spec = with_constraint(
            FieldType::Number,
            true,
            FieldConstraint::Range {
                min: Some(0.0),
                max: None,
            },
        );
        let mut validator = ConstraintValidator::new();

        assert!(validator.validate(&spec, &DocValue::Float(1e12), "valor").passed());
        let report = validator.validate(&spec, &DocValue::Float(-0.01), "valor");
        assert_eq!(
            report.violations[0].suggestion.as_deref(),
            Some("Informe um valor maior ou igual a 0")
        );
    }

    #[test]
    fn test_length() {
        let spec = with_constraint(
            FieldType::String,
            true,
            FieldConstraint::Length {
                min: Some(2),
                max: Some(5),
            },
        );
        let mut validator = ConstraintValidator::new();

        // counted in characters, not bytes
        assert!(validator.validate(&spec, &DocValue::from("ção"), "x").passed());
        assert!(!validator.validate(&spec, &DocValue::from("a"), "x").passed());
        assert!(!validator.validate(&spec, &DocValue::from("abcdef"), "x").passed());
    }

    #[test]
    fn test_pattern() {
        let spec = with_constraint(
            FieldType::String,
            true,
            FieldConstraint::Pattern {
                regex: r"^[0-9]+/[0-9]{4}$".to_string(),
            },
        );
        let mut validator = ConstraintValidator::new();

        assert!(validator.validate(&spec, &DocValue::from("12/2024"), "numero").passed());
        let report = validator.validate(&spec, &DocValue::from("doze"), "numero");
        assert_eq!(report.violations.len(), 1);
        assert!(report.schema_issues.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_a_schema_issue() {
        let spec = with_constraint(
            FieldType::String,
            true,
            FieldConstraint::Pattern {
                regex: "(abc".to_string(),
            },
        );
        let mut validator = ConstraintValidator::new();

        for _ in 0..2 {
            let report = validator.validate(&spec, &DocValue::from("abc"), "numero");
            assert!(report.passed());
            assert_eq!(report.schema_issues.len(), 1);
            assert_eq!(report.schema_issues[0].severity, Severity::Warning);
        }
        assert_eq!(validator.regex_cache.len(), 1);
    }
}
