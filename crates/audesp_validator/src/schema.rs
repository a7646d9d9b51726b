//! Structural and type checks.
//!
//! This module decides whether a field is present and whether a present
//! value has the type its schema entry declares. It also checks a schema
//! definition for mistakes before any filing is validated against it.

use audesp_core::{
    DocValue, FieldConstraint, FieldSpec, FieldType, FilingSchema, FiscalWindow, Severity,
    ValidationError, child_path,
};
use audesp_normalizer::is_canonical_date;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;
use validator::ValidateEmail;

/// Checks field presence and value types against a filing schema.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Creates a new schema validator.
    pub fn new() -> Self {
        Self
    }

    /// Builds the finding for a required field that is absent, null or empty.
    pub fn missing_field(&self, spec: &FieldSpec, path: &str) -> ValidationError {
        let label = spec.display_label();
        ValidationError::error(
            &spec.name,
            path,
            format!("Campo obrigatório vazio: {}", label),
        )
        .with_suggestion(format!("Preencha o campo {}", label))
        .with_expected_type(spec.field_type.as_str())
    }

    /// Checks a present value against the declared type.
    ///
    /// Mismatches are errors on required fields and warnings otherwise.
    pub fn check_type(
        &self,
        spec: &FieldSpec,
        value: &DocValue,
        path: &str,
    ) -> Option<ValidationError> {
        if type_matches(spec.field_type, value) {
            return None;
        }

        let label = spec.display_label();
        let (message, suggestion) = match spec.field_type {
            FieldType::Date => (
                format!("Data inválida em {}", label),
                "Use o formato AAAA-MM-DD (ex.: 2024-03-31)".to_string(),
            ),
            FieldType::Document => (
                format!("Documento inválido em {}", label),
                "Informe apenas os dígitos: 11 para CPF ou 14 para CNPJ".to_string(),
            ),
            FieldType::Cpf => (
                format!("CPF inválido em {}", label),
                "CPF deve conter 11 dígitos (ex.: 12345678901)".to_string(),
            ),
            FieldType::Cnpj => (
                format!("CNPJ inválido em {}", label),
                "CNPJ deve conter 14 dígitos".to_string(),
            ),
            FieldType::Email => (
                format!("Email inválido em {}", label),
                "Use formato válido: usuario@dominio.com".to_string(),
            ),
            expected => (
                format!(
                    "Tipo inválido em {}: esperado {}, encontrado {}",
                    label,
                    expected,
                    value.type_name()
                ),
                format!("Informe um valor do tipo {}", expected),
            ),
        };

        Some(
            ValidationError::new(&spec.name, path, message, severity_for(spec))
                .with_suggestion(suggestion)
                .with_value(value.clone())
                .with_expected_type(spec.field_type.as_str()),
        )
    }

    /// Checks that a schema definition is well-formed.
    ///
    /// Reports an empty schema, empty or duplicate sibling names, invalid
    /// regex patterns, inverted bounds, empty allowed-value lists, and child
    /// fields declared on non-container types.
    pub fn validate_schema_definition(&self, schema: &FilingSchema) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if schema.fields.is_empty() {
            errors.push(definition_error("", "", "Schema has no fields defined"));
        }

        if let Some(window) = &schema.fiscal_window {
            if window.min_year > window.max_year {
                errors.push(definition_error(
                    "fiscal_window",
                    "fiscal_window",
                    format!(
                        "Inverted fiscal window: min_year {} > max_year {}",
                        window.min_year, window.max_year
                    ),
                ));
            }
            if window.tolerance_years > FiscalWindow::MAX_TOLERANCE_YEARS {
                errors.push(definition_error(
                    "fiscal_window",
                    "fiscal_window.tolerance_years",
                    format!(
                        "Fiscal window tolerance of {} years exceeds the maximum of {}",
                        window.tolerance_years,
                        FiscalWindow::MAX_TOLERANCE_YEARS
                    ),
                ));
            }
        }

        check_fields(&schema.fields, "", &mut errors);

        for error in &errors {
            warn!(path = %error.path, "{}", error.message);
        }

        errors
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if the value has the declared type.
pub fn type_matches(field_type: FieldType, value: &DocValue) -> bool {
    match field_type {
        FieldType::String => matches!(value, DocValue::String(_)),
        FieldType::Number => value.is_number(),
        FieldType::Integer => value.as_i64().is_some(),
        FieldType::Boolean => matches!(value, DocValue::Bool(_)),
        FieldType::Date => value.as_str().is_some_and(is_calendar_date),
        FieldType::Document => value
            .as_str()
            .is_some_and(|s| is_digits(s, 11) || is_digits(s, 14)),
        FieldType::Cpf => value.as_str().is_some_and(|s| is_digits(s, 11)),
        FieldType::Cnpj => value.as_str().is_some_and(|s| is_digits(s, 14)),
        FieldType::Email => value.as_str().is_some_and(|s| s.validate_email()),
        FieldType::Object => matches!(value, DocValue::Object(_)),
        FieldType::Array => matches!(value, DocValue::Array(_)),
        FieldType::Any => true,
    }
}

/// Parses a canonical `YYYY-MM-DD` string that names a real calendar day.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    if !is_canonical_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn is_calendar_date(value: &str) -> bool {
    parse_calendar_date(value).is_some()
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

fn severity_for(spec: &FieldSpec) -> Severity {
    if spec.required {
        Severity::Error
    } else {
        Severity::Warning
    }
}

fn definition_error(
    field: &str,
    path: &str,
    message: impl Into<String>,
) -> ValidationError {
    ValidationError::error(field, path, message)
}

fn check_fields(fields: &[FieldSpec], parent: &str, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();

    for field in fields {
        let path = child_path(parent, &field.name);

        if field.name.trim().is_empty() {
            errors.push(definition_error(&field.name, &path, "Field name is empty"));
        }

        if !seen.insert(field.name.as_str()) {
            errors.push(definition_error(
                &field.name,
                &path,
                format!("Duplicate field name: {}", field.name),
            ));
        }

        if !field.fields.is_empty() && !field.field_type.is_container() {
            errors.push(definition_error(
                &field.name,
                &path,
                format!(
                    "Field of type {} cannot declare child fields",
                    field.field_type
                ),
            ));
        }

        for constraint in field.constraint_list() {
            if let Some(message) = check_constraint(constraint) {
                errors.push(definition_error(&field.name, &path, message));
            }
        }

        check_fields(&field.fields, &path, errors);
    }
}

fn check_constraint(constraint: &FieldConstraint) -> Option<String> {
    match constraint {
        FieldConstraint::AllowedValues { values } if values.is_empty() => {
            Some("AllowedValues constraint has no values".to_string())
        }
        FieldConstraint::Range {
            min: Some(min),
            max: Some(max),
        } if min > max => Some(format!("Inverted range: min {} > max {}", min, max)),
        FieldConstraint::Length {
            min: Some(min),
            max: Some(max),
        } if min > max => Some(format!("Inverted length: min {} > max {}", min, max)),
        FieldConstraint::Pattern { regex } => Regex::new(regex)
            .err()
            .map(|e| format!("Invalid regex pattern '{}': {}", regex, e)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audesp_core::{FieldSpecBuilder, SchemaBuilder};

    fn spec(name: &str, field_type: FieldType, required: bool) -> FieldSpec {
        FieldSpecBuilder::new(name, field_type)
            .required(required)
            .build()
    }

    #[test]
    fn test_type_matches_scalars() {
        assert!(type_matches(FieldType::String, &DocValue::from("x")));
        assert!(!type_matches(FieldType::String, &DocValue::Int(1)));
        assert!(type_matches(FieldType::Number, &DocValue::Int(1)));
        assert!(type_matches(FieldType::Number, &DocValue::Float(1.5)));
        assert!(!type_matches(FieldType::Number, &DocValue::from("1")));
        assert!(type_matches(FieldType::Integer, &DocValue::Int(2024)));
        assert!(type_matches(FieldType::Integer, &DocValue::Float(2024.0)));
        assert!(!type_matches(FieldType::Integer, &DocValue::Float(2024.5)));
        assert!(type_matches(FieldType::Boolean, &DocValue::Bool(false)));
        assert!(type_matches(FieldType::Any, &DocValue::Null));
    }

    #[test]
    fn test_type_matches_formats() {
        assert!(type_matches(FieldType::Date, &DocValue::from("2024-02-29")));
        assert!(!type_matches(FieldType::Date, &DocValue::from("2023-02-29")));
        assert!(!type_matches(FieldType::Date, &DocValue::from("29/02/2024")));
        assert!(!type_matches(FieldType::Date, &DocValue::from("2024-2-9")));

        assert!(type_matches(FieldType::Document, &DocValue::from("52998224725")));
        assert!(type_matches(FieldType::Document, &DocValue::from("12345678000195")));
        assert!(!type_matches(FieldType::Document, &DocValue::from("123")));
        assert!(!type_matches(FieldType::Cpf, &DocValue::from("529.982.247-25")));
        assert!(type_matches(FieldType::Cnpj, &DocValue::from("12345678000195")));
        assert!(!type_matches(FieldType::Cnpj, &DocValue::Int(12345678000195)));

        assert!(type_matches(FieldType::Email, &DocValue::from("contato@prefeitura.sp.gov.br")));
        assert!(!type_matches(FieldType::Email, &DocValue::from("sem-arroba")));
    }

    #[test]
    fn test_missing_field_finding() {
        let validator = SchemaValidator::new();
        let finding = validator.missing_field(
            &spec("valor_total", FieldType::Number, true),
            "contratos[0].valor_total",
        );

        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.field, "valor_total");
        assert_eq!(finding.message, "Campo obrigatório vazio: Valor Total");
        assert_eq!(finding.suggestion.as_deref(), Some("Preencha o campo Valor Total"));
        assert_eq!(finding.expected_type.as_deref(), Some("number"));
    }

    #[test]
    fn test_type_severity_follows_required() {
        let validator = SchemaValidator::new();
        let value = DocValue::from("dois mil");

        let required = validator
            .check_type(&spec("ano", FieldType::Integer, true), &value, "descritor.ano")
            .unwrap();
        assert_eq!(required.severity, Severity::Error);
        assert_eq!(required.value, Some(value.clone()));

        let optional = validator
            .check_type(&spec("ano", FieldType::Integer, false), &value, "descritor.ano")
            .unwrap();
        assert_eq!(optional.severity, Severity::Warning);

        assert!(
            validator
                .check_type(&spec("ano", FieldType::Integer, true), &DocValue::Int(2024), "ano")
                .is_none()
        );
    }

    #[test]
    fn test_valid_definition() {
        let schema = SchemaBuilder::new("prestacao", "1.9")
            .field(
                FieldSpecBuilder::new("descritor", FieldType::Object)
                    .required(true)
                    .child(spec("ano", FieldType::Integer, true))
                    .build(),
            )
            .build();

        assert!(SchemaValidator::new().validate_schema_definition(&schema).is_empty());
    }

    #[test]
    fn test_empty_definition() {
        let schema = SchemaBuilder::new("vazio", "1.0").build();
        let errors = SchemaValidator::new().validate_schema_definition(&schema);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Schema has no fields defined");
    }

    #[test]
    fn test_definition_mistakes() {
        let schema = SchemaBuilder::new("quebrado", "1.0")
            .field(spec("ano", FieldType::Integer, true))
            .field(spec("ano", FieldType::Integer, false))
            .field(
                FieldSpecBuilder::new("mes", FieldType::Integer)
                    .constraint(FieldConstraint::Range {
                        min: Some(12.0),
                        max: Some(1.0),
                    })
                    .child(spec("dia", FieldType::Integer, false))
                    .build(),
            )
            .field(
                FieldSpecBuilder::new("contratos", FieldType::Array)
                    .child(
                        FieldSpecBuilder::new("numero", FieldType::String)
                            .constraint(FieldConstraint::Pattern {
                                regex: "[0-9+".to_string(),
                            })
                            .constraint(FieldConstraint::Length {
                                min: Some(5),
                                max: Some(2),
                            })
                            .build(),
                    )
                    .build(),
            )
            .fiscal_window(FiscalWindow {
                min_year: 2030,
                max_year: 2020,
                ..FiscalWindow::default()
            })
            .build();

        let errors = SchemaValidator::new().validate_schema_definition(&schema);
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();

        assert_eq!(errors.len(), 6, "{:?}", messages);
        assert!(messages.iter().any(|m| m.starts_with("Inverted fiscal window")));
        assert!(messages.contains(&"Duplicate field name: ano"));
        assert!(messages.contains(&"Inverted range: min 12 > max 1"));
        assert!(messages.contains(&"Field of type integer cannot declare child fields"));
        assert!(messages.contains(&"Inverted length: min 5 > max 2"));
        assert!(
            errors
                .iter()
                .any(|e| e.path == "contratos.numero" && e.message.starts_with("Invalid regex"))
        );
    }

    #[test]
    fn test_excessive_tolerance() {
        let schema = |tolerance_years| {
            SchemaBuilder::new("prestacao", "1.9")
                .field(spec("ano", FieldType::Integer, true))
                .fiscal_window(FiscalWindow {
                    tolerance_years,
                    ..FiscalWindow::default()
                })
                .build()
        };
        let validator = SchemaValidator::new();

        assert!(validator.validate_schema_definition(&schema(100)).is_empty());

        let errors = validator.validate_schema_definition(&schema(u32::MAX));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "fiscal_window.tolerance_years");
        assert_eq!(
            errors[0].message,
            "Fiscal window tolerance of 4294967295 years exceeds the maximum of 100"
        );
    }
}
