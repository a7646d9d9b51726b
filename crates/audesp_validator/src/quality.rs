//! Soft quality checks.
//!
//! These checks flag values that are well-typed but probably wrong:
//! - Monetary fields equal to exactly zero
//! - Dates outside the plausible fiscal-year window
//! - Identity documents with the wrong digit count or bad check digits
//! - Start/end date pairs in the wrong order
//! - Declared sequences with no items
//!
//! They produce warnings (or info for empty sequences) and never block a
//! filing on their own; strict mode promotes them in the engine.

use crate::{is_valid_cnpj, is_valid_cpf, parse_calendar_date};
use audesp_core::{DocMap, DocValue, FieldSpec, FieldType, ValidationError, child_path};
use audesp_normalizer::{FieldTag, classify_key, clean_doc_str};

/// Suffix pairs naming the start and end of a period.
const DATE_PAIR_SUFFIXES: &[(&str, &str)] = &[("_inicio", "_fim"), ("_inicial", "_final")];

/// Runs soft quality checks on well-typed values.
pub struct QualityValidator {
    /// Inclusive plausible year bounds for dates
    year_bounds: (i32, i32),
}

impl QualityValidator {
    /// Creates a quality validator accepting dates within the given years.
    pub fn new(min_year: i32, max_year: i32) -> Self {
        Self {
            year_bounds: (min_year, max_year),
        }
    }

    /// Returns the inclusive year bounds applied to dates.
    pub fn year_bounds(&self) -> (i32, i32) {
        self.year_bounds
    }

    /// Checks a present scalar that already passed type and constraint checks.
    pub fn check_leaf(&self, spec: &FieldSpec, value: &DocValue, path: &str) -> Vec<ValidationError> {
        match leaf_tag(spec) {
            FieldTag::Money => self.check_money(spec, value, path).into_iter().collect(),
            FieldTag::Date => self.check_fiscal_year(spec, value, path).into_iter().collect(),
            FieldTag::IdentityDocument => self.check_document(spec, value, path).into_iter().collect(),
            FieldTag::Opaque => Vec::new(),
        }
    }

    /// Flags a monetary amount of exactly zero.
    fn check_money(&self, spec: &FieldSpec, value: &DocValue, path: &str) -> Option<ValidationError> {
        if !value.is_number() || value.as_f64() != Some(0.0) {
            return None;
        }

        let label = spec.display_label();
        Some(
            ValidationError::warning(&spec.name, path, format!("Valor zerado em {}", label))
                .with_suggestion(format!("Confirme se {} é realmente zero", label))
                .with_value(value.clone()),
        )
    }

    /// Flags a date whose year falls outside the plausible window.
    fn check_fiscal_year(
        &self,
        spec: &FieldSpec,
        value: &DocValue,
        path: &str,
    ) -> Option<ValidationError> {
        use chrono::Datelike;

        let date = value.as_str().and_then(parse_calendar_date)?;
        let (min_year, max_year) = self.year_bounds;
        if (min_year..=max_year).contains(&date.year()) {
            return None;
        }

        Some(
            ValidationError::warning(
                &spec.name,
                path,
                format!(
                    "Data fora do exercício em {}: {}",
                    spec.display_label(),
                    date.format("%Y-%m-%d")
                ),
            )
            .with_suggestion(format!(
                "Use uma data entre {} e {}",
                min_year, max_year
            ))
            .with_value(value.clone()),
        )
    }

    /// Flags identity documents with an unexpected digit count or whose
    /// check digits do not verify.
    fn check_document(
        &self,
        spec: &FieldSpec,
        value: &DocValue,
        path: &str,
    ) -> Option<ValidationError> {
        let digits = clean_doc_str(value.as_str()?);
        let label = spec.display_label();

        let (message, suggestion) = match digits.len() {
            11 if is_valid_cpf(&digits) => return None,
            14 if is_valid_cnpj(&digits) => return None,
            11 => (
                format!("CPF com dígitos verificadores inválidos em {}", label),
                "Confira o número do CPF".to_string(),
            ),
            14 => (
                format!("CNPJ com dígitos verificadores inválidos em {}", label),
                "Confira o número do CNPJ".to_string(),
            ),
            n => (
                format!("Documento com {} dígitos em {}", n, label),
                "CPF tem 11 dígitos e CNPJ tem 14".to_string(),
            ),
        };

        Some(
            ValidationError::warning(&spec.name, path, message)
                .with_suggestion(suggestion)
                .with_value(value.clone()),
        )
    }

    /// Flags `<prefix>_inicio`/`<prefix>_fim` and
    /// `<prefix>_inicial`/`<prefix>_final` pairs where the start is after
    /// the end.
    ///
    /// Only pairs whose two keys are declared in `specs` are compared; other
    /// keys of the object are ignored.
    pub fn check_date_pairs(
        &self,
        specs: &[FieldSpec],
        map: &DocMap,
        path: &str,
    ) -> Vec<ValidationError> {
        let mut findings = Vec::new();

        for spec in specs {
            for (start_suffix, end_suffix) in DATE_PAIR_SUFFIXES {
                let Some(prefix) = spec.name.strip_suffix(start_suffix) else {
                    continue;
                };
                let end_key = format!("{}{}", prefix, end_suffix);
                let Some(end_spec) = specs.iter().find(|s| s.name == end_key) else {
                    continue;
                };

                let Some(value) = map.get(&spec.name) else {
                    continue;
                };
                let start = value.as_str().and_then(parse_calendar_date);
                let end = map
                    .get(&end_key)
                    .and_then(DocValue::as_str)
                    .and_then(parse_calendar_date);

                if matches!((start, end), (Some(start), Some(end)) if start > end) {
                    findings.push(
                        ValidationError::warning(
                            &spec.name,
                            child_path(path, &spec.name),
                            "Data de início não pode ser posterior à data de término",
                        )
                        .with_suggestion(format!(
                            "Confira {} e {}",
                            spec.display_label(),
                            end_spec.display_label()
                        ))
                        .with_value(value.clone()),
                    );
                }
            }
        }

        findings
    }

    /// Notes a declared sequence that holds no items.
    pub fn check_empty_array(&self, spec: &FieldSpec, path: &str) -> ValidationError {
        let label = spec.display_label();
        ValidationError::info(&spec.name, path, format!("Nenhum item informado em {}", label))
            .with_suggestion(format!(
                "Confirme que não há registros de {} no período",
                label
            ))
    }
}

impl Default for QualityValidator {
    fn default() -> Self {
        let (min_year, max_year) = audesp_core::FiscalWindow::default().bounds(None);
        Self::new(min_year, max_year)
    }
}

/// Tag used for soft checks: format types decide first, the key name second.
fn leaf_tag(spec: &FieldSpec) -> FieldTag {
    match spec.field_type {
        FieldType::Date => FieldTag::Date,
        FieldType::Document | FieldType::Cpf | FieldType::Cnpj => FieldTag::IdentityDocument,
        _ => classify_key(&spec.name),
    }
}
