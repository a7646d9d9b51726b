//! Main validation engine.
//!
//! This module provides the `FilingValidator` that walks a filing against
//! its schema and orchestrates the structural, type, constraint and soft
//! quality checks, then scores completion and aggregates the findings.

use crate::{
    Clock, Completion, ConstraintValidator, QualityValidator, SchemaValidator, SystemClock,
};
use audesp_core::{
    DocMap, DocValue, FieldSpec, FieldType, FilingError, FilingSchema, Severity,
    ValidationContext, ValidationError, ValidationResult, child_path, index_path,
};
use tracing::debug;

/// Validates a filing with a fresh validator and default options.
///
/// `None` as schema yields a valid, empty result.
pub fn validate(tree: &DocValue, schema: Option<&FilingSchema>) -> ValidationResult {
    FilingValidator::new().validate(tree, schema)
}

/// Main validation engine for AUDESP filings.
///
/// Validation never fails: every problem in the filing becomes a
/// `ValidationError` finding in the result. The validator caches compiled
/// patterns, so reuse one per caller.
///
/// # Example
///
/// ```rust
/// use audesp_core::{DocValue, FieldSpecBuilder, FieldType, SchemaBuilder};
/// use audesp_validator::FilingValidator;
///
/// let schema = SchemaBuilder::new("prestacao_contas", "1.9")
///     .field(FieldSpecBuilder::new("municipio", FieldType::String).required(true).build())
///     .field(FieldSpecBuilder::new("entidade", FieldType::String).required(true).build())
///     .build();
///
/// let filing = DocValue::from(serde_json::json!({"municipio": "Campinas"}));
///
/// let mut validator = FilingValidator::new();
/// let result = validator.validate(&filing, Some(&schema));
///
/// assert!(!result.is_valid);
/// assert_eq!(result.errors[0].path, "entidade");
/// assert_eq!(result.completion_percentage, 50.0);
/// ```
pub struct FilingValidator {
    schema_validator: SchemaValidator,
    constraint_validator: ConstraintValidator,
    clock: Box<dyn Clock>,
}

impl FilingValidator {
    /// Creates a validator timed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Creates a validator timed by the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            schema_validator: SchemaValidator::new(),
            constraint_validator: ConstraintValidator::new(),
            clock: Box::new(clock),
        }
    }

    /// Validates a filing with default options.
    pub fn validate(&mut self, tree: &DocValue, schema: Option<&FilingSchema>) -> ValidationResult {
        self.validate_with_context(tree, schema, &ValidationContext::new())
    }

    /// Validates a filing against a schema.
    ///
    /// # Arguments
    ///
    /// * `tree` - The filing; a non-object root is read as an empty object
    /// * `schema` - The expected shape; `None` yields a valid, empty result
    /// * `context` - Strictness and reference fiscal year
    ///
    /// # Returns
    ///
    /// A `ValidationResult` with errors, warnings, suggestions, the
    /// completion percentage and the elapsed time.
    pub fn validate_with_context(
        &mut self,
        tree: &DocValue,
        schema: Option<&FilingSchema>,
        context: &ValidationContext,
    ) -> ValidationResult {
        let start = self.clock.now_ms();

        let Some(schema) = schema else {
            return ValidationResult::empty(self.elapsed_since(start));
        };

        let empty = DocMap::new();
        let root = tree.as_object().unwrap_or(&empty);

        let window = schema.fiscal_window_or_default();
        let reference_year = context.reference_year.or_else(|| {
            window
                .year_field
                .as_deref()
                .and_then(|path| tree.get_path(path))
                .and_then(DocValue::as_i64)
                .and_then(|year| i32::try_from(year).ok())
        });
        let (min_year, max_year) = window.bounds(reference_year);

        let mut pass = Pass {
            schema: &self.schema_validator,
            constraints: &mut self.constraint_validator,
            quality: QualityValidator::new(min_year, max_year),
            strict: context.strict,
            findings: Vec::new(),
            completion: Completion::default(),
        };
        pass.check_fields(&schema.fields, Some(root), "");
        pass.check_date_pairs(&schema.fields, root, "");

        let Pass {
            findings,
            completion,
            ..
        } = pass;

        let error_count = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let summary = completion.summary_suggestions(error_count);
        let duration = self.elapsed_since(start);

        debug!(
            schema = %schema.name,
            findings = findings.len(),
            errors = error_count,
            required = completion.required,
            satisfied = completion.satisfied,
            duration_ms = duration,
            "Validation complete"
        );

        ValidationResult::aggregate(findings, summary, completion.percentage(), duration)
    }

    /// Checks a schema definition for mistakes (no filing involved).
    ///
    /// Useful for checking that a schema is well-formed before validating
    /// filings against it.
    pub fn validate_definition(&self, schema: &FilingSchema) -> Vec<ValidationError> {
        self.schema_validator.validate_schema_definition(schema)
    }

    /// Like `validate_definition`, folded into a `Result`.
    pub fn check_definition(&self, schema: &FilingSchema) -> audesp_core::Result<()> {
        let errors = self.validate_definition(schema);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FilingError::SchemaDefinition(
                errors
                    .iter()
                    .map(|e| match e.path.as_str() {
                        "" => e.message.clone(),
                        path => format!("{}: {}", path, e.message),
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ))
        }
    }

    fn elapsed_since(&self, start: f64) -> f64 {
        (self.clock.now_ms() - start).max(0.0)
    }
}

impl Default for FilingValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// State of a single validation pass.
struct Pass<'a> {
    schema: &'a SchemaValidator,
    constraints: &'a mut ConstraintValidator,
    quality: QualityValidator,
    strict: bool,
    findings: Vec<ValidationError>,
    completion: Completion,
}

impl Pass<'_> {
    /// Checks the fields of one object; `None` means the object itself is
    /// absent, so only its required fields are reported.
    fn check_fields(&mut self, specs: &[FieldSpec], object: Option<&DocMap>, parent: &str) {
        for spec in specs {
            let path = child_path(parent, &spec.name);
            let value = object
                .and_then(|map| map.get(&spec.name))
                .filter(|value| !value.is_blank());

            match value {
                Some(value) => self.check_value(spec, value, &path),
                None => self.report_missing(spec, &path),
            }
        }
    }

    fn report_missing(&mut self, spec: &FieldSpec, path: &str) {
        if !spec.required {
            return;
        }

        self.completion.required += 1;
        self.completion.missing += 1;
        self.findings.push(self.schema.missing_field(spec, path));
        self.report_missing_children(spec, path);
    }

    /// Reports the required descendants of a required container that is
    /// absent or unusable. Item fields of an array are reported once, under
    /// `<path>[]`.
    fn report_missing_children(&mut self, spec: &FieldSpec, path: &str) {
        match spec.field_type {
            FieldType::Object => self.check_fields(&spec.fields, None, path),
            FieldType::Array => {
                let items_path = format!("{}[]", path);
                self.check_fields(&spec.fields, None, &items_path);
            }
            _ => {}
        }
    }

    fn check_value(&mut self, spec: &FieldSpec, value: &DocValue, path: &str) {
        if spec.required {
            self.completion.required += 1;
        }

        if let Some(mismatch) = self.schema.check_type(spec, value, path) {
            self.findings.push(mismatch);
            if spec.required {
                self.report_missing_children(spec, path);
            }
            return;
        }

        let report = self.constraints.validate(spec, value, path);
        let passed = report.passed();
        self.findings.extend(report.violations);
        self.findings.extend(report.schema_issues);

        if passed && spec.required {
            self.completion.satisfied += 1;
        }

        match (spec.field_type, value) {
            (FieldType::Object, DocValue::Object(map)) => {
                self.check_fields(&spec.fields, Some(map), path);
                self.check_date_pairs(&spec.fields, map, path);
            }
            (FieldType::Array, DocValue::Array(items)) => self.check_items(spec, items, path),
            _ if passed => {
                let soft = self.quality.check_leaf(spec, value, path);
                self.push_soft(soft);
            }
            _ => {}
        }
    }

    fn check_items(&mut self, spec: &FieldSpec, items: &[DocValue], path: &str) {
        if items.is_empty() {
            let note = self.quality.check_empty_array(spec, path);
            self.findings.push(note);
            return;
        }

        if spec.fields.is_empty() {
            return;
        }

        for (i, item) in items.iter().enumerate() {
            let item_path = index_path(path, i);
            match item {
                DocValue::Object(map) => {
                    self.check_fields(&spec.fields, Some(map), &item_path);
                    self.check_date_pairs(&spec.fields, map, &item_path);
                }
                other => {
                    let severity = if spec.required {
                        Severity::Error
                    } else {
                        Severity::Warning
                    };
                    self.findings.push(
                        ValidationError::new(
                            &spec.name,
                            item_path,
                            format!(
                                "Item inválido em {}: esperado object, encontrado {}",
                                spec.display_label(),
                                other.type_name()
                            ),
                            severity,
                        )
                        .with_value(other.clone())
                        .with_expected_type(FieldType::Object.as_str()),
                    );
                }
            }
        }
    }

    fn check_date_pairs(&mut self, specs: &[FieldSpec], map: &DocMap, path: &str) {
        let soft = self.quality.check_date_pairs(specs, map, path);
        self.push_soft(soft);
    }

    /// Records soft findings, promoting warnings to errors in strict mode.
    fn push_soft(&mut self, findings: Vec<ValidationError>) {
        let strict = self.strict;
        self.findings.extend(findings.into_iter().map(|finding| {
            if strict && finding.severity == Severity::Warning {
                finding.with_severity(Severity::Error)
            } else {
                finding
            }
        }));
    }
}
