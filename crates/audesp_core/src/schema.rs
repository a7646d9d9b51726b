//! Declarative filing schema.
//!
//! The concrete AUDESP field list is data, not code: a `FilingSchema` is
//! deserialized from a YAML, TOML or JSON document and handed to the
//! validator. Nesting mirrors the filing: object fields declare their
//! children in `fields`, and array fields declare the fields of each element.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A filing schema: the expected shape of a submission-ready document.
///
/// # Example
///
/// ```rust
/// use audesp_core::{FieldType, FilingSchema};
///
/// let schema = FilingSchema {
///     name: "prestacao_contas".to_string(),
///     version: "1.9".to_string(),
///     description: None,
///     fields: vec![],
///     fiscal_window: None,
/// };
/// assert_eq!(schema.required_field_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingSchema {
    /// Schema name (e.g., "audesp_prestacao_contas")
    pub name: String,

    /// Schema version (e.g., "1.9")
    pub version: String,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Top-level field definitions
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Plausible window for dates in the filing
    #[serde(default)]
    pub fiscal_window: Option<FiscalWindow>,
}

impl FilingSchema {
    /// Number of unconditionally required fields: required fields whose
    /// containers, up to the root, are all required too. Item fields of a
    /// required array count once.
    ///
    /// A required field inside an optional section only becomes required
    /// when the section is present, so it is not counted.
    pub fn required_field_count(&self) -> usize {
        count_required(&self.fields)
    }

    /// Finds a top-level field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the fiscal window, falling back to the defaults.
    pub fn fiscal_window_or_default(&self) -> FiscalWindow {
        self.fiscal_window.clone().unwrap_or_default()
    }
}

fn count_required(fields: &[FieldSpec]) -> usize {
    fields
        .iter()
        .filter(|f| f.required)
        .map(|f| 1 + count_required(&f.fields))
        .sum()
}

/// A single field definition in a filing schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key name in the document tree
    pub name: String,

    /// Expected value type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field must be present and non-empty
    #[serde(default)]
    pub required: bool,

    /// Label used in diagnostics; derived from the name when absent
    #[serde(default)]
    pub label: Option<String>,

    /// Optional human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional validation constraints
    #[serde(default)]
    pub constraints: Option<Vec<FieldConstraint>>,

    /// Child fields (object) or element fields (array)
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl FieldSpec {
    /// Returns the display label of the field.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| humanize_field(&self.name))
    }

    /// Returns the constraints of the field, if any.
    pub fn constraint_list(&self) -> &[FieldConstraint] {
        self.constraints.as_deref().unwrap_or(&[])
    }
}

/// Value types a schema field can expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Any string
    String,
    /// Integer or float
    Number,
    /// Whole number
    Integer,
    /// Boolean
    Boolean,
    /// Canonical `YYYY-MM-DD` calendar date
    Date,
    /// Identity document: 11 (CPF) or 14 (CNPJ) digits
    Document,
    /// Individual taxpayer number: 11 digits
    Cpf,
    /// Entity registration number: 14 digits
    Cnpj,
    /// E-mail address
    Email,
    /// Nested mapping
    Object,
    /// Sequence
    Array,
    /// Anything goes
    Any,
}

impl FieldType {
    /// Returns the schema name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Document => "document",
            FieldType::Cpf => "cpf",
            FieldType::Cnpj => "cnpj",
            FieldType::Email => "email",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Any => "any",
        }
    }

    /// Returns true for types that hold child fields.
    pub fn is_container(&self) -> bool {
        matches!(self, FieldType::Object | FieldType::Array)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation constraints that can be applied to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldConstraint {
    /// Field value must be one of the allowed values
    AllowedValues {
        /// List of valid values
        values: Vec<String>,
    },

    /// Numeric field must be within the bounds (inclusive)
    Range {
        /// Minimum value
        #[serde(default)]
        min: Option<f64>,
        /// Maximum value
        #[serde(default)]
        max: Option<f64>,
    },

    /// String length (in characters) must be within the bounds
    Length {
        /// Minimum length
        #[serde(default)]
        min: Option<usize>,
        /// Maximum length
        #[serde(default)]
        max: Option<usize>,
    },

    /// String value must match the regex pattern
    Pattern {
        /// Regular expression pattern
        regex: String,
    },
}

/// Window of plausible years for dates in a filing.
///
/// When a reference year is known (from the validation context or from
/// `year_field`), dates must fall within `tolerance_years` of it. Otherwise
/// they must fall within `[min_year, max_year]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalWindow {
    /// Dotted path of the fiscal year in the document (e.g., "descritor.ano")
    #[serde(default)]
    pub year_field: Option<String>,

    /// Years of slack around the reference year
    #[serde(default = "default_tolerance")]
    pub tolerance_years: u32,

    /// Earliest plausible year without a reference
    #[serde(default = "default_min_year")]
    pub min_year: i32,

    /// Latest plausible year without a reference
    #[serde(default = "default_max_year")]
    pub max_year: i32,
}

fn default_tolerance() -> u32 {
    1
}

fn default_min_year() -> i32 {
    2000
}

fn default_max_year() -> i32 {
    2050
}

impl Default for FiscalWindow {
    fn default() -> Self {
        Self {
            year_field: None,
            tolerance_years: default_tolerance(),
            min_year: default_min_year(),
            max_year: default_max_year(),
        }
    }
}

impl FiscalWindow {
    /// Largest tolerance a schema may declare.
    pub const MAX_TOLERANCE_YEARS: u32 = 100;

    /// Returns the inclusive year bounds for the given reference year.
    ///
    /// Bounds saturate at the ends of the `i32` range.
    pub fn bounds(&self, reference_year: Option<i32>) -> (i32, i32) {
        match reference_year {
            Some(year) => {
                let slack = i32::try_from(self.tolerance_years).unwrap_or(i32::MAX);
                (year.saturating_sub(slack), year.saturating_add(slack))
            }
            None => (self.min_year, self.max_year),
        }
    }
}

/// Turns a key name into a label: `valor_total` → "Valor Total",
/// `dataInicio` → "Data Inicio".
pub fn humanize_field(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch == '_' {
            spaced.push(' ');
        } else if ch.is_uppercase() {
            spaced.push(' ');
            spaced.extend(ch.to_lowercase());
        } else {
            spaced.push(ch);
        }
    }

    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
