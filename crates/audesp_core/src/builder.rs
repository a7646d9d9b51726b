//! Builder pattern for creating filing schemas.
//!
//! This module provides ergonomic builders for constructing schemas
//! and their fields with a fluent API.

use crate::{FieldConstraint, FieldSpec, FieldType, FilingSchema, FiscalWindow};

/// Builder for creating a `FilingSchema`.
///
/// # Example
///
/// ```rust
/// use audesp_core::{FieldSpecBuilder, FieldType, SchemaBuilder};
///
/// let schema = SchemaBuilder::new("prestacao_contas", "1.9")
///     .description("Prestação de contas AUDESP")
///     .field(
///         FieldSpecBuilder::new("descritor", FieldType::Object)
///             .required(true)
///             .child(FieldSpecBuilder::new("ano", FieldType::Integer).required(true).build())
///             .build(),
///     )
///     .build();
///
/// assert_eq!(schema.required_field_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    name: String,
    version: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
    fiscal_window: Option<FiscalWindow>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Schema name
    /// * `version` - Schema version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Sets the schema description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a top-level field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds multiple top-level fields.
    pub fn fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Sets the fiscal window.
    pub fn fiscal_window(mut self, window: FiscalWindow) -> Self {
        self.fiscal_window = Some(window);
        self
    }

    /// Builds the schema.
    pub fn build(self) -> FilingSchema {
        FilingSchema {
            name: self.name,
            version: self.version,
            description: self.description,
            fields: self.fields,
            fiscal_window: self.fiscal_window,
        }
    }
}

/// Builder for creating a `FieldSpec`.
///
/// # Example
///
/// ```rust
/// use audesp_core::{FieldConstraint, FieldSpecBuilder, FieldType};
///
/// let field = FieldSpecBuilder::new("mes", FieldType::Integer)
///     .required(true)
///     .label("Mês")
///     .constraint(FieldConstraint::Range { min: Some(1.0), max: Some(12.0) })
///     .build();
///
/// assert_eq!(field.display_label(), "Mês");
/// ```
#[derive(Debug)]
pub struct FieldSpecBuilder {
    name: String,
    field_type: FieldType,
    required: bool,
    label: Option<String>,
    description: Option<String>,
    constraints: Option<Vec<FieldConstraint>>,
    fields: Vec<FieldSpec>,
}

impl FieldSpecBuilder {
    /// Creates a new field builder. Fields are optional unless marked
    /// otherwise.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            label: None,
            description: None,
            constraints: None,
            fields: Vec::new(),
        }
    }

    /// Sets whether the field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a constraint to the field.
    pub fn constraint(mut self, constraint: FieldConstraint) -> Self {
        self.constraints
            .get_or_insert_with(Vec::new)
            .push(constraint);
        self
    }

    /// Adds a child field (object members or array element members).
    pub fn child(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds multiple child fields.
    pub fn children(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Builds the field.
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            field_type: self.field_type,
            required: self.required,
            label: self.label,
            description: self.description,
            constraints: self.constraints,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder_minimal() {
        let schema = SchemaBuilder::new("test", "1.0").build();

        assert_eq!(schema.name, "test");
        assert_eq!(schema.version, "1.0");
        assert!(schema.description.is_none());
        assert!(schema.fields.is_empty());
        assert!(schema.fiscal_window.is_none());
    }

    #[test]
    fn test_schema_builder_full() {
        let schema = SchemaBuilder::new("prestacao", "1.9")
            .description("Prestação de contas")
            .field(FieldSpecBuilder::new("descritor", FieldType::Object).build())
            .fields(vec![
                FieldSpecBuilder::new("contratos", FieldType::Array).build(),
                FieldSpecBuilder::new("pagamentos", FieldType::Array).build(),
            ])
            .fiscal_window(FiscalWindow {
                year_field: Some("descritor.ano".to_string()),
                ..Default::default()
            })
            .build();

        assert_eq!(schema.description, Some("Prestação de contas".to_string()));
        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.fields[2].name, "pagamentos");
        assert_eq!(
            schema.fiscal_window.unwrap().year_field.as_deref(),
            Some("descritor.ano")
        );
    }

    #[test]
    fn test_field_builder_minimal() {
        let field = FieldSpecBuilder::new("numero", FieldType::String).build();

        assert_eq!(field.name, "numero");
        assert_eq!(field.field_type, FieldType::String);
        assert!(!field.required);
        assert!(field.label.is_none());
        assert!(field.constraints.is_none());
        assert!(field.fields.is_empty());
    }

    #[test]
    fn test_field_builder_multiple_constraints() {
        let field = FieldSpecBuilder::new("objeto", FieldType::String)
            .required(true)
            .description("Objeto do contrato")
            .constraint(FieldConstraint::Length {
                min: Some(3),
                max: Some(500),
            })
            .constraint(FieldConstraint::Pattern {
                regex: r"^\S".to_string(),
            })
            .build();

        assert!(field.required);
        assert_eq!(field.constraint_list().len(), 2);
    }

    #[test]
    fn test_field_builder_children() {
        let field = FieldSpecBuilder::new("contratos", FieldType::Array)
            .child(FieldSpecBuilder::new("numero", FieldType::String).build())
            .children(vec![
                FieldSpecBuilder::new("valor_total", FieldType::Number).build(),
            ])
            .build();

        assert_eq!(field.fields.len(), 2);
        assert_eq!(field.fields[1].name, "valor_total");
    }
}
