//! Schema loader and filing I/O for AUDESP filings.
//!
//! This crate parses filing schemas from YAML, TOML and JSON documents into
//! the strongly-typed `FilingSchema` structure, ships the AUDESP v1.9 schema,
//! and reads and writes filings as JSON.
//!
//! # Example
//!
//! ```rust
//! use audesp_parser::parse_schema_yaml;
//!
//! let yaml = r#"
//! name: prestacao_contas
//! version: "1.9"
//! fields:
//!   - name: descritor
//!     type: object
//!     required: true
//!     fields:
//!       - name: ano
//!         type: integer
//!         required: true
//! "#;
//!
//! let schema = parse_schema_yaml(yaml).expect("Failed to parse schema");
//! assert_eq!(schema.name, "prestacao_contas");
//! assert_eq!(schema.required_field_count(), 2);
//! ```

mod bundled;
mod filing;

pub use bundled::*;
pub use filing::*;

use audesp_core::FilingSchema;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading schemas or filings.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing, deserialization or serialization failed
    #[error("Failed to process JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported schema file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse a schema from a YAML string.
pub fn parse_schema_yaml(content: &str) -> Result<FilingSchema> {
    let schema: FilingSchema = serde_yaml_ng::from_str(content)?;
    Ok(schema)
}

/// Parse a schema from a TOML string.
///
/// # Example
///
/// ```rust
/// use audesp_parser::parse_schema_toml;
///
/// let toml = r#"
/// name = "prestacao_contas"
/// version = "1.9"
///
/// [[fields]]
/// name = "municipio"
/// type = "integer"
/// required = true
///
/// [[fields.constraints]]
/// type = "range"
/// min = 1
/// max = 99999
/// "#;
///
/// let schema = parse_schema_toml(toml).unwrap();
/// assert_eq!(schema.fields[0].constraint_list().len(), 1);
/// ```
pub fn parse_schema_toml(content: &str) -> Result<FilingSchema> {
    let schema: FilingSchema =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(schema)
}

/// Parse a schema from a JSON string.
pub fn parse_schema_json(content: &str) -> Result<FilingSchema> {
    let schema: FilingSchema = serde_json::from_str(content)?;
    Ok(schema)
}

/// Detect the schema format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `SchemaFormat::Yaml`
/// * `.toml` → `SchemaFormat::Toml`
/// * `.json` → `SchemaFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SchemaFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(SchemaFormat::Yaml),
        "toml" => Ok(SchemaFormat::Toml),
        "json" => Ok(SchemaFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema from a file with automatic format detection.
///
/// ```no_run
/// use audesp_parser::parse_schema_file;
/// use std::path::Path;
///
/// let schema = parse_schema_file(Path::new("schemas/audesp_v1_9.yml")).unwrap();
/// println!("Loaded schema: {} v{}", schema.name, schema.version);
/// ```
pub fn parse_schema_file(path: &Path) -> Result<FilingSchema> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "Parsing schema file");

    match format {
        SchemaFormat::Yaml => parse_schema_yaml(&content),
        SchemaFormat::Toml => parse_schema_toml(&content),
        SchemaFormat::Json => parse_schema_json(&content),
    }
}
