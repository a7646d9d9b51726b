//! The AUDESP v1.9 filing schema shipped with the crate.

use crate::{Result, parse_schema_yaml};
use audesp_core::FilingSchema;

/// Source of the bundled AUDESP v1.9 schema.
pub const AUDESP_SCHEMA_YAML: &str = include_str!("../schemas/audesp_v1_9.yml");

/// Returns the bundled AUDESP v1.9 "prestação de contas" schema.
///
/// # Example
///
/// ```rust
/// let schema = audesp_parser::audesp_schema().unwrap();
/// assert_eq!(schema.version, "1.9");
/// assert!(schema.field("descritor").is_some());
/// ```
pub fn audesp_schema() -> Result<FilingSchema> {
    parse_schema_yaml(AUDESP_SCHEMA_YAML)
}
