use anyhow::{Context, Result, bail};
use audesp_parser::parse_schema_file;
use audesp_validator::FilingValidator;
use std::path::Path;
use tracing::info;

use crate::output::{self, OutputFormat};

pub fn execute(schema_path: &Path, format: OutputFormat) -> Result<()> {
    info!("Checking schema: {}", schema_path.display());

    let schema = parse_schema_file(schema_path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path.display()))?;

    let issues = FilingValidator::new().validate_definition(&schema);

    if format == OutputFormat::Text {
        output::print_info(&format!("Schema loaded: {} v{}", schema.name, schema.version));
        if issues.is_empty() {
            output::print_success("Schema definition is valid");
        }
    }
    output::print_definition_report(&schema, &issues, format)?;

    if !issues.is_empty() {
        bail!(
            "Schema definition has {} issue(s): {}",
            issues.len(),
            schema_path.display()
        );
    }

    Ok(())
}
