use anyhow::{Context, Result};
use audesp_core::{FilingSchema, ValidationContext};
use audesp_normalizer::normalize_with_stats;
use audesp_parser::{audesp_schema, load_filing, parse_schema_file};
use audesp_validator::FilingValidator;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::output::{self, OutputFormat};

/// Flags of the `validate` command.
pub struct ValidateOptions {
    pub schema: Option<PathBuf>,
    pub normalize: bool,
    pub strict: bool,
    pub year: Option<i32>,
    pub format: OutputFormat,
}

pub fn execute(input: &Path, options: &ValidateOptions) -> Result<()> {
    info!("Validating filing: {}", input.display());
    info!("Strict mode: {}", options.strict);

    let text = options.format == OutputFormat::Text;
    let schema = load_schema(options.schema.as_deref())?;
    if text {
        output::print_info(&format!("Schema loaded: {} v{}", schema.name, schema.version));
    }

    let mut filing = load_filing(input)
        .with_context(|| format!("Failed to read filing: {}", input.display()))?;

    if options.normalize {
        let (normalized, stats) = normalize_with_stats(&filing);
        if text {
            output::print_normalize_stats(&stats);
        }
        filing = normalized;
    }

    let mut context = ValidationContext::new().with_strict(options.strict);
    if let Some(year) = options.year {
        context = context.with_reference_year(year);
    }

    let mut validator = FilingValidator::new();
    let result = validator.validate_with_context(&filing, Some(&schema), &context);

    output::print_validation_report(&result, options.format)?;

    if !result.is_valid {
        if text {
            output::print_error(&format!(
                "Filing is not ready for submission ({} errors)",
                result.errors.len()
            ));
        }
        std::process::exit(1);
    }

    Ok(())
}

fn load_schema(path: Option<&Path>) -> Result<FilingSchema> {
    match path {
        Some(path) => parse_schema_file(path)
            .with_context(|| format!("Failed to parse schema file: {}", path.display())),
        None => audesp_schema().context("Failed to load the bundled AUDESP schema"),
    }
}
