use anyhow::Result;
use audesp_core::{FilingSchema, ValidationError, ValidationResult};
use audesp_normalizer::NormalizeStats;
use clap::ValueEnum;
use colored::*;
use serde_json::json;

/// Report rendering selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_validation_report(result: &ValidationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", result.to_json_pretty()?),
        OutputFormat::Text => print_text_report(result),
    }
    Ok(())
}

fn print_text_report(result: &ValidationResult) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if result.is_valid {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        print_findings(&result.errors, |line| line.red());
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        print_findings(&result.warnings, |line| line.yellow());
    }

    if !result.suggestions.is_empty() {
        println!("\n{}", "Suggestions:".blue().bold());
        for suggestion in &result.suggestions {
            println!("  • {}", suggestion);
        }
    }

    let sections = result.section_summary();
    if !sections.is_empty() {
        println!("\n{}", "Sections:".bold());
        for (section, summary) in &sections {
            let mark = if summary.valid {
                "✓".green()
            } else {
                "✗".red()
            };
            println!(
                "  {} {:<24} {} errors, {} warnings",
                mark, section, summary.error_count, summary.warning_count
            );
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Completion:     {:.1}%", result.completion_percentage);
    println!("  Total errors:   {}", result.errors.len());
    println!("  Total warnings: {}", result.warnings.len());
    println!("  Duration:       {:.2} ms", result.duration);
    println!("{}", "═".repeat(60));
}

fn print_findings(findings: &[ValidationError], paint: impl Fn(&str) -> ColoredString) {
    for (i, finding) in findings.iter().enumerate() {
        println!("  {}. {}", i + 1, paint(&finding.to_string()));
        if let Some(suggestion) = &finding.suggestion {
            println!("     → {}", suggestion.dimmed());
        }
    }
}

pub fn print_definition_report(
    schema: &FilingSchema,
    issues: &[ValidationError],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "schema": schema.name,
                "version": schema.version,
                "valid": issues.is_empty(),
                "requiredFields": schema.required_field_count(),
                "issues": issues,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("\nSchema Summary:");
            println!("  Name:            {}", schema.name);
            println!("  Version:         {}", schema.version);
            println!(
                "  Description:     {}",
                schema.description.as_deref().unwrap_or("N/A")
            );
            println!("  Sections:        {}", schema.fields.len());
            println!("  Required fields: {}", schema.required_field_count());
            if let Some(window) = &schema.fiscal_window {
                let (min_year, max_year) = window.bounds(None);
                println!("  Fiscal window:   {} to {}", min_year, max_year);
            }

            if !issues.is_empty() {
                println!("\n{}", "Definition issues:".red().bold());
                print_findings(issues, |line| line.red());
            }
        }
    }
    Ok(())
}

pub fn print_normalize_stats(stats: &NormalizeStats) {
    print_info(&format!(
        "Normalized {} leaves: {} documents, {} dates, {} amounts",
        stats.leaves, stats.documents, stats.dates, stats.amounts
    ));
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
