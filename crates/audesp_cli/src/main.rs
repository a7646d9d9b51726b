mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "audesp")]
#[command(version, about = "AUDESP filing normalizer and validator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize dates, amounts and documents of a filing
    Normalize {
        /// Path to the filing (JSON)
        input: PathBuf,

        /// Output file or directory (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a filing against a schema
    Validate {
        /// Path to the filing (JSON)
        input: PathBuf,

        /// Schema file (YAML, TOML or JSON); defaults to the bundled AUDESP v1.9 schema
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Normalize the filing before validating it
        #[arg(short, long)]
        normalize: bool,

        /// Enable strict validation mode (warnings become errors)
        #[arg(short, long)]
        strict: bool,

        /// Reference fiscal year (defaults to the filing's own year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check a schema definition without validating a filing
    Check {
        /// Path to the schema file (YAML, TOML or JSON)
        schema: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr so normalized output on stdout stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Normalize { input, output } => {
            commands::normalize::execute(&input, output.as_deref())
        }

        Commands::Validate {
            input,
            schema,
            normalize,
            strict,
            year,
            format,
        } => {
            let options = commands::validate::ValidateOptions {
                schema,
                normalize,
                strict,
                year,
                format,
            };
            commands::validate::execute(&input, &options)
        }

        Commands::Check { schema, format } => commands::check::execute(&schema, format),
    }
}
