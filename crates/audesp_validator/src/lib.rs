//! # AUDESP Filing Validator
//!
//! Validation engine for municipal accountability filings. This crate
//! certifies whether a (normalized) filing is ready for submission to
//! AUDESP, checking it against a declarative `FilingSchema`:
//!
//! - Structural checks (required fields present and non-empty)
//! - Type and format checks (dates, CPF/CNPJ, e-mail, numbers)
//! - Constraint checks (allowed values, ranges, lengths, patterns)
//! - Soft quality checks (zero amounts, implausible years, check digits,
//!   inverted periods, empty sections)
//!
//! It then scores completion and aggregates the findings into a
//! `ValidationResult`.
//!
//! ## Example
//!
//! ```rust
//! use audesp_core::{DocValue, FieldSpecBuilder, FieldType, SchemaBuilder, ValidationContext};
//! use audesp_validator::FilingValidator;
//!
//! let schema = SchemaBuilder::new("prestacao_contas", "1.9")
//!     .field(FieldSpecBuilder::new("valor_total", FieldType::Number).required(true).build())
//!     .build();
//!
//! let filing = DocValue::from(serde_json::json!({"valor_total": 0}));
//! let mut validator = FilingValidator::new();
//!
//! let result = validator.validate(&filing, Some(&schema));
//! assert!(result.is_valid);
//! assert_eq!(result.warnings.len(), 1);
//!
//! let strict = ValidationContext::new().with_strict(true);
//! let result = validator.validate_with_context(&filing, Some(&schema), &strict);
//! assert!(!result.is_valid);
//! ```

mod clock;
mod constraints;
mod documents;
mod engine;
mod quality;
mod schema;
mod scoring;

pub use clock::*;
pub use constraints::*;
pub use documents::*;
pub use engine::*;
pub use quality::*;
pub use schema::*;
pub use scoring::*;
