//! # AUDESP Filing Core
//!
//! Core data structures for the AUDESP filing engine.
//!
//! This crate provides the building blocks shared by the normalizer and the
//! validator: the filing document tree, the declarative schema a filing is
//! checked against, and the diagnostic model a validation pass produces.
//!
//! ## Key Concepts
//!
//! - **DocValue**: A JSON-compatible document tree (a "prestação de contas" filing)
//! - **FilingSchema**: The expected fields, their types and constraints
//! - **ValidationError**: A single finding with a path, a severity and a suggestion
//! - **ValidationResult**: Errors, warnings, suggestions and a completion score
//!
//! ## Example
//!
//! ```rust
//! use audesp_core::{DocValue, FieldSpecBuilder, FieldType, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new("prestacao_contas", "1.9")
//!     .field(
//!         FieldSpecBuilder::new("descritor", FieldType::Object)
//!             .required(true)
//!             .child(FieldSpecBuilder::new("ano", FieldType::Integer).required(true).build())
//!             .build(),
//!     )
//!     .build();
//!
//! let filing = DocValue::from(serde_json::json!({"descritor": {"ano": 2024}}));
//! assert_eq!(filing.get_path("descritor.ano"), Some(&DocValue::Int(2024)));
//! assert_eq!(schema.required_field_count(), 2);
//! ```

pub mod builder;
pub mod context;
pub mod document;
pub mod error;
pub mod report;
pub mod schema;

pub use builder::*;
pub use context::*;
pub use document::*;
pub use error::*;
pub use report::*;
pub use schema::*;
