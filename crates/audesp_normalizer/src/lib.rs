//! # AUDESP Filing Normalizer
//!
//! Rewrites the loosely formatted values found in a municipal accountability
//! filing into the canonical formats the AUDESP portal accepts:
//!
//! - Identity documents (CPF / CNPJ) keep their digits only
//! - Dates written as `D/M/YYYY` become `YYYY-MM-DD`
//! - Monetary amounts written as text (`"R$ 1.234,56"`) become numbers
//!
//! What a value is gets decided by the name of the key holding it, never by
//! its content. Normalization is total and idempotent: it never fails and a
//! second pass changes nothing.
//!
//! ## Example
//!
//! ```rust
//! use audesp_core::DocValue;
//! use audesp_normalizer::{FieldTag, classify_key, normalize};
//!
//! assert_eq!(classify_key("data_pagamento"), FieldTag::Date);
//!
//! let raw = DocValue::from(serde_json::json!({"pagamentos": [{"valor_pago": "1.000,00"}]}));
//! let clean = normalize(&raw);
//! assert_eq!(clean.get_path("pagamentos.0.valor_pago"), Some(&DocValue::Float(1000.0)));
//! ```

mod classify;
mod normalize;
mod sanitize;

pub use classify::*;
pub use normalize::*;
pub use sanitize::*;
