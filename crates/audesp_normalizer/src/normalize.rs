//! Recursive tree normalization.
//!
//! Walks a filing depth-first and rewrites identity-document, date and money
//! leaves into canonical form. Shape is preserved: every key and every
//! sequence element survives, in order. A classified key holding a mapping or
//! a sequence is recursed into; scalars inside a sequence take the tag of the
//! key holding the sequence.

use crate::{FieldTag, clean_date, clean_doc, clean_number, classify_key};
use audesp_core::DocValue;
use tracing::{debug, trace};

/// Counts of leaves rewritten by a normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Leaves visited
    pub leaves: usize,
    /// Identity documents rewritten
    pub documents: usize,
    /// Dates rewritten
    pub dates: usize,
    /// Amounts rewritten
    pub amounts: usize,
}

impl NormalizeStats {
    /// Total number of rewritten leaves.
    pub fn rewritten(&self) -> usize {
        self.documents + self.dates + self.amounts
    }
}

/// Normalizes a filing tree.
///
/// # Example
///
/// ```rust
/// use audesp_core::DocValue;
/// use audesp_normalizer::normalize;
///
/// let raw = DocValue::from(serde_json::json!({
///     "fornecedor_cnpj": "12.345.678/0001-95",
///     "data_emissao": "5/3/2024",
///     "valor_bruto": "R$ 1.234,56",
/// }));
///
/// let clean = normalize(&raw);
/// assert_eq!(clean.get("fornecedor_cnpj"), Some(&DocValue::from("12345678000195")));
/// assert_eq!(clean.get("data_emissao"), Some(&DocValue::from("2024-03-05")));
/// assert_eq!(clean.get("valor_bruto"), Some(&DocValue::Float(1234.56)));
/// ```
pub fn normalize(tree: &DocValue) -> DocValue {
    normalize_with_stats(tree).0
}

/// Normalizes a filing tree and reports what was rewritten.
pub fn normalize_with_stats(tree: &DocValue) -> (DocValue, NormalizeStats) {
    let mut stats = NormalizeStats::default();
    let normalized = normalize_node(tree, FieldTag::Opaque, "", &mut stats);

    debug!(
        leaves = stats.leaves,
        documents = stats.documents,
        dates = stats.dates,
        amounts = stats.amounts,
        "Normalization complete"
    );

    (normalized, stats)
}

fn normalize_node(
    value: &DocValue,
    tag: FieldTag,
    path: &str,
    stats: &mut NormalizeStats,
) -> DocValue {
    match value {
        DocValue::Object(map) => DocValue::Object(
            map.iter()
                .map(|(key, child)| {
                    let child_path = audesp_core::child_path(path, key);
                    let normalized = normalize_node(child, classify_key(key), &child_path, stats);
                    (key.clone(), normalized)
                })
                .collect(),
        ),
        DocValue::Array(items) => DocValue::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    normalize_node(item, tag, &audesp_core::index_path(path, i), stats)
                })
                .collect(),
        ),
        leaf => {
            stats.leaves += 1;
            let rewritten = apply_rule(tag, leaf);
            if rewritten != *leaf {
                trace!(path, tag = tag.as_str(), from = %leaf, to = %rewritten, "Rewrote leaf");
                match tag {
                    FieldTag::IdentityDocument => stats.documents += 1,
                    FieldTag::Date => stats.dates += 1,
                    FieldTag::Money => stats.amounts += 1,
                    FieldTag::Opaque => {}
                }
            }
            rewritten
        }
    }
}

/// Applies the leaf rule of a tag to a scalar.
pub fn apply_rule(tag: FieldTag, leaf: &DocValue) -> DocValue {
    match tag {
        FieldTag::IdentityDocument => DocValue::String(clean_doc(leaf)),
        FieldTag::Date => clean_date(leaf),
        FieldTag::Money if leaf.is_number() => leaf.clone(),
        FieldTag::Money => DocValue::Float(clean_number(leaf)),
        FieldTag::Opaque => leaf.clone(),
    }
}
