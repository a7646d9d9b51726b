//! Field classification by key name.
//!
//! The policy is a small ordered table of `(predicate, tag)` pairs. The
//! first matching row wins, so row order encodes priority:
//! identity document > date > money > opaque.

/// Semantic class of a field, derived from its key name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    /// CPF / CNPJ style identifiers
    IdentityDocument,
    /// Calendar dates
    Date,
    /// Monetary amounts
    Money,
    /// Everything else; left untouched
    Opaque,
}

impl FieldTag {
    /// Returns a short name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldTag::IdentityDocument => "identity_document",
            FieldTag::Date => "date",
            FieldTag::Money => "money",
            FieldTag::Opaque => "opaque",
        }
    }
}

/// A syntactic test on a key name. Case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPredicate {
    /// Key contains the substring
    Contains(&'static str),
    /// Key equals the string
    Exact(&'static str),
}

impl KeyPredicate {
    /// Returns true if the key satisfies the predicate.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyPredicate::Contains(needle) => key.contains(needle),
            KeyPredicate::Exact(expected) => key == *expected,
        }
    }
}

/// Classification rules in priority order.
pub const CLASSIFICATION_RULES: &[(KeyPredicate, FieldTag)] = &[
    (KeyPredicate::Contains("cpf"), FieldTag::IdentityDocument),
    (KeyPredicate::Contains("cnpj"), FieldTag::IdentityDocument),
    (KeyPredicate::Exact("documento_numero"), FieldTag::IdentityDocument),
    (KeyPredicate::Contains("data"), FieldTag::Date),
    (KeyPredicate::Exact("vigencia_data_inicial"), FieldTag::Date),
    (KeyPredicate::Exact("vigencia_data_final"), FieldTag::Date),
    (KeyPredicate::Contains("valor"), FieldTag::Money),
    (KeyPredicate::Contains("saldo"), FieldTag::Money),
    (KeyPredicate::Contains("remuneracao"), FieldTag::Money),
    (KeyPredicate::Contains("montante"), FieldTag::Money),
];

/// Classifies a key against the default rule table.
pub fn classify_key(key: &str) -> FieldTag {
    classify_with(CLASSIFICATION_RULES, key)
}

/// Classifies a key against an arbitrary rule table; first match wins.
pub fn classify_with(rules: &[(KeyPredicate, FieldTag)], key: &str) -> FieldTag {
    rules
        .iter()
        .find(|(predicate, _)| predicate.matches(key))
        .map(|(_, tag)| *tag)
        .unwrap_or(FieldTag::Opaque)
}
