//! Validation context.
//!
//! Carries the caller-side options of a validation pass. Everything the
//! filing itself must satisfy lives in the schema; this only tunes how
//! findings are weighed.

/// Context for validation operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    /// Promote soft-quality warnings to errors
    pub strict: bool,

    /// Fiscal year the filing refers to; overrides the schema's year field
    pub reference_year: Option<i32>,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict validation mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the reference fiscal year.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }
}
