//! Leaf sanitizers.
//!
//! Each sanitizer rewrites a single leaf into the canonical format AUDESP
//! expects. None of them fails: dates that cannot be read pass through
//! unchanged, amounts that cannot be read become `0`, and identity documents
//! keep their digits only.

use audesp_core::DocValue;
use regex::Regex;
use std::sync::LazyLock;

static CANONICAL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

static BR_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})").expect("valid date regex")
});

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("valid number regex")
});

/// Returns true if the string is already a canonical `YYYY-MM-DD` date.
pub fn is_canonical_date(value: &str) -> bool {
    CANONICAL_DATE.is_match(value)
}

/// Keeps the decimal digits of an identity document.
///
/// Falsy input (null, `false`, `0`, `""`) yields an empty string. Numbers
/// are rendered first, then stripped.
pub fn clean_doc(value: &DocValue) -> String {
    if value.is_falsy() {
        return String::new();
    }
    clean_doc_str(&value.to_plain_string())
}

/// Keeps the decimal digits of a string.
pub fn clean_doc_str(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Rewrites a date leaf to `YYYY-MM-DD`; anything unreadable is returned
/// unchanged.
pub fn clean_date(value: &DocValue) -> DocValue {
    match value {
        DocValue::String(s) => DocValue::String(clean_date_str(s)),
        other => other.clone(),
    }
}

/// Rewrites a `D/M/YYYY` date (day and month may be unpadded) found in the
/// string to `YYYY-MM-DD`.
pub fn clean_date_str(value: &str) -> String {
    if is_canonical_date(value) {
        return value.to_string();
    }

    match BR_DATE.captures(value) {
        Some(caps) => format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]),
        None => value.to_string(),
    }
}

/// Reads a monetary leaf as a number.
///
/// Numbers are returned as-is; null, booleans and unreadable strings yield
/// `0`.
pub fn clean_number(value: &DocValue) -> f64 {
    match value {
        DocValue::Int(i) => *i as f64,
        DocValue::Float(f) => *f,
        DocValue::String(s) => clean_number_str(s),
        _ => 0.0,
    }
}

/// Reads an amount such as `"R$ 1.234,56"` or `"1234.56"`.
///
/// A string with a comma and without `US` is taken as Brazilian notation:
/// dots are thousands separators and the first comma is the decimal point.
/// Everything but digits, `.` and `-` is then dropped and the longest
/// leading number is parsed. Failure and non-finite results yield `0`.
pub fn clean_number_str(value: &str) -> f64 {
    let converted = if value.contains(',') && !value.contains("US") {
        value.replace('.', "").replacen(',', ".", 1)
    } else {
        value.to_string()
    };

    let stripped: String = converted
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    LEADING_FLOAT
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
