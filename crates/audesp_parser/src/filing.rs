//! Reading and writing filings as JSON.
//!
//! Filings travel as plain JSON. Reading keeps integers and floats apart, so
//! writing a filing and reading it back yields the same tree.

use crate::Result;
use audesp_core::DocValue;
use std::path::Path;
use tracing::debug;

/// Filename used when the descriptor does not identify the filing.
pub const FALLBACK_FILENAME: &str = "prestacao_contas.json";

/// Parses a filing from a JSON string.
pub fn read_filing(content: &str) -> Result<DocValue> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(DocValue::from(value))
}

/// Serializes a filing as pretty-printed JSON.
pub fn write_filing(filing: &DocValue) -> Result<String> {
    Ok(serde_json::to_string_pretty(filing)?)
}

/// Reads a filing from a JSON file.
pub fn load_filing(path: &Path) -> Result<DocValue> {
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Loaded filing");
    read_filing(&content)
}

/// Writes a filing to a JSON file, followed by a newline.
pub fn save_filing(path: &Path, filing: &DocValue) -> Result<()> {
    let mut content = write_filing(filing)?;
    content.push('\n');
    std::fs::write(path, content)?;
    debug!(path = %path.display(), "Saved filing");
    Ok(())
}

/// Suggested filename for a filing:
/// `prestacao_contas_<entidade>_<mes>_<ano>.json`, taken from `descritor`.
///
/// Falls back to `prestacao_contas.json` when any part is missing.
///
/// # Example
///
/// ```rust
/// use audesp_core::DocValue;
/// use audesp_parser::default_filename;
///
/// let filing = DocValue::from(serde_json::json!({
///     "descritor": {"entidade": 1234, "mes": 3, "ano": 2024}
/// }));
/// assert_eq!(default_filename(&filing), "prestacao_contas_1234_3_2024.json");
/// ```
pub fn default_filename(filing: &DocValue) -> String {
    let part = |key: &str| {
        filing
            .get_path(&format!("descritor.{}", key))
            .filter(|value| !value.is_blank())
            .filter(|value| value.as_object().is_none() && value.as_array().is_none())
            .map(|value| sanitize_component(&value.to_plain_string()))
    };

    match (part("entidade"), part("mes"), part("ano")) {
        (Some(entidade), Some(mes), Some(ano)) => {
            format!("prestacao_contas_{}_{}_{}.json", entidade, mes, ano)
        }
        _ => FALLBACK_FILENAME.to_string(),
    }
}

fn sanitize_component(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
