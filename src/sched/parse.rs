//! Parser for inline `key=weight,key=weight` item lists.

use std::num::ParseIntError;

/// Errors produced while parsing an inline item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The entry has no `=` between the item and its weight.
    MissingSeparator { entry: String },

    /// The weight segment is not a valid integer.
    InvalidWeight {
        entry: String,
        source: ParseIntError,
    },
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::MissingSeparator { .. } => None,
            ParseError::InvalidWeight { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingSeparator { entry } => {
                write!(f, "entry '{entry}' is not of the form 'item=weight'")
            }
            ParseError::InvalidWeight { entry, source } => {
                write!(f, "invalid weight in entry '{entry}': {source}")
            }
        }
    }
}

/// Lazily parses `source` into `(item, weight)` pairs, left to right.
///
/// Each entry yields its own result so that callers can apply the pairs that
/// precede a malformed entry before stopping on it.
pub(crate) fn entries(source: &str) -> impl Iterator<Item = Result<(&str, i64), ParseError>> {
    source.split(',').map(|entry| {
        // Segments after a second '=' are ignored.
        let mut parts = entry.split('=');
        let item = parts.next().unwrap_or_default();
        let weight = parts.next().ok_or_else(|| ParseError::MissingSeparator {
            entry: entry.trim().to_owned(),
        })?;

        let weight = weight
            .trim()
            .parse()
            .map_err(|source| ParseError::InvalidWeight {
                entry: entry.trim().to_owned(),
                source,
            })?;

        Ok((item.trim(), weight))
    })
}
