//! Shared helpers for coercing loosely-typed upstream values.
//!
//! The Ergast-compatible API serialises every number as a string ("1", "25", "0.5")
//! and omits fields freely. Two layers handle that:
//!
//! - `lenient_string`: a serde adapter that accepts a string, a number or null
//!   so a single odd field never fails a whole record.
//! - `parse_u32` / `parse_points`: coerce those strings into domain integers.

use serde::{Deserialize, Deserializer};

/// Placeholder for values that are not determined yet (e.g. the winner of a
/// weekend that has not finished).
pub(crate) const NOT_AVAILABLE: &str = "N/D";

/// Deserialize a field that may arrive as a string, a number, a bool or null.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Parse a non-negative integer, returning None for missing, blank or non-numeric input.
pub(crate) fn parse_u32(raw: Option<&str>) -> Option<u32> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<u32>().ok())
}

/// Parse a points total. Integer strings are taken as-is; decimal values
/// (half-points races) are truncated. Missing or invalid input yields 0.
pub(crate) fn parse_points(raw: Option<&str>) -> u32 {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };
    if let Ok(v) = s.parse::<u32>() {
        return v;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => {
            tracing::debug!("parse_points truncating fractional value {}", s);
            v.trunc() as u32
        }
        _ => {
            tracing::warn!("parse_points received invalid value '{}', defaulting to 0", s);
            0
        }
    }
}

/// Uppercase the first character of a string, leaving the rest untouched.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join name parts with single spaces, skipping blanks.
pub(crate) fn join_name(parts: &[Option<&str>]) -> Option<String> {
    let joined = parts
        .iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
