//! Lenient readers for field overrides in a JSON object.
//!
//! A missing key or a value of the wrong shape yields the caller's default.
//! Nothing here fails; range checks happen in `FieldParams::validate`.

use crate::color::{Rgba, Srgb};
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only non-negative JSON integers are read. Values wider than `usize`
/// saturate to `usize::MAX` so range checks still see them as too large.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
        .unwrap_or(default)
}

/// Extracts a color from `params[name]`, returning `default` if missing,
/// not a string, or not parseable by [`Rgba::parse`].
pub fn param_rgba(params: &Value, name: &str, default: Rgba) -> Rgba {
    params
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| Rgba::parse(s).ok())
        .unwrap_or(default)
}

/// Like [`param_rgba`] but discards alpha; hex strings only.
pub fn param_srgb(params: &Value, name: &str, default: Srgb) -> Srgb {
    params
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| Srgb::from_hex(s).ok())
        .unwrap_or(default)
}
