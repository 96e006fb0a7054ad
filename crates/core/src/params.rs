//! Parameter normalization and form encoding
//!
//! Callers hand the client a mix of text, raw bytes and numbers. Everything
//! goes through [`normalize`] before it reaches the wire so byte values are
//! sent as their UTF-8 text rather than a debug rendering of the buffer.

use sheerid_domain::{ParamValue, Params, Result, SheerIdError};
use url::form_urlencoded;

/// Coerce every byte-valued parameter to UTF-8 text.
///
/// Text and finite numeric values pass through untouched. Order and
/// repeated keys are preserved; an empty map stays empty.
///
/// # Errors
/// Returns `SheerIdError::Encoding` naming the first parameter whose bytes
/// are not valid UTF-8, or whose float is NaN or infinite.
pub fn normalize(params: &Params) -> Result<Params> {
    let mut normalized = Params::new();
    for (key, value) in params.iter() {
        let value = match value {
            ParamValue::Bytes(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(|e| SheerIdError::Encoding {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
                ParamValue::Text(text.to_string())
            }
            ParamValue::Float(f) if !f.is_finite() => {
                return Err(SheerIdError::Encoding {
                    key: key.to_string(),
                    message: format!("float {f} has no wire representation"),
                });
            }
            other => other.clone(),
        };
        normalized.append(key, value);
    }
    Ok(normalized)
}

/// Normalize and form-urlencode `params` into a single query/body string.
///
/// Repeated keys produce repeated `key=value` pairs.
///
/// # Errors
/// Propagates [`normalize`] failures.
pub fn encode(params: &Params) -> Result<String> {
    let normalized = normalize(params)?;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in normalized.iter() {
        serializer.append_pair(key, &wire_text(value));
    }
    Ok(serializer.finish())
}

/// Text form of an already-normalized value.
fn wire_text(value: &ParamValue) -> String {
    match value {
        ParamValue::Text(text) => text.clone(),
        ParamValue::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ParamValue::Int(n) => n.to_string(),
        ParamValue::Float(f) => float_text(*f),
    }
}

// Integral floats keep their decimal point (10.0, not 10) at any magnitude.
// Never exponent notation. Non-finite values are rejected by `normalize`.
fn float_text(f: f64) -> String {
    if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}
