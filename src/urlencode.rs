//! # URL Encoder/Decoder
//!
//! Percent-encoding of JSON values for carriage in a URL query parameter,
//! as used by the `credential_offer` parameter of an offer reference.

use anyhow::{Context as _, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'_').remove(b'-').remove(b'~');

/// Serialize a value to percent-encoded JSON suitable for embedding in a
/// query string.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized to JSON.
pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).context("serializing to JSON")?;
    Ok(utf8_percent_encode(&json, UNRESERVED).to_string())
}

/// Deserialize a value from a percent-encoded JSON string. Accepts raw
/// (already decoded) JSON as well, since `%` never appears unescaped in the
/// encoded form.
///
/// # Errors
///
/// Returns an error if the string is not valid UTF-8 after decoding, or the
/// decoded JSON does not match the target type.
pub fn from_str<T: DeserializeOwned>(s: &str) -> Result<T> {
    let decoded = percent_decode_str(s).decode_utf8().context("percent-decoding")?;
    serde_json::from_str(&decoded).context("deserializing from JSON")
}
