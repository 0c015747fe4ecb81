use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::errors::Result;

/// Encodes raw bytes as a `data:` URL with a base64 payload.
#[must_use]
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decodes the base64 payload of a `data:` URL back into raw bytes.
///
/// Everything after the first `,` is treated as base64; a string without a
/// comma is treated as a bare base64 payload. A payload that is not valid
/// base64 is a caller contract violation and surfaces as
/// [`RigkitError::Base64Error`](crate::errors::RigkitError::Base64Error).
pub fn decode_data_url(url: &str) -> Result<Vec<u8>> {
    let payload = match url.find(',') {
        Some(comma) => &url[comma + 1..],
        None => url,
    };
    Ok(STANDARD.decode(payload)?)
}
