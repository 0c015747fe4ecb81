//! Manual GLB (binary glTF) container assembly.
//!
//! A GLB file is a 12-byte header followed by one mandatory JSON chunk and
//! one optional BIN chunk, each 4-byte aligned. The JSON chunk is padded
//! with ASCII spaces so readers that slice the chunk as text still see
//! valid JSON; the BIN chunk is padded with zeros.

use serde_json::Value;

use crate::errors::Result;
use crate::utils::data_url;

/// `"glTF"`, little-endian.
pub const GLB_MAGIC: u32 = 0x4654_6C67;
/// Container version emitted by this writer.
pub const GLB_VERSION: u32 = 2;
/// `"JSON"` chunk type.
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// `"BIN\0"` chunk type.
pub const CHUNK_BIN: u32 = 0x004E_4942;

/// Smallest multiple of 4 that is >= `len`.
#[must_use]
pub fn pad4(len: usize) -> usize {
    len + (4 - len % 4) % 4
}

/// Packs a glTF JSON document (plus an optional inline buffer payload)
/// into GLB container bytes.
///
/// If `document.buffers[0]` carries an inline data-URI payload, the
/// payload is decoded into the BIN chunk, the `uri` field is removed and
/// `byteLength` is set to the decoded length. A document without such a
/// buffer produces a container with no BIN chunk.
///
/// This is a pure function over a well-formed document; a buffer whose
/// `uri` payload is not valid base64 is a caller contract violation and
/// the decode error propagates.
pub fn pack(mut document: Value) -> Result<Vec<u8>> {
    let bin = extract_inline_buffer(&mut document)?;

    let json_bytes = serde_json::to_vec(&document)?;
    let json_len = pad4(json_bytes.len());
    let bin_len = pad4(bin.len());

    let total_length = 12 + 8 + json_len + if bin.is_empty() { 0 } else { 8 + bin_len };

    let mut glb = Vec::with_capacity(total_length);

    // Header
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&(total_length as u32).to_le_bytes());

    // JSON chunk, space-padded
    glb.extend_from_slice(&(json_len as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);
    glb.resize(glb.len() + (json_len - json_bytes.len()), 0x20);

    // BIN chunk, zero-padded, only when a payload exists
    if !bin.is_empty() {
        glb.extend_from_slice(&(bin_len as u32).to_le_bytes());
        glb.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        glb.extend_from_slice(&bin);
        glb.resize(glb.len() + (bin_len - bin.len()), 0x00);
    }

    Ok(glb)
}

/// Decodes and strips the inline payload of `buffers[0]`, rewriting its
/// `byteLength` to the decoded size.
fn extract_inline_buffer(document: &mut Value) -> Result<Vec<u8>> {
    let Some(buffer) = document
        .get_mut("buffers")
        .and_then(|buffers| buffers.get_mut(0))
    else {
        return Ok(Vec::new());
    };

    let Some(uri) = buffer.get("uri").and_then(Value::as_str) else {
        return Ok(Vec::new());
    };

    let payload = data_url::decode_data_url(uri)?;

    if let Some(obj) = buffer.as_object_mut() {
        obj.remove("uri");
        obj.insert("byteLength".to_string(), Value::from(payload.len()));
    }

    Ok(payload)
}
