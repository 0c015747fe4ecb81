//! GLB Container Packing Tests
//!
//! Tests for:
//! - pad4 padding law
//! - GLB layout law (header, chunk offsets, total length)
//! - No-binary case (JSON chunk only)
//! - Inline buffer extraction and byteLength rewriting
//! - Data URL round trip

use serde_json::{Value, json};

use rigkit::glb;
use rigkit::utils::data_url;

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn json_chunk(glb_bytes: &[u8]) -> Value {
    let json_len = read_u32_le(glb_bytes, 12) as usize;
    assert_eq!(read_u32_le(glb_bytes, 16), glb::CHUNK_JSON);
    serde_json::from_slice(&glb_bytes[20..20 + json_len]).expect("JSON chunk must stay parseable")
}

// ============================================================================
// Padding Law
// ============================================================================

#[test]
fn pad4_is_smallest_multiple_of_four() {
    for len in 0..=32 {
        let padded = glb::pad4(len);
        assert_eq!(padded % 4, 0, "pad4({len}) = {padded} is not aligned");
        assert!(padded >= len);
        assert!(padded < len + 4, "pad4({len}) = {padded} is not minimal");
    }
}

// ============================================================================
// GLB Layout Law
// ============================================================================

#[test]
fn pack_layout_with_binary_payload() {
    let payload = vec![0x01_u8, 0x02, 0x03];
    let document = json!({
        "asset": {"version": "2.0"},
        "buffers": [{
            "uri": data_url::encode_data_url(&payload, "application/octet-stream"),
            "byteLength": payload.len(),
        }],
    });

    let bytes = glb::pack(document).unwrap();

    // Header: magic "glTF", version 2, total length
    assert_eq!(&bytes[0..4], b"glTF");
    assert_eq!(read_u32_le(&bytes, 0), glb::GLB_MAGIC);
    assert_eq!(read_u32_le(&bytes, 4), 2);
    assert_eq!(read_u32_le(&bytes, 8) as usize, bytes.len());

    // JSON chunk: aligned length, "JSON" type
    let json_len = read_u32_le(&bytes, 12) as usize;
    assert_eq!(json_len % 4, 0);
    assert_eq!(read_u32_le(&bytes, 16), glb::CHUNK_JSON);

    // BIN chunk directly after the padded JSON chunk
    let bin_offset = 20 + json_len;
    let bin_len = read_u32_le(&bytes, bin_offset) as usize;
    assert_eq!(bin_len, glb::pad4(payload.len()));
    assert_eq!(read_u32_le(&bytes, bin_offset + 4), glb::CHUNK_BIN);
    assert_eq!(&bytes[bin_offset + 8..bin_offset + 8 + 3], payload.as_slice());

    // Zero padding on the binary chunk
    assert_eq!(bytes[bin_offset + 8 + 3], 0x00);

    // Total length is exactly computable from the chunk lengths
    assert_eq!(bytes.len(), 12 + 8 + json_len + 8 + bin_len);
}

#[test]
fn pack_pads_json_with_spaces() {
    // A document whose serialization is not 4-byte aligned
    let document = json!({"asset": {"version": "2.0"}});
    let raw_len = serde_json::to_vec(&document).unwrap().len();
    assert_ne!(raw_len % 4, 0, "pick a document that actually needs padding");

    let bytes = glb::pack(document).unwrap();
    let json_len = read_u32_le(&bytes, 12) as usize;

    for i in raw_len..json_len {
        assert_eq!(bytes[20 + i], 0x20, "JSON filler byte must be ASCII space");
    }
}

#[test]
fn pack_without_buffers_has_no_bin_chunk() {
    let document = json!({"asset": {"version": "2.0"}, "nodes": []});
    let bytes = glb::pack(document).unwrap();

    let json_len = read_u32_le(&bytes, 12) as usize;
    assert_eq!(bytes.len(), 12 + 8 + json_len, "No BIN chunk header expected");
}

#[test]
fn pack_buffer_without_uri_has_no_bin_chunk() {
    let document = json!({
        "asset": {"version": "2.0"},
        "buffers": [{"byteLength": 16}],
    });
    let bytes = glb::pack(document).unwrap();

    let json_len = read_u32_le(&bytes, 12) as usize;
    assert_eq!(bytes.len(), 12 + 8 + json_len);
}

// ============================================================================
// Inline Buffer Extraction
// ============================================================================

#[test]
fn pack_strips_uri_and_rewrites_byte_length() {
    let payload = vec![7_u8; 10];
    let document = json!({
        "asset": {"version": "2.0"},
        "buffers": [{
            "uri": data_url::encode_data_url(&payload, "application/octet-stream"),
            // Deliberately wrong: must be rewritten to the decoded length
            "byteLength": 99999,
        }],
    });

    let bytes = glb::pack(document).unwrap();
    let json = json_chunk(&bytes);

    let buffer = &json["buffers"][0];
    assert!(buffer.get("uri").is_none(), "Inline URI must be removed");
    assert_eq!(buffer["byteLength"], 10);
}

#[test]
fn pack_rejects_non_base64_uri() {
    let document = json!({
        "asset": {"version": "2.0"},
        "buffers": [{"uri": "data:application/octet-stream;base64,@@not-base64@@"}],
    });

    assert!(glb::pack(document).is_err());
}

// ============================================================================
// Data URL Round Trip
// ============================================================================

#[test]
fn data_url_round_trip() {
    let bytes = vec![0_u8, 1, 2, 250, 251, 252];
    let url = data_url::encode_data_url(&bytes, "application/octet-stream");
    assert!(url.starts_with("data:application/octet-stream;base64,"));

    let decoded = data_url::decode_data_url(&url).unwrap();
    assert_eq!(decoded, bytes);
}

#[test]
fn data_url_accepts_bare_base64() {
    // A payload without the data: prefix decodes as plain base64
    let decoded = data_url::decode_data_url("AQID").unwrap();
    assert_eq!(decoded, vec![1, 2, 3]);
}
