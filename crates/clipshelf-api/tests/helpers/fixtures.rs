//! Test fixtures: upload payloads and small video blobs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

/// A few bytes standing in for an MP4 `ftyp` box.
pub fn sample_video_bytes() -> Vec<u8> {
    vec![
        0x00, 0x00, 0x00, 0x18, 0x66, 0x74, 0x79, 0x70, 0x6D, 0x70, 0x34, 0x32, 0x00, 0x00, 0x00,
        0x00, 0x6D, 0x70, 0x34, 0x32, 0x69, 0x73, 0x6F, 0x6D,
    ]
}

pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// A complete upload body for `original_name` carrying `data`.
pub fn upload_body(title: &str, original_name: &str, data: &[u8]) -> Value {
    json!({
        "title": title,
        "description": format!("{} description", title),
        "originalName": original_name,
        "data": encode(data),
    })
}
