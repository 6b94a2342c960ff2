//! Video file extensions and their content types.

use crate::constants::{DEFAULT_CONTENT_TYPE, DEFAULT_EXTENSION};

/// Extensions the library recognises, with the content type stored alongside the blob.
pub const VIDEO_MIME_TYPES: &[(&str, &str)] = &[
    (".mp4", "video/mp4"),
    (".mov", "video/quicktime"),
    (".m4v", "video/x-m4v"),
    (".webm", "video/webm"),
    (".mkv", "video/x-matroska"),
];

/// Derive the storage extension (with leading dot) from a client-supplied file name.
///
/// Only the final path component is considered. A name without a suffix, a
/// dot-file such as `.bashrc`, or a suffix with characters other than ASCII
/// letters and digits falls back to `.mp4`. Case is preserved.
pub fn extension_for(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    match base.rfind('.') {
        Some(idx) if idx > 0 => {
            let suffix = &base[idx + 1..];
            if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
                format!(".{}", suffix)
            } else {
                DEFAULT_EXTENSION.to_string()
            }
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Look up the content type for an extension (case-insensitive).
pub fn mime_for_extension(extension: &str) -> &'static str {
    let normalized = extension.to_lowercase();
    VIDEO_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == normalized)
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// Resolve the content type for an upload: a non-blank caller value wins,
/// otherwise the extension table decides.
pub fn resolve_mime_type(extension: &str, provided: Option<&str>) -> String {
    match provided {
        Some(mime) if !mime.trim().is_empty() => mime.to_string(),
        _ => mime_for_extension(extension).to_string(),
    }
}

/// Content type for a stored file, judged by its name.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    match file_name.rfind('.') {
        Some(idx) => mime_for_extension(&file_name[idx..]),
        None => DEFAULT_CONTENT_TYPE,
    }
}
