//! API constants
//!
//! Route prefixes shared by the router, handlers and the OpenAPI document.

/// JSON API prefix
pub const API_PREFIX: &str = "/api";

/// Stored files are served below this prefix
pub use clipshelf_core::constants::UPLOADS_PREFIX;

/// Path of the OpenAPI document
pub const OPENAPI_PATH: &str = "/api/openapi.json";
