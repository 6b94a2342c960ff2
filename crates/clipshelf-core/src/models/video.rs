use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One uploaded video as persisted in the metadata document and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Opaque identifier; new records get a UUID, older catalogs may hold anything
    pub id: String,
    pub title: String,
    pub description: String,
    pub folder: String,
    /// Client-supplied file name; only used for the extension and for display
    pub original_name: String,
    /// Server-generated storage key
    pub file_name: String,
    /// Locator the bytes can be retrieved from
    pub url: String,
    pub created_at: DateTime<Utc>,
}
