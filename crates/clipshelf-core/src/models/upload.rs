//! Upload request payload and its validation.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::constants::DEFAULT_FOLDER;
use crate::error::AppError;

/// Standard alphabet, padding optional.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Required fields, in the order they are reported when missing.
pub const REQUIRED_FIELDS: [&str; 4] = ["title", "description", "originalName", "data"];

/// Raw upload body.
///
/// Fields are kept as loose JSON so that a wrong type is reported the same way
/// as an absent value: only a non-empty string counts as provided.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub description: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub original_name: Option<Value>,
    /// Base64-encoded file contents
    #[schema(value_type = Option<String>)]
    pub data: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub folder: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub mime_type: Option<Value>,
}

/// An upload whose required fields are present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedUpload {
    pub title: String,
    pub description: String,
    pub original_name: String,
    pub data: String,
    pub folder: String,
    pub mime_type: Option<String>,
}

fn provided(value: &Option<Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

impl UploadRequest {
    /// Parse a request body. An empty body is treated as an empty object;
    /// anything that is not a JSON object is a parse error.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(UploadRequest::default());
        }

        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(AppError::Parse("request body is not a JSON object".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Check that every required field is provided, naming all that are not.
    pub fn validate(self) -> Result<ValidatedUpload, AppError> {
        let required = [
            &self.title,
            &self.description,
            &self.original_name,
            &self.data,
        ];
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .zip(required)
            .filter(|(_, value)| provided(value).is_none())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::missing_fields(missing));
        }

        let take = |value: &Option<Value>| provided(value).map(str::to_string).unwrap_or_default();

        Ok(ValidatedUpload {
            title: take(&self.title),
            description: take(&self.description),
            original_name: take(&self.original_name),
            data: take(&self.data),
            folder: provided(&self.folder)
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
            mime_type: match &self.mime_type {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            },
        })
    }
}

impl ValidatedUpload {
    /// Decode the base64 payload.
    pub fn decode_data(&self) -> Result<Vec<u8>, AppError> {
        LENIENT_BASE64
            .decode(self.data.trim())
            .map_err(|e| AppError::InvalidInput(format!("Field 'data' is not valid base64: {}", e)))
    }
}
