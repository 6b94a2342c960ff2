use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage backend types
///
/// Defined in core because configuration, health reporting and the storage crate
/// all need to name the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files written under a directory on the local disk
    Local,
    /// Blobs written to a remote container through a pre-signed URL
    Remote,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Remote => write!(f, "remote"),
        }
    }
}
