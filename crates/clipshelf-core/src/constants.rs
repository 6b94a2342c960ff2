//! Shared constants

/// Folder assigned to uploads that do not name one.
pub const DEFAULT_FOLDER: &str = "Unsorted";

/// Extension used when the original file name carries none.
pub const DEFAULT_EXTENSION: &str = ".mp4";

/// Content type for anything the media table does not know.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Default request body ceiling for uploads (50 MiB).
pub const MAX_UPLOAD_SIZE_MB: usize = 50;

/// Public path prefix under which stored files are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Display name used for cloud entries whose name is blank.
pub const UNTITLED_VIDEO: &str = "Untitled Video";

/// Placeholder artwork shown for cloud-listed videos.
pub const DEFAULT_CLOUD_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1498050108023-c5249f4df085?auto=format&fit=crop&w=900&q=80";
