pub mod cloud;
pub mod upload;
pub mod video;

pub use cloud::{CloudVideo, CloudVideoSummary};
pub use upload::{UploadRequest, ValidatedUpload, REQUIRED_FIELDS};
pub use video::VideoRecord;
