pub mod cloud_videos;
pub mod upload_file;
pub mod video_get;
pub mod video_upload;
