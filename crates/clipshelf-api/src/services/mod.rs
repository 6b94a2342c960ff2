//! Business services behind the HTTP handlers

pub mod cloud_catalog;
pub mod ingest;

pub use cloud_catalog::CloudCatalogService;
pub use ingest::VideoIngestService;
