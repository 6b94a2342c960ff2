//! Metadata repositories
//!
//! `metadata` holds the catalog store trait and its JSON-file and in-memory
//! implementations.

pub mod metadata;

pub use metadata::{
    create_metadata_store, InMemoryMetadataStore, JsonFileMetadataStore, MetadataStore,
};
