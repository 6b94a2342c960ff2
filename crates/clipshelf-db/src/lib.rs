//! Clipshelf persistence layer
//!
//! The video catalog is a single JSON document holding an array of
//! [`VideoRecord`](clipshelf_core::VideoRecord)s. Repositories live under [`db`].

pub mod db;

pub use db::{
    create_metadata_store, InMemoryMetadataStore, JsonFileMetadataStore, MetadataStore,
};
