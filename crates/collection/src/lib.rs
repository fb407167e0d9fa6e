//! Locally persisted game collection.
//!
//! The collection is a flat list of bookmarked games serialized as one JSON
//! array behind a [`StorageBackend`]. The store performs a full
//! read-modify-write per mutation; collections are expected to stay small
//! (tens of entries). There is no cross-process coordination — concurrent
//! writers race and the last write wins.

pub mod error;
pub mod store;
pub mod types;

pub use error::CollectionError;
pub use store::{CollectionStore, FileBackend, StorageBackend, default_collection_path};
pub use types::CollectionEntry;
