//! Aggregation layer over the collection store and the API clients.
//!
//! This crate implements the composition logic only — which streams exist
//! for the games the user collected, and how catalog shapes become
//! collection entries. It owns no transport and no persistence of its own;
//! the presentation layer consumes it through [`Library`].

pub mod aggregator;
pub mod entry;
pub mod error;

pub use aggregator::Library;
pub use entry::{entry_from_details, entry_from_summary, filter_excluded};
pub use error::LibraryError;
