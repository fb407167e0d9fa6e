//! Catalog API client.
//!
//! Wraps the third-party game catalog REST API: paged search, per-game
//! details, and screenshots. All responses are pass-through provider shapes
//! — this crate forwards them without owning or mutating their schema.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CatalogClient, CatalogTransport, HttpResponse};
pub use error::CatalogError;
pub use types::{GameDetails, GameRef, GameSummary, GamesPage, Screenshot, ScreenshotsPage};
