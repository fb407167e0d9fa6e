//! Pass-through shapes from the catalog provider.
//!
//! Field names mirror the provider's JSON (snake_case) and deserialization
//! is lenient: the provider sends far more fields than the core consumes,
//! and optional data is frequently null.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A platform as nested inside [`PlatformEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Wrapper the provider puts around each platform of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// One game as returned by the paged list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub released: Option<String>,
    pub background_image: Option<String>,
    pub metacritic: Option<i32>,
    #[serde(default)]
    pub platforms: Vec<PlatformEntry>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// One page of the paged list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamesPage {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub results: Vec<GameSummary>,
}

/// Full details for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetails {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub released: Option<String>,
    pub background_image: Option<String>,
    pub metacritic: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_raw: String,
    #[serde(default)]
    pub platforms: Vec<PlatformEntry>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: i64,
    pub image: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotsPage {
    #[serde(default)]
    pub results: Vec<Screenshot>,
}

/// Identifier accepted by the details and screenshots endpoints: the
/// provider resolves both numeric ids and slugs.
#[derive(Debug, Clone, PartialEq)]
pub enum GameRef {
    Id(i64),
    Slug(String),
}

impl fmt::Display for GameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameRef::Id(id) => write!(f, "{id}"),
            GameRef::Slug(slug) => f.write_str(slug),
        }
    }
}

impl From<i64> for GameRef {
    fn from(id: i64) -> Self {
        GameRef::Id(id)
    }
}

impl From<&str> for GameRef {
    fn from(slug: &str) -> Self {
        GameRef::Slug(slug.to_string())
    }
}

impl From<String> for GameRef {
    fn from(slug: String) -> Self {
        GameRef::Slug(slug)
    }
}
