//! Domain types for the persisted collection.

use serde::{Deserialize, Serialize};

/// A bookmarked game as persisted in the user's collection.
///
/// `id` is unique within a collection. Entries keep insertion order, which
/// is display order only — it carries no priority semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cover_image_url: String,
    /// ISO date (`YYYY-MM-DD`), or empty when the release date is unknown.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critic_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platform_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genre_names: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
}
