//! Mapping from catalog shapes to collection entries, plus the configured
//! name-exclusion filter.

use gtrack_catalog::{GameDetails, GameSummary};
use gtrack_collection::CollectionEntry;
use gtrack_config::Config;

/// Builds a collection entry from a list-endpoint game.
///
/// Platform and genre wrappers are flattened to name lists; optional
/// provider fields become empty strings, matching the persisted shape.
pub fn entry_from_summary(game: &GameSummary) -> CollectionEntry {
    CollectionEntry {
        id: game.id,
        name: game.name.clone(),
        cover_image_url: game.background_image.clone().unwrap_or_default(),
        release_date: game.released.clone().unwrap_or_default(),
        critic_score: game.metacritic,
        platform_names: game
            .platforms
            .iter()
            .map(|p| p.platform.name.clone())
            .collect(),
        genre_names: game.genres.iter().map(|g| g.name.clone()).collect(),
        slug: game.slug.clone(),
    }
}

/// Builds a collection entry from a details-endpoint game.
pub fn entry_from_details(details: &GameDetails) -> CollectionEntry {
    CollectionEntry {
        id: details.id,
        name: details.name.clone(),
        cover_image_url: details.background_image.clone().unwrap_or_default(),
        release_date: details.released.clone().unwrap_or_default(),
        critic_score: details.metacritic,
        platform_names: details
            .platforms
            .iter()
            .map(|p| p.platform.name.clone())
            .collect(),
        genre_names: details.genres.iter().map(|g| g.name.clone()).collect(),
        slug: details.slug.clone(),
    }
}

/// Drops games whose names appear on the configured exclusion list.
///
/// The catalog client itself never filters; callers opt in to this before
/// display.
pub fn filter_excluded(games: Vec<GameSummary>, config: &Config) -> Vec<GameSummary> {
    games
        .into_iter()
        .filter(|game| !config.is_excluded(&game.name))
        .collect()
}
