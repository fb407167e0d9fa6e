//! Pass-through shapes from the streaming provider.

use serde::{Deserialize, Serialize};

/// Token endpoint response for the client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Provider-side token lifetime in seconds.
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

/// A game as resolved by the streaming provider's name lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGame {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub box_art_url: String,
}

/// `data` envelope around resolved games.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamesEnvelope {
    #[serde(default)]
    pub data: Vec<ResolvedGame>,
}

/// One live stream. Pass-through shape; the provider owns the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_login: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default, rename = "type")]
    pub stream_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewer_count: u64,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

/// Page of live streams (`data` envelope).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamsPage {
    #[serde(default)]
    pub data: Vec<StreamSummary>,
}
