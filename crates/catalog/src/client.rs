//! Catalog API client — search, details, screenshots.
//!
//! Three idempotent GET operations, each carrying the API key as a query
//! parameter. A failed attempt is a single reported failure: there are no
//! retries, and network errors propagate to the caller unchanged.

use std::future::Future;
use std::pin::Pin;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use gtrack_config::CatalogConfig;

use crate::error::CatalogError;
use crate::types::{GameDetails, GameRef, GamesPage, ScreenshotsPage};

/// Base URL of the catalog API.
pub const CATALOG_API_BASE: &str = "https://api.rawg.io/api";

/// Ordering requested when listing without a search query.
const DEFAULT_ORDERING: &str = "-relevance";

/// Raw HTTP response handed back by a [`CatalogTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstract HTTP GET used by the client.
///
/// The client builds full URLs and interprets status codes and bodies; the
/// transport only moves bytes. Tests substitute a recording mock.
pub trait CatalogTransport: Send + Sync {
    fn get(
        &self,
        url: &str,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, CatalogError>> + Send + '_>>;
}

/// reqwest-backed transport used outside tests.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogTransport for HttpTransport {
    fn get(
        &self,
        url: &str,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, CatalogError>> + Send + '_>> {
        let url = url.to_string();
        Box::pin(async move {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| CatalogError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| CatalogError::Network(e.to_string()))?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Client for the game catalog API.
pub struct CatalogClient {
    config: CatalogConfig,
    base_url: String,
    transport: Box<dyn CatalogTransport>,
}

impl CatalogClient {
    /// Creates a client over the real HTTP transport.
    ///
    /// The API key is validated here, before any network call.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        Self::with_transport(config, Box::new(HttpTransport::new()))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(
        config: CatalogConfig,
        transport: Box<dyn CatalogTransport>,
    ) -> Result<Self, CatalogError> {
        config.validate()?;
        Ok(Self {
            config,
            base_url: CATALOG_API_BASE.to_string(),
            transport,
        })
    }

    /// Fetches one page of games.
    ///
    /// `page` is 1-indexed; the page size comes from configuration. A
    /// non-empty `search` requests precise search matching, an empty one
    /// requests relevance-ordered results.
    pub async fn fetch_games(&self, page: u32, search: &str) -> Result<GamesPage, CatalogError> {
        let url = self.games_url(page, search);
        debug!(page, search, "fetching games page");
        let response = self.transport.get(&url).await?;
        parse_response(response)
    }

    /// Fetches full details for one game, by numeric id or slug.
    pub async fn fetch_game_details(&self, game: &GameRef) -> Result<GameDetails, CatalogError> {
        let url = format!(
            "{}/games/{}?key={}",
            self.base_url, game, self.config.api_key
        );
        debug!(game = %game, "fetching game details");
        let response = self.transport.get(&url).await?;
        parse_response(response)
    }

    /// Fetches the screenshots of one game, by numeric id or slug.
    pub async fn fetch_game_screenshots(
        &self,
        game: &GameRef,
    ) -> Result<ScreenshotsPage, CatalogError> {
        let url = format!(
            "{}/games/{}/screenshots?key={}",
            self.base_url, game, self.config.api_key
        );
        debug!(game = %game, "fetching game screenshots");
        let response = self.transport.get(&url).await?;
        parse_response(response)
    }

    fn games_url(&self, page: u32, search: &str) -> String {
        let mut url = format!(
            "{}/games?key={}&page={}&page_size={}",
            self.base_url, self.config.api_key, page, self.config.page_size
        );
        if search.is_empty() {
            url.push_str("&ordering=");
            url.push_str(DEFAULT_ORDERING);
        } else {
            url.push_str("&search=");
            url.push_str(&encode(search));
            url.push_str("&search_precise=true");
        }
        url
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, CatalogError> {
    if !(200..300).contains(&response.status) {
        let detail = error_detail(&response);
        warn!(status = response.status, detail = %detail, "catalog API request failed");
        return Err(CatalogError::Api {
            status: response.status,
            detail,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Extracts the provider's error detail when the body parses, falling back
/// to the HTTP status reason.
fn error_detail(response: &HttpResponse) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }

    if let Ok(body) = serde_json::from_str::<ErrorBody>(&response.body) {
        if let Some(detail) = body.detail {
            if !detail.is_empty() {
                return detail;
            }
        }
    }
    status_reason(response.status)
}

fn status_reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP error {status}"))
}
