//! Streaming API client — token exchange, name resolution, live streams.

use std::future::Future;
use std::pin::Pin;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::{debug, warn};

use gtrack_config::StreamingConfig;

use crate::error::StreamsError;
use crate::token::{CachedToken, TokenCache, cache_deadline};
use crate::types::{GamesEnvelope, StreamsPage, TokenResponse};

/// OAuth token endpoint.
pub const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
/// Base URL for authenticated API calls.
pub const HELIX_API_BASE: &str = "https://api.twitch.tv/helix";

/// Streams are filtered to this broadcast language.
const STREAM_LANGUAGE: &str = "en";
/// Result cap for collection-driven stream queries.
const COLLECTION_STREAM_LIMIT: u32 = 20;
/// Result cap for the top-streams query.
const TOP_STREAM_LIMIT: u32 = 10;

/// Raw HTTP response handed back by a [`StreamingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstract HTTP layer used by the client.
///
/// Two call shapes: the unauthenticated form POST of the token exchange,
/// and authenticated GETs carrying the `Client-ID` and bearer headers.
/// Tests substitute a recording mock.
pub trait StreamingTransport: Send + Sync {
    /// POSTs a form-encoded body (token exchange).
    fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, StreamsError>> + Send + '_>>;

    /// GET with `Client-ID` and `Authorization: Bearer` headers.
    fn get_authed(
        &self,
        url: &str,
        client_id: &str,
        token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, StreamsError>> + Send + '_>>;
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

impl StreamingTransport for HttpTransport {
    fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, StreamsError>> + Send + '_>> {
        let url = url.to_string();
        let form = form.to_vec();
        Box::pin(async move {
            let response = self
                .client
                .post(&url)
                .form(&form)
                .send()
                .await
                .map_err(|e| StreamsError::Network(e.to_string()))?;
            read_response(response).await
        })
    }

    fn get_authed(
        &self,
        url: &str,
        client_id: &str,
        token: &str,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, StreamsError>> + Send + '_>> {
        let url = url.to_string();
        let client_id = client_id.to_string();
        let bearer = format!("Bearer {token}");
        Box::pin(async move {
            let response = self
                .client
                .get(&url)
                .header("Client-ID", client_id)
                .header("Authorization", bearer)
                .send()
                .await
                .map_err(|e| StreamsError::Network(e.to_string()))?;
            read_response(response).await
        })
    }
}

async fn read_response(response: reqwest::Response) -> Result<HttpResponse, StreamsError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| StreamsError::Network(e.to_string()))?;
    Ok(HttpResponse { status, body })
}

/// Client for the live-streaming API.
///
/// Owns the process-wide access token for its credentials. The token cache
/// lock is held across a refresh, so concurrent callers that find no valid
/// token await a single exchange rather than each performing their own.
pub struct StreamsClient {
    config: StreamingConfig,
    transport: Box<dyn StreamingTransport>,
    token: TokenCache,
}

impl StreamsClient {
    /// Creates a client over the real HTTP transport.
    ///
    /// Credentials are validated here, before any network call.
    pub fn new(config: StreamingConfig) -> Result<Self, StreamsError> {
        Self::with_transport(config, Box::new(HttpTransport::new()))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(
        config: StreamingConfig,
        transport: Box<dyn StreamingTransport>,
    ) -> Result<Self, StreamsError> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            token: TokenCache::new(),
        })
    }

    /// Returns a valid access token.
    ///
    /// A cached token still inside its margin-adjusted lifetime is returned
    /// without any network call; otherwise one client-credentials exchange
    /// runs and its result is cached with `expires_in` minus the safety
    /// margin.
    pub async fn access_token(&self) -> Result<String, StreamsError> {
        let mut slot = self.token.lock().await;
        if let Some(cached) = slot.as_ref() {
            if cached.is_valid() {
                return Ok(cached.value.clone());
            }
            debug!("cached access token past its margin-adjusted expiry, refreshing");
        }

        let form = vec![
            ("client_id".to_string(), self.config.client_id.clone()),
            ("client_secret".to_string(), self.config.client_secret.clone()),
            ("grant_type".to_string(), "client_credentials".to_string()),
        ];
        let response = self.transport.post_form(TOKEN_URL, &form).await?;
        if !is_success(response.status) {
            let detail = error_detail(&response);
            warn!(status = response.status, detail = %detail, "token exchange failed");
            return Err(StreamsError::Api {
                status: response.status,
                detail,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&response.body)?;
        debug!(expires_in = parsed.expires_in, "obtained new access token");
        let cached = CachedToken {
            value: parsed.access_token,
            expires_at: cache_deadline(parsed.expires_in),
        };
        let value = cached.value.clone();
        *slot = Some(cached);
        Ok(value)
    }

    /// Drops the cached access token, forcing a refresh on the next call.
    pub async fn invalidate_token(&self) {
        self.token.invalidate().await;
    }

    /// Resolves game names to provider ids in one batched request.
    ///
    /// Empty input short-circuits without any network call. Ids come back
    /// in the provider's order, which does not necessarily match the input
    /// order — callers must not assume positional correspondence.
    pub async fn game_ids(&self, names: &[String]) -> Result<Vec<String>, StreamsError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let query: Vec<String> = names
            .iter()
            .map(|name| format!("name={}", encode(name)))
            .collect();
        let url = format!("{}/games?{}", HELIX_API_BASE, query.join("&"));
        let response = self.get_authed(&url).await?;
        let envelope: GamesEnvelope = serde_json::from_str(&response.body)?;
        debug!(
            requested = names.len(),
            resolved = envelope.data.len(),
            "resolved game names to provider ids"
        );
        Ok(envelope.data.into_iter().map(|game| game.id).collect())
    }

    /// Fetches live English-language streams for the given provider ids,
    /// capped at 20.
    ///
    /// Empty input short-circuits to an empty page without any network
    /// call.
    pub async fn streams_by_game_ids(&self, ids: &[String]) -> Result<StreamsPage, StreamsError> {
        if ids.is_empty() {
            return Ok(StreamsPage::default());
        }
        let query: Vec<String> = ids.iter().map(|id| format!("game_id={}", encode(id))).collect();
        let url = format!(
            "{}/streams?{}&language={}&first={}",
            HELIX_API_BASE,
            query.join("&"),
            STREAM_LANGUAGE,
            COLLECTION_STREAM_LIMIT
        );
        let response = self.get_authed(&url).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetches the top 10 live English-language streams, independent of any
    /// collection.
    pub async fn top_streams(&self) -> Result<StreamsPage, StreamsError> {
        let url = format!(
            "{}/streams?language={}&first={}",
            HELIX_API_BASE, STREAM_LANGUAGE, TOP_STREAM_LIMIT
        );
        let response = self.get_authed(&url).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Performs an authenticated GET, mapping 401 to token invalidation.
    ///
    /// The failed call itself is not retried — the caller re-invokes and the
    /// next call fetches a fresh token.
    async fn get_authed(&self, url: &str) -> Result<HttpResponse, StreamsError> {
        let token = self.access_token().await?;
        let response = self
            .transport
            .get_authed(url, &self.config.client_id, &token)
            .await?;

        if response.status == 401 {
            let detail = error_detail(&response);
            warn!(url, "authenticated request rejected, invalidating cached token");
            self.token.invalidate().await;
            return Err(StreamsError::Unauthorized { detail });
        }
        if !is_success(response.status) {
            let detail = error_detail(&response);
            warn!(status = response.status, detail = %detail, "streaming API request failed");
            return Err(StreamsError::Api {
                status: response.status,
                detail,
            });
        }
        Ok(response)
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Extracts the provider's error message when the body parses, falling back
/// to the HTTP status reason.
fn error_detail(response: &HttpResponse) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    if let Ok(body) = serde_json::from_str::<ErrorBody>(&response.body) {
        if let Some(message) = body.message {
            if !message.is_empty() {
                return message;
            }
        }
    }
    reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP error {}", response.status))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    /// Mock transport that records every call and replays canned responses
    /// in order, per call shape.
    struct MockTransport {
        post_responses: Mutex<Vec<HttpResponse>>,
        get_responses: Mutex<Vec<HttpResponse>>,
        posts: Mutex<Vec<(String, Vec<(String, String)>)>>,
        gets: Mutex<Vec<(String, String, String)>>,
    }

    impl MockTransport {
        fn new(post_responses: Vec<HttpResponse>, get_responses: Vec<HttpResponse>) -> Self {
            Self {
                post_responses: Mutex::new(post_responses),
                get_responses: Mutex::new(get_responses),
                posts: Mutex::new(Vec::new()),
                gets: Mutex::new(Vec::new()),
            }
        }

        fn post_count(&self) -> usize {
            self.posts.lock().unwrap().len()
        }

        fn get_count(&self) -> usize {
            self.gets.lock().unwrap().len()
        }

        fn last_get_url(&self) -> String {
            self.gets.lock().unwrap().last().unwrap().0.clone()
        }
    }

    impl StreamingTransport for MockTransport {
        fn post_form(
            &self,
            url: &str,
            form: &[(String, String)],
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, StreamsError>> + Send + '_>>
        {
            self.posts
                .lock()
                .unwrap()
                .push((url.to_string(), form.to_vec()));
            Box::pin(async move {
                let mut responses = self.post_responses.lock().unwrap();
                if responses.is_empty() {
                    Err(StreamsError::Network("no mock token response".into()))
                } else {
                    Ok(responses.remove(0))
                }
            })
        }

        fn get_authed(
            &self,
            url: &str,
            client_id: &str,
            token: &str,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, StreamsError>> + Send + '_>>
        {
            self.gets.lock().unwrap().push((
                url.to_string(),
                client_id.to_string(),
                token.to_string(),
            ));
            Box::pin(async move {
                let mut responses = self.get_responses.lock().unwrap();
                if responses.is_empty() {
                    Err(StreamsError::Network("no mock response".into()))
                } else {
                    Ok(responses.remove(0))
                }
            })
        }
    }

    struct Shared(Arc<MockTransport>);

    impl StreamingTransport for Shared {
        fn post_form(
            &self,
            url: &str,
            form: &[(String, String)],
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, StreamsError>> + Send + '_>>
        {
            self.0.post_form(url, form)
        }

        fn get_authed(
            &self,
            url: &str,
            client_id: &str,
            token: &str,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, StreamsError>> + Send + '_>>
        {
            self.0.get_authed(url, client_id, token)
        }
    }

    fn test_config() -> StreamingConfig {
        StreamingConfig {
            client_id: "test-client-id".into(),
            client_secret: "test-client-secret".into(),
        }
    }

    fn client_with(
        post_responses: Vec<HttpResponse>,
        get_responses: Vec<HttpResponse>,
    ) -> (Arc<MockTransport>, StreamsClient) {
        let transport = Arc::new(MockTransport::new(post_responses, get_responses));
        let client =
            StreamsClient::with_transport(test_config(), Box::new(Shared(transport.clone())))
                .unwrap();
        (transport, client)
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.into(),
        }
    }

    fn token_ok(token: &str, expires_in: u64) -> HttpResponse {
        ok(&format!(
            r#"{{"access_token":"{token}","expires_in":{expires_in},"token_type":"bearer"}}"#
        ))
    }

    // -----------------------------------------------------------------------
    // Token cache
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn token_exchange_sends_client_credentials_form() {
        let (transport, client) = client_with(vec![token_ok("tok-1", 3600)], vec![]);

        let token = client.access_token().await.unwrap();
        assert_eq!(token, "tok-1");

        let posts = transport.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        let (url, form) = &posts[0];
        assert_eq!(url, TOKEN_URL);
        assert!(form.contains(&("client_id".into(), "test-client-id".into())));
        assert!(form.contains(&("client_secret".into(), "test-client-secret".into())));
        assert!(form.contains(&("grant_type".into(), "client_credentials".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn token_cached_inside_margin_window() {
        let (transport, client) = client_with(vec![token_ok("tok-1", 3600)], vec![]);

        client.access_token().await.unwrap();
        assert_eq!(transport.post_count(), 1);

        // One second before the margin-adjusted deadline: still cached.
        tokio::time::advance(Duration::from_secs(3600 - 300 - 1)).await;
        let token = client.access_token().await.unwrap();
        assert_eq!(token, "tok-1");
        assert_eq!(transport.post_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn token_refreshed_past_margin_window() {
        let (transport, client) =
            client_with(vec![token_ok("tok-1", 3600), token_ok("tok-2", 3600)], vec![]);

        client.access_token().await.unwrap();

        // One second past the margin-adjusted deadline: refresh.
        tokio::time::advance(Duration::from_secs(3600 - 300 + 1)).await;
        let token = client.access_token().await.unwrap();
        assert_eq!(token, "tok-2");
        assert_eq!(transport.post_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_exchange() {
        let (transport, client) = client_with(vec![token_ok("tok-1", 3600)], vec![]);

        let (a, b) = tokio::join!(client.access_token(), client.access_token());
        assert_eq!(a.unwrap(), "tok-1");
        assert_eq!(b.unwrap(), "tok-1");
        assert_eq!(transport.post_count(), 1);
    }

    #[tokio::test]
    async fn failed_exchange_surfaces_api_error() {
        let (transport, client) = client_with(
            vec![HttpResponse {
                status: 403,
                body: r#"{"status":403,"message":"invalid client secret"}"#.into(),
            }],
            vec![],
        );

        let err = client.access_token().await.unwrap_err();
        match err {
            StreamsError::Api { status, detail } => {
                assert_eq!(status, 403);
                assert_eq!(detail, "invalid client secret");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(transport.post_count(), 1);
    }

    // -----------------------------------------------------------------------
    // Batched lookups
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn game_ids_empty_input_makes_no_request() {
        let (transport, client) = client_with(vec![], vec![]);

        let ids = client.game_ids(&[]).await.unwrap();
        assert!(ids.is_empty());
        assert_eq!(transport.post_count(), 0);
        assert_eq!(transport.get_count(), 0);
    }

    #[tokio::test]
    async fn game_ids_batches_names_into_one_request() {
        let body = r#"{"data":[
            {"id":"32982","name":"Hades","box_art_url":""},
            {"id":"512998","name":"Dark Souls","box_art_url":""}
        ]}"#;
        let (transport, client) =
            client_with(vec![token_ok("tok-1", 3600)], vec![ok(body)]);

        let names = vec!["Hades".to_string(), "Dark Souls".to_string()];
        let ids = client.game_ids(&names).await.unwrap();

        // Provider order, not necessarily input order.
        assert_eq!(ids, vec!["32982", "512998"]);
        assert_eq!(transport.get_count(), 1);

        let url = transport.last_get_url();
        assert!(url.starts_with(&format!("{HELIX_API_BASE}/games?")));
        assert!(url.contains("name=Hades&name=Dark%20Souls"));
    }

    #[tokio::test]
    async fn authed_get_carries_client_id_and_bearer() {
        let (transport, client) =
            client_with(vec![token_ok("tok-xyz", 3600)], vec![ok(r#"{"data":[]}"#)]);

        client.top_streams().await.unwrap();

        let gets = transport.gets.lock().unwrap();
        let (_, client_id, token) = &gets[0];
        assert_eq!(client_id, "test-client-id");
        assert_eq!(token, "tok-xyz");
    }

    #[tokio::test]
    async fn streams_by_game_ids_empty_input_makes_no_request() {
        let (transport, client) = client_with(vec![], vec![]);

        let page = client.streams_by_game_ids(&[]).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(transport.post_count(), 0);
        assert_eq!(transport.get_count(), 0);
    }

    #[tokio::test]
    async fn streams_by_game_ids_caps_and_filters_language() {
        let body = r#"{"data":[{"id":"1","user_login":"streamer","game_id":"32982","type":"live","viewer_count":1234}]}"#;
        let (transport, client) =
            client_with(vec![token_ok("tok-1", 3600)], vec![ok(body)]);

        let page = client
            .streams_by_game_ids(&["32982".to_string(), "512998".to_string()])
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].viewer_count, 1234);
        assert_eq!(page.data[0].stream_type, "live");

        let url = transport.last_get_url();
        assert!(url.contains("game_id=32982&game_id=512998"));
        assert!(url.contains("language=en"));
        assert!(url.contains("first=20"));
    }

    #[tokio::test]
    async fn top_streams_requests_fixed_top_ten() {
        let (transport, client) =
            client_with(vec![token_ok("tok-1", 3600)], vec![ok(r#"{"data":[]}"#)]);

        client.top_streams().await.unwrap();

        let url = transport.last_get_url();
        assert!(url.starts_with(&format!("{HELIX_API_BASE}/streams?")));
        assert!(url.contains("language=en"));
        assert!(url.contains("first=10"));
    }

    // -----------------------------------------------------------------------
    // 401 handling
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unauthorized_invalidates_token_without_retrying() {
        let (transport, client) = client_with(
            vec![token_ok("tok-1", 3600), token_ok("tok-2", 3600)],
            vec![
                HttpResponse {
                    status: 401,
                    body: r#"{"error":"Unauthorized","status":401,"message":"Invalid OAuth token"}"#
                        .into(),
                },
                ok(r#"{"data":[]}"#),
            ],
        );

        let err = client.top_streams().await.unwrap_err();
        match err {
            StreamsError::Unauthorized { detail } => assert_eq!(detail, "Invalid OAuth token"),
            other => panic!("unexpected error: {other}"),
        }
        // The failed call was not retried.
        assert_eq!(transport.get_count(), 1);

        // The cached token was dropped: re-invoking exchanges a new one.
        client.top_streams().await.unwrap();
        assert_eq!(transport.post_count(), 2);
        let (_, _, token) = transport.gets.lock().unwrap()[1].clone();
        assert_eq!(token, "tok-2");
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    #[test]
    fn placeholder_credentials_rejected_before_any_request() {
        let result = StreamsClient::with_transport(
            StreamingConfig::default(),
            Box::new(MockTransport::new(vec![], vec![])),
        );
        assert!(matches!(result, Err(StreamsError::Config(_))));
    }
}
