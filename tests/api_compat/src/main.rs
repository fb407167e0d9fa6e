fn main() {
    println!("Run `cargo test -p api-compat` to execute provider payload compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Normalizes JSON values so that integer-valued floats compare equal.
    fn normalize_value(v: &serde_json::Value) -> serde_json::Value {
        match v {
            serde_json::Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    serde_json::json!(f)
                } else {
                    v.clone()
                }
            }
            serde_json::Value::Object(map) => {
                let normalized: serde_json::Map<String, serde_json::Value> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), normalize_value(v)))
                    .collect();
                serde_json::Value::Object(normalized)
            }
            serde_json::Value::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(normalize_value).collect())
            }
            _ => v.clone(),
        }
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values (order-independent, float-normalized).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        let norm_fixture = normalize_value(&fixture);
        let norm_reserialized = normalize_value(&reserialized);
        assert_eq!(
            norm_fixture, norm_reserialized,
            "roundtrip mismatch for {name}:\n  provider: {fixture}\n  ours:     {reserialized}"
        );
    }

    // --- Catalog provider payloads ---

    #[test]
    fn fixture_games_page() {
        roundtrip_test::<gtrack_catalog::GamesPage>("games_page.json");
    }

    #[test]
    fn fixture_game_details() {
        roundtrip_test::<gtrack_catalog::GameDetails>("game_details.json");
    }

    #[test]
    fn fixture_screenshots_page() {
        roundtrip_test::<gtrack_catalog::ScreenshotsPage>("screenshots_page.json");
    }

    #[test]
    fn catalog_payload_tolerates_extra_provider_fields() {
        // The provider sends far more fields than the core consumes;
        // deserialization must ignore them.
        let json = r#"{
            "id": 3498,
            "slug": "grand-theft-auto-v",
            "name": "Grand Theft Auto V",
            "released": "2013-09-17",
            "background_image": "https://media.example/gta.jpg",
            "metacritic": 92,
            "rating": 4.47,
            "ratings_count": 6040,
            "added_by_status": {"owned": 10655},
            "tags": [{"id": 31, "name": "Singleplayer"}]
        }"#;
        let game: gtrack_catalog::GameSummary = serde_json::from_str(json).unwrap();
        assert_eq!(game.id, 3498);
        assert_eq!(game.metacritic, Some(92));
        assert!(game.platforms.is_empty());
    }

    // --- Streaming provider payloads ---

    #[test]
    fn fixture_streams_page() {
        roundtrip_test::<gtrack_streams::StreamsPage>("streams_page.json");
    }

    #[test]
    fn fixture_resolved_game() {
        roundtrip_test::<gtrack_streams::ResolvedGame>("resolved_game.json");
    }

    #[test]
    fn token_response_parses() {
        // Deserialize-only shape: the token endpoint response is consumed,
        // never re-emitted.
        let fixture = load_fixture("token_response.json");
        let parsed: gtrack_streams::TokenResponse = serde_json::from_value(fixture).unwrap();
        assert_eq!(parsed.access_token, "jostpf5q0uzmxmkba9iyug38kjtg");
        assert_eq!(parsed.expires_in, 5011271);
        assert_eq!(parsed.token_type, "bearer");
    }

    // --- Persisted collection format ---

    #[test]
    fn fixture_collection() {
        roundtrip_test::<Vec<gtrack_collection::CollectionEntry>>("collection.json");
    }
}
