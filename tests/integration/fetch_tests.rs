//! Integration tests for the JSON fetcher

use crate::common::{api_base, match_link, mount_game_json};
use riftcrawl::matches::JsonFetcher;
use riftcrawl::output::{JsonFilePersister, Persister};
use riftcrawl::HarvestError;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> JsonFetcher {
    JsonFetcher::new()
        .expect("Failed to build fetcher")
        .with_api_base(api_base(server))
}

#[tokio::test]
async fn test_fetch_returns_first_record_without_sink() {
    let mock_server = MockServer::start().await;
    mount_game_json(
        &mock_server,
        "1002440062",
        json!({"a": 1, "b": 2}),
        json!({"b": 3, "c": 4}),
    )
    .await;

    // The second link is never requested
    Mock::given(method("GET"))
        .and(path("/v1/stats/game/TRLH1/1002440070"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let links = vec![match_link("1002440062"), match_link("1002440070")];
    let record = fetcher_for(&mock_server)
        .fetch(&links, None)
        .await
        .expect("Fetch failed")
        .expect("No record returned");

    assert_eq!(Value::Object(record), json!({"a": 1, "b": 3, "c": 4}));
}

#[tokio::test]
async fn test_fetch_persists_every_game() {
    let mock_server = MockServer::start().await;
    for game_id in ["1002440062", "1002440070"] {
        mount_game_json(
            &mock_server,
            game_id,
            json!({"gameId": game_id}),
            json!({"frames": [1, 2]}),
        )
        .await;
    }

    let out = tempfile::tempdir().unwrap();
    let persister = JsonFilePersister::new(out.path());
    let links = vec![match_link("1002440062"), match_link("1002440070")];

    let result = fetcher_for(&mock_server)
        .fetch(&links, Some(&persister as &dyn Persister))
        .await
        .expect("Fetch failed");
    assert!(result.is_none());

    let content = std::fs::read_to_string(out.path().join("game_TRLH1_1002440070.json")).unwrap();
    assert!(content.starts_with("{\n    \""));
    let record: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(record, json!({"gameId": "1002440070", "frames": [1, 2]}));
}

#[tokio::test]
async fn test_refetch_appends() {
    let mock_server = MockServer::start().await;
    mount_game_json(&mock_server, "1002440062", json!({"g": 1}), json!({"t": 2})).await;

    let out = tempfile::tempdir().unwrap();
    let persister = JsonFilePersister::new(out.path());
    let fetcher = fetcher_for(&mock_server);
    let links = vec![match_link("1002440062")];

    for _ in 0..2 {
        fetcher
            .fetch(&links, Some(&persister as &dyn Persister))
            .await
            .expect("Fetch failed");
    }

    let content = std::fs::read_to_string(out.path().join("game_TRLH1_1002440062.json")).unwrap();
    let documents = serde_json::Deserializer::from_str(&content)
        .into_iter::<Value>()
        .count();
    assert_eq!(documents, 2);
}

#[tokio::test]
async fn test_timeline_must_be_an_object() {
    let mock_server = MockServer::start().await;
    mount_game_json(&mock_server, "1002440062", json!({"gameId": 1}), json!([1, 2, 3])).await;

    let result = fetcher_for(&mock_server)
        .fetch(&[match_link("1002440062")], None)
        .await;

    match result {
        Err(HarvestError::NotAnObject { url }) => assert!(url.contains("/timeline?")),
        other => panic!("Expected NotAnObject, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upstream_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/stats/game/TRLH1/1002440062"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = fetcher_for(&mock_server)
        .fetch(&[match_link("1002440062")], None)
        .await;

    assert!(matches!(
        result,
        Err(HarvestError::HttpStatus { status: 503, .. })
    ));
}
