//! Integration tests for discovery and the full harvest
//!
//! These tests use wiremock to stand in for the schedule site and the stats
//! API, and run the crawl end-to-end with no settle delay.

use crate::common::{
    api_base, match_link, mount_game_json, mount_game_page, mount_schedule, site_base,
};
use riftcrawl::config::{CrawlConfig, Region, Split, WeekSpec};
use riftcrawl::crawler::{
    BatchScheduler, HttpRenderer, PageCrawler, DEFAULT_FIRST_STAGE_FILTER,
    DEFAULT_SECOND_STAGE_SELECTOR,
};
use riftcrawl::harvester::{HarvestSettings, Harvester};
use riftcrawl::HarvestError;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCHEDULE: &str = "/en_US/lck/lck_2018_spring/schedule/regular_season/1";

fn test_settings(server: &MockServer) -> HarvestSettings {
    HarvestSettings {
        settle_delay: Duration::ZERO,
        api_base: api_base(server),
        ..HarvestSettings::default()
    }
}

fn lck_week_one(server: &MockServer) -> CrawlConfig {
    CrawlConfig::new(Region::Lck, Split::Spring, WeekSpec::Single(1))
        .with_year(2018)
        .with_base_url(site_base(server))
}

#[tokio::test]
async fn test_discover_stats_links() {
    let mock_server = MockServer::start().await;

    mount_schedule(
        &mock_server,
        SCHEDULE,
        &["/en_US/lck/matches/1", "/en_US/lck/matches/2"],
    )
    .await;
    mount_game_page(&mock_server, "/en_US/lck/matches/1", "1002440062").await;
    mount_game_page(&mock_server, "/en_US/lck/matches/2", "1002440070").await;

    let crawler = PageCrawler::new(HttpRenderer::new(Duration::ZERO).unwrap());
    let links = crawler
        .discover(
            &format!("{}{}", mock_server.uri(), SCHEDULE),
            DEFAULT_FIRST_STAGE_FILTER,
            DEFAULT_SECOND_STAGE_SELECTOR,
        )
        .await
        .expect("Discovery failed");

    assert_eq!(links, vec![match_link("1002440062"), match_link("1002440070")]);
}

#[tokio::test]
async fn test_missing_game_page_fails_discovery() {
    let mock_server = MockServer::start().await;

    mount_schedule(&mock_server, SCHEDULE, &["/en_US/lck/matches/404"]).await;
    Mock::given(method("GET"))
        .and(path("/en_US/lck/matches/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let crawler = PageCrawler::new(HttpRenderer::new(Duration::ZERO).unwrap());
    let result = crawler
        .discover(
            &format!("{}{}", mock_server.uri(), SCHEDULE),
            DEFAULT_FIRST_STAGE_FILTER,
            DEFAULT_SECOND_STAGE_SELECTOR,
        )
        .await;

    assert!(matches!(
        result,
        Err(HarvestError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_batch_scheduler_over_http() {
    let mock_server = MockServer::start().await;

    let mut schedule_links = Vec::new();
    for week in 1..=5 {
        let schedule = format!("/en_US/lck/lck_2018_spring/schedule/regular_season/{}", week);
        let game_page = format!("/en_US/lck/matches/{}", week);
        mount_schedule(&mock_server, &schedule, &[game_page.as_str()]).await;
        mount_game_page(&mock_server, &game_page, &format!("100244006{}", week)).await;
        schedule_links.push(format!("{}{}", mock_server.uri(), schedule));
    }

    let scheduler = BatchScheduler::new(HttpRenderer::factory(Duration::ZERO));
    let batches = scheduler
        .run(&schedule_links, Some(2), Some(3))
        .await
        .expect("Batched discovery failed");

    assert_eq!(batches.len(), 3);
    assert_eq!(batches[2], vec![match_link("1002440065")]);
    let flattened: Vec<String> = batches.concat();
    let expected: Vec<String> = (1..=5)
        .map(|week| match_link(&format!("100244006{}", week)))
        .collect();
    assert_eq!(flattened, expected);
}

#[tokio::test]
async fn test_run_all_end_to_end() {
    let mock_server = MockServer::start().await;

    mount_schedule(
        &mock_server,
        SCHEDULE,
        &["/en_US/lck/matches/1", "/en_US/lck/matches/2"],
    )
    .await;
    mount_game_page(&mock_server, "/en_US/lck/matches/1", "1002440062").await;
    mount_game_page(&mock_server, "/en_US/lck/matches/2", "1002440070").await;
    for game_id in ["1002440062", "1002440070"] {
        mount_game_json(
            &mock_server,
            game_id,
            json!({"gameId": game_id, "source": "game"}),
            json!({"frames": [], "source": "timeline"}),
        )
        .await;
    }

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let mut harvester = Harvester::with_settings(lck_week_one(&mock_server), test_settings(&mock_server));
    let summary = harvester.run_all(out.path()).await.expect("Harvest failed");

    assert_eq!(summary.schedule_links, 1);
    assert_eq!(summary.match_links, 2);
    assert_eq!(summary.games_persisted, 2);
    assert!(summary.advisories.is_empty());

    let content = std::fs::read_to_string(out.path().join("game_TRLH1_1002440062.json"))
        .expect("Game file missing");
    let record: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        record,
        json!({"gameId": "1002440062", "source": "timeline", "frames": []})
    );
    assert!(out.path().join("game_TRLH1_1002440070.json").exists());
}

#[tokio::test]
async fn test_run_all_batched() {
    let mock_server = MockServer::start().await;

    mount_schedule(&mock_server, SCHEDULE, &["/en_US/lck/matches/1"]).await;
    mount_game_page(&mock_server, "/en_US/lck/matches/1", "1002440062").await;
    mount_game_json(
        &mock_server,
        "1002440062",
        json!({"gameId": 1002440062}),
        json!({"frames": []}),
    )
    .await;

    let settings = HarvestSettings {
        batch_size: Some(1),
        worker_count: Some(2),
        ..test_settings(&mock_server)
    };
    let out = tempfile::tempdir().unwrap();
    let mut harvester = Harvester::with_settings(lck_week_one(&mock_server), settings);
    let summary = harvester.run_all(out.path()).await.expect("Harvest failed");

    assert_eq!(summary.games_persisted, 1);
    assert_eq!(harvester.match_links(), Some(&[match_link("1002440062")][..]));
}

#[tokio::test]
async fn test_run_all_without_games() {
    let mock_server = MockServer::start().await;
    mount_schedule(&mock_server, SCHEDULE, &[]).await;

    let out = tempfile::tempdir().unwrap();
    let mut harvester = Harvester::with_settings(lck_week_one(&mock_server), test_settings(&mock_server));
    let summary = harvester.run_all(out.path()).await.expect("Harvest failed");

    assert!(summary.is_empty());
    assert_eq!(summary.games_persisted, 0);
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}
