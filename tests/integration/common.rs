//! Mock site shared by the integration tests

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Match-history link for a TRLH1 game
pub fn match_link(game_id: &str) -> String {
    format!(
        "https://matchhistory.na.leagueoflegends.com/en/#match-details/TRLH1/{}?gameHash=a3b08c115923f00d&tab=overview",
        game_id
    )
}

/// Stats API root on the mock server
pub fn api_base(server: &MockServer) -> String {
    format!("{}/v1/stats/game/", server.uri())
}

/// Site root on the mock server, in the shape of the lolesports locale root
pub fn site_base(server: &MockServer) -> String {
    format!("{}/en_US/", server.uri())
}

/// Serves an HTML page at `page_path`
pub async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Serves a schedule page linking to the given game pages
pub async fn mount_schedule(server: &MockServer, page_path: &str, game_pages: &[&str]) {
    let anchors: String = game_pages
        .iter()
        .map(|game| format!(r#"<a href="{}">Game</a>"#, game))
        .collect();
    let body = format!(
        r#"<html><body><a href="/en_US/news">News</a>{}</body></html>"#,
        anchors
    );
    mount_page(server, page_path, body).await;
}

/// Serves a game page carrying one stats link
pub async fn mount_game_page(server: &MockServer, page_path: &str, game_id: &str) {
    let body = format!(
        r#"<html><body><div class="game"><a class="stats-link" href="{}">Stats</a></div></body></html>"#,
        match_link(game_id)
    );
    mount_page(server, page_path, body).await;
}

/// Serves the game and timeline JSON for `game_id`
pub async fn mount_game_json(server: &MockServer, game_id: &str, game: Value, timeline: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/stats/game/TRLH1/{}", game_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(game))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/stats/game/TRLH1/{}/timeline", game_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(timeline))
        .mount(server)
        .await;
}
