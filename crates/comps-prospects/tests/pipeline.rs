//! End-to-end ranking against wiremock-backed directory and news APIs.

use std::time::Duration;

use comps_core::Coordinate;
use comps_directory::DirectoryClient;
use comps_news::NewsClient;
use comps_prospects::{ProspectError, ProspectPipeline};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn times_square() -> Coordinate {
    Coordinate::new(40.7580, -73.9855).unwrap()
}

fn business(id: &str, name: &str, reviews: u32, rating: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "review_count": reviews,
        "rating": rating,
        "location": { "address1": null }
    })
}

fn pipeline(server: &MockServer) -> ProspectPipeline<DirectoryClient, NewsClient> {
    pipeline_with_timeout(server, 5)
}

fn pipeline_with_timeout(
    server: &MockServer,
    timeout_secs: u64,
) -> ProspectPipeline<DirectoryClient, NewsClient> {
    let directory =
        DirectoryClient::with_base_url("yelp-key", timeout_secs, "comps-test/0.1", &server.uri())
            .expect("directory client");
    let news = NewsClient::with_base_url("news-key", timeout_secs, "comps-test/0.1", &server.uri())
        .expect("news client");
    ProspectPipeline::new(directory, news)
}

async fn mount_search(server: &MockServer, businesses: Vec<serde_json::Value>) {
    let total = businesses.len();
    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .and(query_param("term", "cafe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "businesses": businesses, "total": total })),
        )
        .mount(server)
        .await;
}

async fn mount_chain(server: &MockServer, brand: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .and(query_param("term", format!("\"{brand}\"")))
        .respond_with(response)
        .mount(server)
        .await;
}

fn chain_body(brand: &str, locations: usize) -> ResponseTemplate {
    let businesses: Vec<_> = (0..locations)
        .map(|i| business(&format!("{brand}-{i}"), brand, 1, 4.0))
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({ "businesses": businesses, "total": locations }))
}

async fn mount_news(server: &MockServer, brand: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param(
            "q",
            format!("{brand} OR opens OR expands OR raises"),
        ))
        .respond_with(response)
        .mount(server)
        .await;
}

fn news_body(total: u64) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(json!({ "status": "ok", "totalResults": total, "articles": [] }))
}

#[tokio::test]
async fn news_outage_scores_zero_hits_but_keeps_candidate() {
    let server = MockServer::start().await;
    mount_search(&server, vec![business("a", "Ralph's Coffee", 300, 5.0)]).await;
    mount_chain(&server, "Ralph's Coffee", chain_body("Ralph's Coffee", 10)).await;
    mount_news(&server, "Ralph's Coffee", ResponseTemplate::new(500)).await;

    let ranked = pipeline(&server)
        .rank("cafe", times_square())
        .await
        .expect("news failures must not fail the ranking");

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].news_hits, 0);
    assert_eq!(ranked[0].chain_count, 10);
    // chain 4.0 + reviews 2.0 + rating 1.5 + news 0
    assert!((ranked[0].score - 7.5).abs() < 1e-9, "got {}", ranked[0].score);
}

#[tokio::test]
async fn chain_outage_drops_candidate_and_keeps_the_rest() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        vec![
            business("a", "Alpha Cafe", 100, 4.0),
            business("b", "Beta Cafe", 200, 4.5),
            business("c", "Gamma Cafe", 50, 3.0),
        ],
    )
    .await;
    mount_chain(&server, "Alpha Cafe", chain_body("Alpha Cafe", 2)).await;
    mount_chain(&server, "Beta Cafe", ResponseTemplate::new(503)).await;
    mount_chain(&server, "Gamma Cafe", chain_body("Gamma Cafe", 9)).await;
    mount_news(&server, "Alpha Cafe", news_body(1)).await;
    mount_news(&server, "Beta Cafe", news_body(4)).await;
    mount_news(&server, "Gamma Cafe", news_body(3)).await;

    let ranked = pipeline(&server).rank("cafe", times_square()).await.unwrap();

    let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Gamma Cafe", "Alpha Cafe"]);
    assert_eq!(ranked[0].news_hits, 3);
    assert_eq!(ranked[1].news_hits, 1);
}

async fn mount_three_cafes(server: &MockServer, beta_chain: ResponseTemplate) {
    mount_search(
        server,
        vec![
            business("a", "Alpha Cafe", 100, 4.0),
            business("b", "Beta Cafe", 200, 4.5),
            business("c", "Gamma Cafe", 50, 3.0),
        ],
    )
    .await;
    mount_chain(server, "Alpha Cafe", chain_body("Alpha Cafe", 2)).await;
    mount_chain(server, "Beta Cafe", beta_chain).await;
    mount_chain(server, "Gamma Cafe", chain_body("Gamma Cafe", 9)).await;
    mount_news(server, "Alpha Cafe", news_body(1)).await;
    mount_news(server, "Beta Cafe", news_body(4)).await;
    mount_news(server, "Gamma Cafe", news_body(3)).await;
}

#[tokio::test]
async fn malformed_chain_body_drops_candidate_and_keeps_the_rest() {
    let server = MockServer::start().await;
    mount_three_cafes(&server, ResponseTemplate::new(200).set_body_string("nope")).await;

    let ranked = pipeline(&server).rank("cafe", times_square()).await.unwrap();

    let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Gamma Cafe", "Alpha Cafe"]);
}

#[tokio::test]
async fn timed_out_chain_lookup_drops_candidate_and_keeps_the_rest() {
    let server = MockServer::start().await;
    let stalled = chain_body("Beta Cafe", 30).set_delay(Duration::from_secs(3));
    mount_three_cafes(&server, stalled).await;

    let ranked = pipeline_with_timeout(&server, 1)
        .rank("cafe", times_square())
        .await
        .unwrap();

    let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Gamma Cafe", "Alpha Cafe"]);
}

#[tokio::test]
async fn directory_search_outage_fails_the_ranking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/businesses/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = pipeline(&server)
        .rank("cafe", times_square())
        .await
        .unwrap_err();

    assert!(matches!(err, ProspectError::Directory(_)), "got {err:?}");
}
