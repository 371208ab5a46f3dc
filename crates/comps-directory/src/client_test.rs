use comps_core::Coordinate;

use super::*;

fn test_client(base_url: &str) -> DirectoryClient {
    DirectoryClient::with_base_url("test-key", 30, "comps-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn candidate(name: &str) -> BusinessCandidate {
    BusinessCandidate {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        review_count: 10,
        rating: 4.0,
        phone: None,
        address: None,
    }
}

#[test]
fn build_url_appends_search_path_and_params() {
    let client = test_client("https://api.yelp.com/v3");
    let url = client
        .build_url(&[("term", "cafe"), ("limit", "50")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.yelp.com/v3/businesses/search?term=cafe&limit=50"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let client = test_client("https://api.yelp.com/v3/");
    let url = client.build_url(&[("term", "gym")]).unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.yelp.com/v3/businesses/search?term=gym"
    );
}

#[test]
fn build_url_encodes_quotes_and_apostrophes() {
    let client = test_client("https://api.yelp.com/v3");
    let url = client.build_url(&[("term", "\"Joe's Pizza\"")]).unwrap();
    assert!(
        url.as_str().contains("%22Joe%27s+Pizza%22"),
        "term should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = DirectoryClient::with_base_url("k", 30, "ua", "not a url");
    assert!(matches!(result, Err(DirectoryError::InvalidBaseUrl { .. })));
}

#[test]
fn exact_match_counts_case_insensitively() {
    let businesses = vec![
        candidate("Joe's Pizza"),
        candidate("Joe's Pizza NYC"),
        candidate("joe's pizza"),
    ];
    assert_eq!(count_exact_name_matches(&businesses, "Joe's Pizza"), 2);
}

#[test]
fn exact_match_ignores_substrings() {
    let businesses = vec![candidate("Pizza Palace"), candidate("The Pizza")];
    assert_eq!(count_exact_name_matches(&businesses, "Pizza"), 0);
}

#[test]
fn exact_match_empty_list_is_zero() {
    assert_eq!(count_exact_name_matches(&[], "Starbucks"), 0);
}

#[test]
fn search_query_defaults() {
    let coord = Coordinate::new(40.7580, -73.9855).unwrap();
    let q = SearchQuery::new("cafe", coord);
    assert_eq!(q.radius_meters, 16_093);
    assert_eq!(q.limit, 50);
    let q = q.with_radius(800).with_limit(5);
    assert_eq!(q.radius_meters, 800);
    assert_eq!(q.limit, 5);
}

#[test]
fn chain_scope_defaults_to_new_york() {
    let client = test_client("https://api.yelp.com/v3");
    let scope = client.chain_scope();
    assert_eq!(scope.location, "New York, NY");
    assert_eq!(scope.radius_meters, 40_000);
    assert_eq!(scope.categories, "restaurants,food,bars");
}

#[tokio::test]
async fn blank_term_is_rejected_without_request() {
    // Unroutable base: a request would surface as a network error instead.
    let client = test_client("http://127.0.0.1:9");
    let coord = Coordinate::new(40.0, -73.0).unwrap();
    let err = client
        .search(&SearchQuery::new("   ", coord))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidQuery(_)), "got {err:?}");
}

#[tokio::test]
async fn blank_brand_is_rejected_without_request() {
    let client = test_client("http://127.0.0.1:9");
    let err = client.estimate_chain_size("").await.unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidQuery(_)), "got {err:?}");
}
