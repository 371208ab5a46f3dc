//! Integration tests for `GeoClient` using wiremock HTTP mocks.

use comps_parcel::{Borough, GeoClient, ParcelError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeoClient {
    GeoClient::with_base_url("geo-key", 5, "comps-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn locate_resolves_bbl_and_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/address.json"))
        .and(header("Ocp-Apim-Subscription-Key", "geo-key"))
        .and(query_param("houseNumber", "350"))
        .and(query_param("street", "5th Ave"))
        .and(query_param("borough", "MANHATTAN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": {
                "bbl": "1008350041",
                "latitude": 40.748_4,
                "longitude": -73.985_6
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let found = client
        .locate("350", "5th Ave", Borough::Manhattan)
        .await
        .expect("address should resolve");

    assert_eq!(found.bbl.to_string(), "1008350041");
    assert_eq!(found.latitude, Some(40.748_4));
}

#[tokio::test]
async fn staten_island_is_sent_with_a_space() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("borough", "STATEN ISLAND"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": {
                "bblBoroughCode": "5",
                "bblTaxBlock": "00100",
                "bblTaxLot": "0001"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let found = client
        .locate("1", "Bay St", Borough::StatenIsland)
        .await
        .unwrap();
    assert_eq!(found.bbl.to_string(), "5001000001");
    assert!(found.latitude.is_none());
}

#[tokio::test]
async fn missing_address_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "address": {} })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .locate("999999", "Nowhere St", Borough::Queens)
        .await
        .expect_err("no bbl should fail");

    assert!(
        matches!(err, ParcelError::AddressNotFound { ref borough, .. } if borough == "QUEENS"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn blank_street_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.locate("1", "   ", Borough::Bronx).await.unwrap_err();
    assert!(matches!(err, ParcelError::AddressNotFound { .. }));
}

#[tokio::test]
async fn unauthorized_maps_to_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .locate("350", "5th Ave", Borough::Manhattan)
        .await
        .unwrap_err();
    assert!(matches!(err, ParcelError::Upstream { status: 401, .. }));
}
