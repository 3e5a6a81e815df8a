//! Integration tests for the catalog client
//!
//! These tests use wiremock to stand in for a STAC API and exercise eager
//! search, pagination, the item cap, lazy pull semantics, and asset signing.

use sar_sweep::catalog::{CatalogClient, StacItem};
use sar_sweep::config::CatalogConfig;
use sar_sweep::geo::{BoundingBox, TimeRange};
use sar_sweep::SweepError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a catalog config pointed at the mock server
fn test_catalog_config(base_url: &str) -> CatalogConfig {
    CatalogConfig {
        api_url: base_url.to_string(),
        collection: "sentinel-1-grd".to_string(),
        orbit_state: "descending".to_string(),
        instrument_mode: "IW".to_string(),
        sign_url: None,
        limit: None,
    }
}

fn item_json(id: &str, day: u32) -> serde_json::Value {
    json!({
        "id": id,
        "collection": "sentinel-1-grd",
        "bbox": [13.0, 52.0, 14.0, 53.0],
        "properties": {"datetime": format!("2022-01-{:02}T12:00:00Z", day)},
        "assets": {
            "vv": {"href": format!("https://data.example.com/{}/vv.tiff", id)}
        }
    })
}

fn page_json(ids: &[&str], next_href: Option<&str>) -> serde_json::Value {
    let features: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| item_json(id, 1 + i as u32))
        .collect();

    let links: Vec<_> = next_href
        .iter()
        .map(|href| json!({"rel": "next", "href": href, "method": "GET"}))
        .collect();

    json!({"type": "FeatureCollection", "features": features, "links": links})
}

fn search_area() -> (BoundingBox, TimeRange) {
    (
        BoundingBox::new(13.0, 52.0, 14.0, 53.0).unwrap(),
        TimeRange::parse("2022-01-01/2022-01-15").unwrap(),
    )
}

#[tokio::test]
async fn test_eager_search_single_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(&["scene-1", "scene-2"], None)),
        )
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();
    let (bbox, range) = search_area();

    let items = client.search(&bbox, &range, None).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "scene-1");
    assert_eq!(items[1].id, "scene-2");
}

#[tokio::test]
async fn test_eager_search_follows_pagination() {
    let mock_server = MockServer::start().await;
    let next_href = format!("{}/search?page=2", mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(&["scene-1", "scene-2"], Some(&next_href))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["scene-3"], None)))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();
    let (bbox, range) = search_area();

    let items = client.search(&bbox, &range, None).await.unwrap();

    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["scene-1", "scene-2", "scene-3"]);
}

#[tokio::test]
async fn test_item_cap_stops_pagination() {
    let mock_server = MockServer::start().await;
    let next_href = format!("{}/search?page=2", mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            &["scene-1", "scene-2", "scene-3", "scene-4", "scene-5"],
            Some(&next_href),
        )))
        .mount(&mock_server)
        .await;

    // The cap is satisfied by page one, so page two must never be requested
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["scene-6"], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();
    let (bbox, range) = search_area();

    let items = client.search(&bbox, &range, Some(2)).await.unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_lazy_stream_partial_consumption() {
    let mock_server = MockServer::start().await;
    let next_href = format!("{}/search?page=2", mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            &["scene-1", "scene-2", "scene-3", "scene-4", "scene-5"],
            Some(&next_href),
        )))
        .mount(&mock_server)
        .await;

    // Abandoning the stream after three pulls must not materialize page two
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["scene-6"], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();
    let (bbox, range) = search_area();

    let mut stream = client.search_stream(&bbox, &range, None);
    for expected in ["scene-1", "scene-2", "scene-3"] {
        let item = stream.next().await.unwrap().unwrap();
        assert_eq!(item.id, expected);
    }
    assert_eq!(stream.yielded(), 3);
    drop(stream);
}

#[tokio::test]
async fn test_lazy_stream_restarts_from_beginning() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(&["scene-1", "scene-2"], None)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();
    let (bbox, range) = search_area();

    let mut first = client.search_stream(&bbox, &range, None);
    assert_eq!(first.next().await.unwrap().unwrap().id, "scene-1");
    drop(first);

    // A second stream is a fresh pass, not a continuation
    let mut second = client.search_stream(&bbox, &range, None);
    assert_eq!(second.next().await.unwrap().unwrap().id, "scene-1");
}

#[tokio::test]
async fn test_lazy_stream_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&["scene-1"], None)))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();
    let (bbox, range) = search_area();

    let mut stream = client.search_stream(&bbox, &range, None);
    assert!(stream.next().await.unwrap().is_some());
    assert!(stream.next().await.unwrap().is_none());
    // Exhausted streams stay exhausted
    assert!(stream.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_search_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[], None)))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();
    let (bbox, range) = search_area();

    let items = client.search(&bbox, &range, None).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_search_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();
    let (bbox, range) = search_area();

    let result = client.search(&bbox, &range, None).await;
    match result {
        Err(SweepError::Api { status, .. }) => assert_eq!(status, 500),
        Err(other) => panic!("expected API error, got {:?}", other),
        Ok(items) => panic!("expected API error, got {} items", items.len()),
    }
}

#[tokio::test]
async fn test_sign_items_appends_cached_token() {
    let mock_server = MockServer::start().await;

    // The token must be fetched once and reused from cache afterwards
    Mock::given(method("GET"))
        .and(path("/sas/v1/token/sentinel-1-grd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "st=2022&sig=abc",
            "msft:expiry": "2099-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_catalog_config(&mock_server.uri());
    config.sign_url = Some(format!("{}/sas/v1/token", mock_server.uri()));
    let client = CatalogClient::new(config).unwrap();

    let item: StacItem = serde_json::from_value(item_json("scene-1", 1)).unwrap();

    let signed = client.sign_items(vec![item.clone()]).await.unwrap();
    assert_eq!(
        signed[0].assets["vv"].href,
        "https://data.example.com/scene-1/vv.tiff?st=2022&sig=abc"
    );

    let signed_again = client.sign_items(vec![item]).await.unwrap();
    assert!(signed_again[0].assets["vv"].href.ends_with("st=2022&sig=abc"));
}

#[tokio::test]
async fn test_sign_items_without_endpoint_is_passthrough() {
    let mock_server = MockServer::start().await;
    let client = CatalogClient::new(test_catalog_config(&mock_server.uri())).unwrap();

    let item: StacItem = serde_json::from_value(item_json("scene-1", 1)).unwrap();
    let href_before = item.assets["vv"].href.clone();

    let signed = client.sign_items(vec![item]).await.unwrap();
    assert_eq!(signed[0].assets["vv"].href, href_before);
}
