use takeapp_catalog::{Client, Error};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

const STORE_URL: &str = "https://take.app/st_9fKq2x";

async fn mock_storefront(body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/st_9fKq2x"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn fetch_catalog_success() {
    let mock_server = mock_storefront(&load_fixture("storefront.html")).await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let catalog = client.fetch_catalog(STORE_URL).await.unwrap();

    assert_eq!(catalog.total_products, 3);
    assert_eq!(catalog.products.len(), 3);
    assert_eq!(catalog.store.id, "st_9fKq2x");
    assert_eq!(catalog.store.title, "Arora Electronics");
    assert_eq!(catalog.store.currency, "INR");
    assert_eq!(catalog.store.categories.len(), 2);
    assert_eq!(catalog.store.merchant.name, "Rohit Arora");
    assert_eq!(
        catalog.store.merchant.support_details.support_email.as_deref(),
        Some("support@aroraelectronics.in")
    );
}

#[tokio::test]
async fn fetch_catalog_http_error_carries_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/st_9fKq2x"))
        .respond_with(ResponseTemplate::new(404).set_body_string("store not found"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_catalog(STORE_URL).await.unwrap_err();

    match &err {
        Error::FetchFailed { status, .. } => assert_eq!(*status, Some(404)),
        other => panic!("expected FetchFailed, got {other:?}"),
    }
    assert_eq!(err.suggested_status(), 404);
}

#[tokio::test]
async fn fetch_catalog_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/st_9fKq2x"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_catalog(STORE_URL).await.unwrap_err();
    assert!(matches!(err, Error::FetchFailed { .. }));
}

#[tokio::test]
async fn page_without_hydration_payload() {
    let mock_server = mock_storefront(&load_fixture("storefront_no_state.html")).await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_catalog(STORE_URL).await.unwrap_err();
    assert!(matches!(err, Error::NoEmbeddedStateFound));
    assert_eq!(err.suggested_status(), 500);
}

#[tokio::test]
async fn page_with_truncated_payload() {
    let mock_server = mock_storefront(&load_fixture("storefront_malformed_state.html")).await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_catalog(STORE_URL).await.unwrap_err();
    assert!(matches!(err, Error::MalformedEmbeddedState(_)));
}

#[tokio::test]
async fn empty_catalog_maps_to_not_found() {
    let mock_server = mock_storefront(&load_fixture("storefront_empty_catalog.html")).await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.fetch_catalog(STORE_URL).await.unwrap_err();
    assert!(matches!(err, Error::NoProductsFound));
    assert_eq!(err.suggested_status(), 404);
}

#[tokio::test]
async fn blank_url_fails_before_any_request() {
    // No mocks mounted: reaching the network would be a test failure anyway.
    let mock_server = MockServer::start().await;
    let client = Client::with_base_url(&mock_server.uri()).unwrap();

    assert!(matches!(
        client.fetch_catalog("").await.unwrap_err(),
        Error::MissingUrl
    ));
    assert!(matches!(
        client.fetch_catalog("   ").await.unwrap_err(),
        Error::MissingUrl
    ));
}

#[tokio::test]
async fn foreign_url_fails_before_any_request() {
    let mock_server = MockServer::start().await;
    let client = Client::with_base_url(&mock_server.uri()).unwrap();

    let err = client
        .fetch_catalog("https://example.com/st_9fKq2x")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUrlFormat(_)));
    assert_eq!(err.suggested_status(), 400);
}
