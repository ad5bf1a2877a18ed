//! End-to-end tests running the client through the reqwest transport
//! against a local mock server.

use digitalocean_client::{DigitalOceanClient, DropletId, Error, ImageId, RegionId, SizeId};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> DigitalOceanClient {
    DigitalOceanClient::builder("test-client-id", "test-api-key")
        .unwrap()
        .with_base_url(server.uri())
        .unwrap()
        .with_timeout(5)
        .build()
        .unwrap()
}

#[tokio::test]
async fn new_droplet_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/droplets/new"))
        .and(query_param("name", "dropletName"))
        .and(query_param("size_id", "3"))
        .and(query_param("image_id", "2"))
        .and(query_param("region_id", "1"))
        .and(query_param("client_id", "test-client-id"))
        .and(query_param("api_key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "droplet": {"id": 100824, "name": "dropletName", "image_id": 2, "size_id": 3, "event_id": 7499}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .new_droplet(
            "dropletName",
            SizeId::new(3),
            ImageId::new(2),
            RegionId::new(1),
            None,
        )
        .await
        .unwrap();

    assert_eq!(response["status"], "OK");
    assert_eq!(response["droplet"]["event_id"], 7499);
}

#[tokio::test]
async fn regions_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/regions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "regions": [{"id": 1, "name": "New York 1"}, {"id": 2, "name": "Amsterdam 1"}]
        })))
        .mount(&server)
        .await;

    let regions = test_client(&server).regions().await.unwrap();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions["2"]["name"], "Amsterdam 1");
}

#[tokio::test]
async fn snapshot_name_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/droplets/42/snapshot/"))
        .and(query_param("name", "before upgrade & reboot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "event_id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .take_snapshot(DropletId::new(42), Some("before upgrade & reboot"))
        .await
        .unwrap();
}

#[tokio::test]
async fn server_error_is_connection_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server).sizes().await.unwrap_err();
    assert!(matches!(err, Error::ConnectionFailed(_)));
}

#[tokio::test]
async fn html_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .show_droplet(DropletId::new(1))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DecodeError(_)));
}

#[tokio::test]
async fn unreachable_server_is_connection_failed() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    drop(server);

    let err = client.droplets().await.unwrap_err();
    assert!(matches!(err, Error::ConnectionFailed(_)));
}
