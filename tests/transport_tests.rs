use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commerce_admin_rust::error::Error;
use commerce_admin_rust::session::Session;
use commerce_admin_rust::AdminClient;

fn deal_envelope() -> serde_json::Value {
    json!({
        "status": "success",
        "data": {"deal": {
            "_id": "d1",
            "title": "Deal",
            "discountType": "percentage",
            "discountValue": 10.0
        }}
    })
}

#[tokio::test]
async fn test_bearer_token_is_attached_when_a_session_is_present() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/d1"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deal_envelope()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    client
        .session()
        .set(Session::new("admin-token".to_string(), 3600));

    let deal = client.deals().get("d1").await.unwrap();
    assert_eq!(deal.id, "d1");
}

#[tokio::test]
async fn test_no_authorization_header_without_a_session() {
    let mock_server = MockServer::start().await;

    // A request carrying any authorization header trips this guard.
    Mock::given(method("GET"))
        .and(path("/deals/d1"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "message": "unexpected authorization header"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/deals/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deal_envelope()))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let deal = client.deals().get("d1").await.unwrap();
    assert_eq!(deal.title, "Deal");
}

#[tokio::test]
async fn test_401_clears_the_session_and_surfaces_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/d1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "message": "jwt expired"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    client
        .session()
        .set(Session::new("stale-token".to_string(), 3600));

    let result = client.deals().get("d1").await;

    match result {
        Err(Error::Auth(message)) => assert_eq!(message, "jwt expired"),
        other => panic!("expected an auth error, got {:?}", other),
    }
    assert!(client.session().get().is_none());
}

#[tokio::test]
async fn test_non_2xx_carries_the_backend_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/d1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": "error",
            "message": "discount value out of range"
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let result = client.deals().get("d1").await;

    match result {
        Err(Error::Http { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "discount value out of range");
        }
        other => panic!("expected an HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_envelope_error_body_falls_back_to_the_status_line() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/d1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let result = client.deals().get("d1").await;

    match result {
        Err(Error::Http { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected an HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_maps_to_network_error() {
    // Start a server only to learn a free port, then shut it down.
    let dead_uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = AdminClient::new(&dead_uri);
    let result = client.deals().get("d1").await;

    match result {
        Err(err) => assert!(err.is_transient(), "expected a transient error, got {:?}", err),
        Ok(_) => panic!("expected a network error"),
    }
}
