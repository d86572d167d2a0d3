use reqwest::multipart;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commerce_admin_rust::deals::{Applicability, DealPayload, DiscountKind};
use commerce_admin_rust::AdminClient;

fn deal_body() -> serde_json::Value {
    json!({
        "_id": "d1",
        "title": "Summer sale",
        "discountType": "percentage",
        "discountValue": 15.0,
        "startDate": "2026-06-01T00:00:00Z",
        "endDate": "2026-08-31T23:59:59Z",
        "isActive": true,
        "isGlobal": false,
        "products": ["p1"],
        "categories": [],
        "subCategories": [],
        "priority": 3
    })
}

#[tokio::test]
async fn test_get_folds_scope_and_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"deal": deal_body()}
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let deal = client.deals().get("d1").await.unwrap();

    assert_eq!(deal.discount.kind, DiscountKind::Percentage);
    assert_eq!(deal.discount.value, 15.0);
    assert_eq!(deal.starts_at.as_deref(), Some("2026-06-01T00:00:00Z"));
    assert!(deal.is_active);
    assert_eq!(deal.priority, 3);
    match &deal.applicability {
        Applicability::Scoped(scope) => assert_eq!(scope.products, vec!["p1"]),
        Applicability::Global => panic!("expected a scoped deal"),
    }
}

#[tokio::test]
async fn test_list_returns_pagination_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "deals": [deal_body()],
                "pagination": {"total": 1, "page": 1, "pages": 1, "limit": 20}
            }
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let page = client.deals().list(1, 20).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.limit, 20);
}

#[tokio::test]
async fn test_create_sends_the_structured_payload_as_json() {
    let mock_server = MockServer::start().await;

    let payload = DealPayload {
        title: "Summer sale".to_string(),
        discount_type: DiscountKind::Percentage,
        discount_value: 15.0,
        start_date: Some("2026-06-01T00:00:00Z".to_string()),
        end_date: Some("2026-08-31T23:59:59Z".to_string()),
        is_active: true,
        is_global: false,
        products: vec!["p1".to_string()],
        categories: vec![],
        sub_categories: vec![],
        priority: Some(3),
    };

    Mock::given(method("POST"))
        .and(path("/deals"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "title": "Summer sale",
            "discountType": "percentage",
            "discountValue": 15.0,
            "startDate": "2026-06-01T00:00:00Z",
            "endDate": "2026-08-31T23:59:59Z",
            "isActive": true,
            "isGlobal": false,
            "products": ["p1"],
            "priority": 3
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "data": {"deal": deal_body()}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let deal = client.deals().create(&payload).await.unwrap();

    assert_eq!(deal.id, "d1");
}

#[tokio::test]
async fn test_create_multipart_never_sends_a_json_content_type() {
    let mock_server = MockServer::start().await;

    // A multipart create that arrives with an explicit JSON content type
    // trips this guard; mount order makes it win over the success mock.
    Mock::given(method("POST"))
        .and(path("/deals"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "message": "expected multipart"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/deals"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "data": {"deal": deal_body()}
        })))
        .mount(&mock_server)
        .await;

    let form = multipart::Form::new()
        .text("title", "Summer sale")
        .text("discountType", "percentage")
        .text("discountValue", "15.0")
        .part(
            "image",
            multipart::Part::bytes(vec![0x89, 0x50, 0x4E, 0x47])
                .file_name("banner.png")
                .mime_str("image/png")
                .unwrap(),
        );

    let client = AdminClient::new(&mock_server.uri());
    let deal = client.deals().create_multipart(form).await.unwrap();

    assert_eq!(deal.title, "Summer sale");
}

#[tokio::test]
async fn test_update_multipart_targets_the_deal_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/deals/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"deal": deal_body()}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let form = multipart::Form::new().text("title", "Summer sale");

    let client = AdminClient::new(&mock_server.uri());
    let deal = client.deals().update_multipart("d1", form).await.unwrap();

    assert_eq!(deal.id, "d1");
}

#[tokio::test]
async fn test_global_deal_from_the_flat_envelope_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deals/d2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "_id": "d2",
                "title": "Everything",
                "discountType": "flat",
                "discountValue": 9.99,
                "isGlobal": true
            }
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let deal = client.deals().get("d2").await.unwrap();

    assert_eq!(deal.applicability, Applicability::Global);
    assert_eq!(deal.discount.kind, DiscountKind::Flat);
}
