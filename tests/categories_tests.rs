use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commerce_admin_rust::categories::{CategoryKind, NewCategory};
use commerce_admin_rust::error::Error;
use commerce_admin_rust::AdminClient;

#[tokio::test]
async fn test_list_parses_the_category_tree() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "categories": [{
                    "_id": "c1",
                    "name": "Apparel",
                    "slug": "apparel",
                    "type": "main",
                    "children": [
                        {"_id": "c2", "name": "Shirts", "type": "sub", "parent": "c1"}
                    ]
                }],
                "pagination": {"total": 1, "page": 1, "pages": 1, "limit": 50}
            }
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let page = client.categories().list(1, 50).await.unwrap();

    assert_eq!(page.items.len(), 1);
    let root = &page.items[0];
    assert_eq!(root.kind, CategoryKind::Main);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "Shirts");
    assert_eq!(
        root.children[0].parent.as_ref().unwrap().category_id(),
        "c1"
    );
}

#[tokio::test]
async fn test_get_accepts_an_embedded_parent_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"category": {
                "_id": "c2",
                "name": "Shirts",
                "type": "sub",
                "parent": {"_id": "c1", "name": "Apparel", "slug": "apparel"}
            }}
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let category = client.categories().get("c2").await.unwrap();

    let parent = category.parent.as_ref().unwrap();
    assert_eq!(parent.category_id(), "c1");
    assert_eq!(parent.name(), Some("Apparel"));
}

#[tokio::test]
async fn test_get_missing_category_is_a_shape_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories/nope"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"category": null}
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let result = client.categories().get("nope").await;

    assert!(matches!(result, Err(Error::Shape(_))));
}

#[tokio::test]
async fn test_create_serializes_the_type_discriminator() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/categories"))
        .and(header("content-type", "application/json"))
        .and(wiremock::matchers::body_json(json!({
            "name": "Shirts",
            "type": "sub",
            "parent": "c1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "success",
            "data": {"category": {"_id": "c2", "name": "Shirts", "type": "sub"}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let payload = NewCategory {
        name: "Shirts".to_string(),
        kind: Some(CategoryKind::Sub),
        parent: Some("c1".to_string()),
        ..Default::default()
    };
    let category = client.categories().create(&payload).await.unwrap();

    assert_eq!(category.id, "c2");
    assert_eq!(category.kind, CategoryKind::Sub);
}

#[tokio::test]
async fn test_delete_passes_backend_errors_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/categories/c1"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": "error",
            "message": "category still has products"
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let result = client.categories().delete("c1").await;

    match result {
        Err(Error::Http { status, message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "category still has products");
        }
        other => panic!("expected an HTTP error, got {:?}", other),
    }
}
