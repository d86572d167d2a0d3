use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commerce_admin_rust::dashboard::StatsRange;
use commerce_admin_rust::AdminClient;

#[tokio::test]
async fn test_stats_reconciles_the_nested_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"stats": {
                "totalRevenue": 125000.5,
                "totalOrders": 820,
                "totalCustomers": 340,
                "totalVisitors": 9100,
                "revenueChange": 0.12
            }}
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let stats = client.dashboard().stats().await.unwrap();

    assert_eq!(stats.total_revenue, 125000.5);
    assert_eq!(stats.total_orders, 820);
    assert_eq!(stats.revenue_change, Some(0.12));
}

#[tokio::test]
async fn test_revenue_accepts_a_bare_array_and_sends_the_range() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/revenue"))
        .and(query_param("range", "30d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [
                {"period": "2026-07-01", "revenue": 1800.0},
                {"period": "2026-07-02", "revenue": 2100.0}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let series = client
        .dashboard()
        .revenue(Some(StatsRange::Month))
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series[1].revenue, 2100.0);
}

#[tokio::test]
async fn test_visitors_accepts_the_nested_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/visitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"visitors": [{"period": "2026-07-01", "count": 420}]}
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let series = client.dashboard().visitors(None).await.unwrap();

    assert_eq!(series[0].count, 420);
}

#[tokio::test]
async fn test_transactions_are_paginated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/transactions"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {
                "transactions": [
                    {"_id": "t1", "customer": "Ada", "amount": 42.0, "status": "paid"}
                ],
                "pagination": {"total": 1, "page": 1, "pages": 1, "limit": 15}
            }
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let page = client.dashboard().transactions(1, 15).await.unwrap();

    assert_eq!(page.items[0].id, "t1");
    assert_eq!(page.items[0].amount, 42.0);
    assert_eq!(page.pagination.limit, 15);
}

#[tokio::test]
async fn test_top_products_reconcile_under_products() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/top-products"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"products": [
                {"_id": "p1", "name": "Mug", "sold": 310, "revenue": 3100.0}
            ]}
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let top = client.dashboard().top_products(5).await.unwrap();

    assert_eq!(top[0].name, "Mug");
    assert_eq!(top[0].sold, 310);
}

#[tokio::test]
async fn test_top_customers_reconcile_under_customers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/top-customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"customers": [
                {"_id": "u1", "name": "Ada", "email": "ada@example.com", "orders": 12, "spent": 640.0}
            ]}
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(&mock_server.uri());
    let top = client.dashboard().top_customers(10).await.unwrap();

    assert_eq!(top[0].email.as_deref(), Some("ada@example.com"));
}
