//! Integration tests for `ApiClient` using wiremock HTTP mocks.

use rust_decimal::Decimal;
use tempfile::TempDir;
use termshop_api::{ApiClient, ApiError, TokenStore};
use termshop_core::NewAddress;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> (ApiClient, TokenStore, TempDir) {
    let dir = TempDir::new().expect("tempdir should be created");
    let tokens = TokenStore::new(dir.path().join("token"));
    let client = ApiClient::with_base_url(base_url, 5, "termshop-test", tokens.clone())
        .expect("client construction should not fail");
    (client, tokens, dir)
}

fn product_page() -> serde_json::Value {
    serde_json::json!({
        "count": 12,
        "data": [
            {"id": 1, "name": "Terminal Green Tea", "description": "", "price": "9.99", "tags": "tea, green"},
            {"id": 2, "name": "Amber Cola", "description": "Retro fizz", "price": 2.5, "tags": "cola"}
        ]
    })
}

#[tokio::test]
async fn list_products_sends_window_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("skip", "5"))
        .and(query_param("limit", "5"))
        .and(query_param("q", "tea"))
        .and(query_param("tags", "green,new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let page = client
        .list_products(5, 5, Some("tea"), Some("green,new"))
        .await
        .expect("should parse product page");

    assert_eq!(page.count, 12);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].price, "9.99".parse::<Decimal>().unwrap());
    assert_eq!(page.data[1].price, "2.5".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn list_products_omits_absent_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "5"))
        .and(wiremock::matchers::query_param_is_missing("q"))
        .and(wiremock::matchers::query_param_is_missing("tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    client
        .list_products(0, 5, None, None)
        .await
        .expect("should parse product page");
}

#[tokio::test]
async fn get_product_maps_missing_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let err = client.get_product(99).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let err = client.list_products(0, 5, None, None).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::UnexpectedStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn malformed_body_reports_payload_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let err = client.list_products(0, 5, None, None).await.unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("product list"),
        "expected error message to name the payload, got: {msg}"
    );
}

#[tokio::test]
async fn bearer_token_is_attached_once_saved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(header("authorization", "Bearer tok-abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, tokens, _guard) = test_client(&server.uri());
    tokens.save("tok-abc123").expect("token should save");

    let lines = client.fetch_cart().await.expect("should fetch cart");
    assert!(lines.is_empty());
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let server = MockServer::start().await;

    // Matched first: any request carrying an authorization header fails the
    // test via the expect(0) below.
    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    client.fetch_cart().await.expect("should fetch cart");
}

#[tokio::test]
async fn fetch_cart_decodes_wrapped_collection() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {"id": 4, "quantity": 2, "product": {"id": 1, "name": "Terminal Green Tea", "price": "9.99"}}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let lines = client.fetch_cart().await.expect("should fetch cart");

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].id, 4);
    assert_eq!(lines[0].line_total(), "19.98".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn add_cart_line_posts_wire_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart"))
        .and(body_json(serde_json::json!({"productId": 9, "quantity": 2})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    client
        .add_cart_line(9, 2)
        .await
        .expect("should add cart line");
}

#[tokio::test]
async fn update_cart_line_patches_quantity() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/cart/7"))
        .and(body_json(serde_json::json!({"quantity": 3})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    client
        .update_cart_line(7, 3)
        .await
        .expect("should update cart line");
}

#[tokio::test]
async fn remove_cart_line_issues_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cart/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    client
        .remove_cart_line(7)
        .await
        .expect("should remove cart line");
}

#[tokio::test]
async fn create_address_returns_stored_record() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/address"))
        .and(body_json(serde_json::json!({
            "lineOne": "1 Main St",
            "city": "Pune",
            "country": "IN",
            "pincode": "411001"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "lineOne": "1 Main St",
            "city": "Pune",
            "country": "IN",
            "pincode": "411001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let created = client
        .create_address(&NewAddress {
            line_one: "1 Main St".to_owned(),
            line_two: None,
            city: "Pune".to_owned(),
            country: "IN".to_owned(),
            pincode: "411001".to_owned(),
        })
        .await
        .expect("should create address");

    assert_eq!(created.id, 42);
    assert_eq!(created.line_one, "1 Main St");
}

#[tokio::test]
async fn set_default_address_posts_wire_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/update"))
        .and(body_json(serde_json::json!({"defaultShippingAddressId": 5})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    client
        .set_default_address(5)
        .await
        .expect("should set default address");
}

#[tokio::test]
async fn create_order_posts_to_orders() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    client.create_order().await.expect("should create order");
}

#[tokio::test]
async fn list_orders_parses_history() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "id": 3,
            "netAmount": "19.98",
            "createdAt": "2025-08-01T10:30:00Z",
            "status": "PLACED",
            "orderProducts": [
                {"id": 1, "name": "Terminal Green Tea", "price": "9.99", "quantity": 2}
            ]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let orders = client.list_orders().await.expect("should parse orders");

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, 3);
    assert_eq!(orders[0].order_products[0].quantity, 2);
    assert_eq!(
        orders[0].net_amount,
        "19.98".parse::<Decimal>().unwrap()
    );
}

#[tokio::test]
async fn login_returns_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "ada@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "tok-fresh",
            "user": {"id": 1, "name": "Ada", "email": "ada@example.com", "role": "USER"}
        })))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let session = client
        .login("ada@example.com", "hunter2")
        .await
        .expect("should parse session");

    assert_eq!(session.token, "tok-fresh");
    assert_eq!(session.user.name, "Ada");
}

#[tokio::test]
async fn rejected_login_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let err = client.login("ada@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[tokio::test]
async fn me_decodes_wrapped_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {"id": 1, "name": "Ada", "email": "ada@example.com", "role": "ADMIN"}
        })))
        .mount(&server)
        .await;

    let (client, _tokens, _guard) = test_client(&server.uri());
    let user = client.me().await.expect("should parse current user");
    assert_eq!(user.name, "Ada");
    assert_eq!(user.role, termshop_core::Role::Admin);
}
