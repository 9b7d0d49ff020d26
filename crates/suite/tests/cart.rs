//! Cart endpoints: contents, item management, clearing

mod support;

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex};
use wiremock::Mock;

use storefront_harness::stubs::{
    bearer_auth, json_response, matching_json_path, received_with_header,
};
use storefront_suite::Cart;

use support::auth_header;

fn cart_body(cart_id: &str) -> String {
    json!({
        "id": cart_id,
        "userId": "user-123",
        "items": [
            {
                "productId": 1,
                "productName": "Smartphone",
                "quantity": 1,
                "unitPrice": 599.99,
                "totalPrice": 599.99
            },
            {
                "productId": 2,
                "productName": "Wireless Headphones",
                "quantity": 2,
                "unitPrice": 149.99,
                "totalPrice": 299.98
            }
        ],
        "subtotal": 899.97,
        "tax": 90.00,
        "total": 989.97
    })
    .to_string()
}

fn empty_cart_body(cart_id: &str) -> String {
    json!({
        "id": cart_id,
        "userId": "user-123",
        "items": [],
        "subtotal": 0,
        "tax": 0,
        "total": 0
    })
    .to_string()
}

#[tokio::test]
async fn get_cart() {
    let mut lifecycle = support::start_suite().await;
    let Some(mock) = lifecycle.mock() else {
        tracing::info!("Skipping mock-based test against a real server");
        return;
    };

    let cart_id = Uuid::new_v4().to_string();
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(bearer_auth())
        .respond_with(json_response(200, &cart_body(&cart_id)))
        .mount(mock)
        .await;

    let spec = lifecycle.request_spec().unwrap().with_bearer(support::TOKEN);
    let response = spec.get("/api/cart").await.unwrap();

    assert_eq!(response.status(), 200);

    let cart: Cart = response.json().unwrap();
    assert_eq!(cart.id, cart_id);
    assert_eq!(cart.items.len(), 2);
    assert!(cart.total > 0.0);

    let first = &cart.items[0];
    assert_eq!(first.product_id, 1);
    assert_eq!(first.product_name, "Smartphone");

    assert_eq!(
        received_with_header(
            lifecycle.mock().unwrap(),
            "GET",
            "/api/cart",
            "Authorization",
            &auth_header(),
        )
        .await,
        1
    );

    lifecycle.finish().await.unwrap();
}

#[tokio::test]
async fn add_item_to_cart() {
    let mut lifecycle = support::start_suite().await;
    let Some(mock) = lifecycle.mock() else {
        tracing::info!("Skipping mock-based test against a real server");
        return;
    };

    let cart_id = Uuid::new_v4().to_string();
    let body = json!({
        "id": cart_id,
        "userId": "user-123",
        "items": [
            {
                "productId": 1,
                "productName": "Smartphone",
                "quantity": 1,
                "unitPrice": 599.99,
                "totalPrice": 599.99
            }
        ],
        "subtotal": 599.99,
        "tax": 60.00,
        "total": 659.99
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/api/cart/items"))
        .and(bearer_auth())
        .and(matching_json_path("$.productId"))
        .respond_with(json_response(200, &body))
        .mount(mock)
        .await;

    let spec = lifecycle.request_spec().unwrap().with_bearer(support::TOKEN);
    let response = spec
        .post_json("/api/cart/items", &json!({"productId": 1, "quantity": 1}))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let items = response.json_path("$.items[*]").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["productName"], "Smartphone");
    assert_eq!(items[0]["quantity"], 1);

    lifecycle.finish().await.unwrap();
}

#[tokio::test]
async fn update_cart_item_quantity() {
    let mut lifecycle = support::start_suite().await;
    let Some(mock) = lifecycle.mock() else {
        tracing::info!("Skipping mock-based test against a real server");
        return;
    };

    let cart_id = Uuid::new_v4().to_string();
    let body = json!({
        "id": cart_id,
        "userId": "user-123",
        "items": [
            {
                "productId": 1,
                "productName": "Smartphone",
                "quantity": 2,
                "unitPrice": 599.99,
                "totalPrice": 1199.98
            }
        ],
        "subtotal": 1199.98,
        "tax": 120.00,
        "total": 1319.98
    })
    .to_string();

    Mock::given(method("PUT"))
        .and(path_regex(r"^/api/cart/items/\d+$"))
        .and(bearer_auth())
        .and(matching_json_path("$.quantity"))
        .respond_with(json_response(200, &body))
        .mount(mock)
        .await;

    let spec = lifecycle.request_spec().unwrap().with_bearer(support::TOKEN);
    let response = spec
        .put_json("/api/cart/items/1", &json!({"quantity": 2}))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let cart: Cart = response.json().unwrap();
    let item = &cart.items[0];
    assert_eq!(item.quantity, 2);

    // The line total and cart subtotal were recalculated.
    assert!((item.total_price - item.unit_price * 2.0).abs() < 1e-9);
    assert!((cart.subtotal - item.total_price).abs() < 1e-9);

    lifecycle.finish().await.unwrap();
}

#[tokio::test]
async fn remove_item_from_cart() {
    let mut lifecycle = support::start_suite().await;
    let Some(mock) = lifecycle.mock() else {
        tracing::info!("Skipping mock-based test against a real server");
        return;
    };

    let cart_id = Uuid::new_v4().to_string();
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/api/cart/items/\d+$"))
        .and(bearer_auth())
        .respond_with(json_response(200, &empty_cart_body(&cart_id)))
        .mount(mock)
        .await;

    let spec = lifecycle.request_spec().unwrap().with_bearer(support::TOKEN);
    let response = spec.delete("/api/cart/items/1").await.unwrap();

    assert_eq!(response.status(), 200);

    let cart: Cart = response.json().unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.subtotal, 0.0);
    assert_eq!(cart.tax, 0.0);
    assert_eq!(cart.total, 0.0);

    lifecycle.finish().await.unwrap();
}

#[tokio::test]
async fn clear_cart() {
    let mut lifecycle = support::start_suite().await;
    let Some(mock) = lifecycle.mock() else {
        tracing::info!("Skipping mock-based test against a real server");
        return;
    };

    let cart_id = Uuid::new_v4().to_string();
    Mock::given(method("DELETE"))
        .and(path("/api/cart"))
        .and(bearer_auth())
        .respond_with(json_response(200, &empty_cart_body(&cart_id)))
        .mount(mock)
        .await;

    let spec = lifecycle.request_spec().unwrap().with_bearer(support::TOKEN);
    let response = spec.delete("/api/cart").await.unwrap();

    assert_eq!(response.status(), 200);
    let cart: Cart = response.json().unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.subtotal, 0.0);

    assert_eq!(
        received_with_header(
            lifecycle.mock().unwrap(),
            "DELETE",
            "/api/cart",
            "Authorization",
            &auth_header(),
        )
        .await,
        1
    );

    lifecycle.finish().await.unwrap();
}
