mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;

use common::{dt, TestApp};

#[tokio::test]
async fn orders_embed_their_line_items() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Acme Corp").await;
    let bolt = app.seed_product("Bolt", dec!(0.25)).await;
    let nut = app.seed_product("Nut", dec!(0.10)).await;

    let order = app
        .seed_order(customer.id, dt("2024-03-15T10:30:00"))
        .await;
    app.seed_order_item(order.id, bolt.id, 100).await;
    app.seed_order_item(order.id, nut.id, 200).await;

    let (status, body) = app.get_json("/orders").await;
    assert_eq!(status, StatusCode::OK);

    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], order.id);
    assert_eq!(orders[0]["customer_id"], customer.id);
    assert_eq!(orders[0]["order_date"], "2024-03-15T10:30:00");

    let items = orders[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_id"], bolt.id);
    assert_eq!(items[0]["quantity"], 100);
    assert_eq!(items[1]["product_id"], nut.id);
    assert_eq!(items[1]["quantity"], 200);
}

#[tokio::test]
async fn order_without_items_has_empty_list() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Acme Corp").await;
    app.seed_order(customer.id, dt("2024-03-15T10:30:00")).await;

    let (status, body) = app.get_json("/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders"][0]["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn orders_paginate_like_products() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Acme Corp").await;
    let bolt = app.seed_product("Bolt", dec!(0.25)).await;
    for day in 1..=7 {
        let order = app
            .seed_order(customer.id, dt(&format!("2024-03-{:02}T09:00:00", day)))
            .await;
        app.seed_order_item(order.id, bolt.id, day).await;
    }

    let (status, body) = app.get_json("/orders?page=2&per_page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders"].as_array().unwrap().len(), 3);
    assert_eq!(body["total_items"], 7);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["current_page"], 2);

    // Id order carries across pages.
    assert_eq!(body["orders"][0]["order_date"], "2024-03-04T09:00:00");

    // Items stay attached to the right order on later pages.
    assert_eq!(body["orders"][0]["items"][0]["quantity"], 4);
}

#[tokio::test]
async fn items_only_attach_to_their_own_order() {
    let app = TestApp::new().await;

    let customer = app.seed_customer("Acme Corp").await;
    let bolt = app.seed_product("Bolt", dec!(0.25)).await;

    let first = app.seed_order(customer.id, dt("2024-03-01T08:00:00")).await;
    let second = app.seed_order(customer.id, dt("2024-03-02T08:00:00")).await;
    app.seed_order_item(first.id, bolt.id, 5).await;
    app.seed_order_item(second.id, bolt.id, 9).await;

    let (_, body) = app.get_json("/orders").await;
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders[0]["items"].as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["items"][0]["quantity"], 5);
    assert_eq!(orders[1]["items"].as_array().unwrap().len(), 1);
    assert_eq!(orders[1]["items"][0]["quantity"], 9);
}
