mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;

use common::TestApp;

async fn seed_products(app: &TestApp, count: usize) {
    for i in 1..=count {
        app.seed_product(&format!("Widget {:02}", i), dec!(9.99)).await;
    }
}

#[tokio::test]
async fn products_page_metadata_is_correct() {
    let app = TestApp::new().await;
    seed_products(&app, 25).await;

    let (status, body) = app.get_json("/products?page=2&per_page=10").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["products"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_items"], 25);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["current_page"], 2);
    // Pages are in id order, so page 2 starts at the 11th product.
    assert_eq!(body["products"][0]["name"], "Widget 11");
}

#[tokio::test]
async fn last_partial_page_and_beyond() {
    let app = TestApp::new().await;
    seed_products(&app, 25).await;

    let (status, body) = app.get_json("/products?page=3&per_page=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 5);

    // Past the end is an empty page, not an error.
    let (status, body) = app.get_json("/products?page=9&per_page=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
    assert_eq!(body["current_page"], 9);
    assert_eq!(body["total_items"], 25);
}

#[tokio::test]
async fn missing_params_use_defaults() {
    let app = TestApp::new().await;
    seed_products(&app, 12).await;

    let (status, body) = app.get_json("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 10);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["total_pages"], 2);
}

#[tokio::test]
async fn malformed_params_fall_back_silently() {
    let app = TestApp::new().await;
    seed_products(&app, 12).await;

    let (status, body) = app.get_json("/products?page=abc&per_page=x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 10);
    assert_eq!(body["current_page"], 1);
}

#[tokio::test]
async fn zero_and_negative_params_clamp_to_one() {
    let app = TestApp::new().await;
    seed_products(&app, 5).await;

    let (status, body) = app.get_json("/products?page=0&per_page=-4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
    assert_eq!(body["total_pages"], 5);
}

#[tokio::test]
async fn empty_table_reports_zero_pages() {
    let app = TestApp::new().await;

    let (status, body) = app.get_json("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 0);
    assert_eq!(body["total_items"], 0);
    assert_eq!(body["total_pages"], 0);
}

#[tokio::test]
async fn product_price_is_a_number_on_the_wire() {
    let app = TestApp::new().await;
    app.seed_product("Gear", dec!(12.50)).await;

    let (status, body) = app.get_json("/products").await;
    assert_eq!(status, StatusCode::OK);
    let price = body["products"][0]["price"].as_f64().unwrap();
    assert!((price - 12.5).abs() < 1e-9);
}
