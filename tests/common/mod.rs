#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDateTime;
use factory_api::{
    config::AppConfig,
    db::{self, DbConfig},
    entities::{customer, employee, order, order_item, product, production},
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

/// Helper harness for spinning up an application state backed by an in-memory
/// SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        // A pool of one connection, otherwise each pooled connection would
        // see its own private in-memory database.
        let db_cfg = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };

        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState {
            db: Arc::new(pool),
            config: test_config(),
        };

        let router = factory_api::app_routes().with_state(state.clone());

        Self { router, state }
    }

    /// Send a GET request against the router and return the raw response.
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Send a GET request and decode the JSON body.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.get(uri).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let json = serde_json::from_slice(&bytes).expect("response body was not valid json");
        (status, json)
    }

    pub async fn seed_employee(&self, name: &str) -> employee::Model {
        employee::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("seed employee")
    }

    pub async fn seed_product(&self, name: &str, price: Decimal) -> product::Model {
        product::ActiveModel {
            name: Set(name.to_string()),
            price: Set(price),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("seed product")
    }

    pub async fn seed_customer(&self, name: &str) -> customer::Model {
        customer::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("seed customer")
    }

    pub async fn seed_order(&self, customer_id: i32, order_date: NaiveDateTime) -> order::Model {
        order::ActiveModel {
            customer_id: Set(customer_id),
            order_date: Set(order_date),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("seed order")
    }

    pub async fn seed_order_item(
        &self,
        order_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> order_item::Model {
        order_item::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("seed order item")
    }

    pub async fn seed_production(
        &self,
        employee_id: i32,
        product_id: i32,
        quantity: i32,
        production_date: NaiveDateTime,
    ) -> production::Model {
        production::ActiveModel {
            employee_id: Set(employee_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            production_date: Set(production_date),
            ..Default::default()
        }
        .insert(self.state.db.as_ref())
        .await
        .expect("seed production record")
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 18_080,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        log_json: false,
        auto_migrate: true,
        db_max_connections: 1,
        db_min_connections: 1,
        db_connect_timeout_secs: 30,
        db_acquire_timeout_secs: 8,
        db_idle_timeout_secs: 600,
    }
}

/// Parse `YYYY-MM-DDTHH:MM:SS` test timestamps.
pub fn dt(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").expect("bad test timestamp")
}
