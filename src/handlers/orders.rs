use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    errors::ServiceError, handlers::common::PaginationParams,
    services::orders::OrderListingService, AppState,
};

/// Build the orders listing router.
pub fn orders_routes() -> Router<AppState> {
    Router::new().route("/orders", get(list_orders))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemSummary {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummary {
    pub id: i32,
    pub customer_id: i32,
    /// Naive ISO-8601 timestamp, e.g. `2024-03-15T10:30:00`
    pub order_date: String,
    pub items: Vec<OrderItemSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersPageResponse {
    pub orders: Vec<OrderSummary>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_items: u64,
}

/// List orders with their line items, one page at a time
#[utoipa::path(
    get,
    path = "/orders",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of orders", body = OrdersPageResponse),
        (status = 500, description = "Store unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Listings"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<OrdersPageResponse>, ServiceError> {
    let page = params.page();
    let per_page = params.per_page();

    let service = OrderListingService::new(state.db.clone());
    let result = service.list_orders(page, per_page).await?;

    let orders = result
        .orders
        .into_iter()
        .map(|(order, items)| OrderSummary {
            id: order.id,
            customer_id: order.customer_id,
            order_date: order.order_date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            items: items
                .into_iter()
                .map(|item| OrderItemSummary {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        })
        .collect();

    Ok(Json(OrdersPageResponse {
        orders,
        total_pages: result.total_pages,
        current_page: page,
        total_items: result.total_items,
    }))
}
