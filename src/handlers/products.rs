use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    errors::ServiceError, handlers::common::PaginationParams, services::catalog::CatalogService,
    AppState,
};

/// Build the products listing router.
pub fn products_routes() -> Router<AppState> {
    Router::new().route("/products", get(list_products))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsPageResponse {
    pub products: Vec<ProductSummary>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_items: u64,
}

/// List products, one page at a time
#[utoipa::path(
    get,
    path = "/products",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of products", body = ProductsPageResponse),
        (status = 500, description = "Store unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Listings"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ProductsPageResponse>, ServiceError> {
    let page = params.page();
    let per_page = params.per_page();

    let service = CatalogService::new(state.db.clone());
    let result = service.list_products(page, per_page).await?;

    let products = result
        .products
        .into_iter()
        .map(|product| ProductSummary {
            id: product.id,
            name: product.name,
            price: product.price.to_f64().unwrap_or_default(),
        })
        .collect();

    Ok(Json(ProductsPageResponse {
        products,
        total_pages: result.total_pages,
        current_page: page,
        total_items: result.total_items,
    }))
}
