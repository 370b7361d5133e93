use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Factory API",
        version = "1.0.0",
        description = r#"
Read-only API over the factory's order and production records.

## Listings

`/orders` and `/products` are paginated with `page` and `per_page` query
parameters. Requests past the last page return an empty list rather than
an error.

## Reports

Aggregated views over production and sales: per-employee output,
best-selling products, customer lifetime value, and per-day production
efficiency.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Listings", description = "Paginated order and product listings"),
        (name = "Reports", description = "Aggregated production and sales reports")
    ),
    paths(
        crate::handlers::orders::list_orders,
        crate::handlers::products::list_products,
        crate::handlers::reports::employee_performance,
        crate::handlers::reports::top_selling_products,
        crate::handlers::reports::customer_lifetime_value,
        crate::handlers::reports::production_efficiency,
    ),
    components(
        schemas(
            crate::handlers::orders::OrderSummary,
            crate::handlers::orders::OrderItemSummary,
            crate::handlers::orders::OrdersPageResponse,
            crate::handlers::products::ProductSummary,
            crate::handlers::products::ProductsPageResponse,
            crate::services::reports::EmployeePerformance,
            crate::services::reports::TopSellingProduct,
            crate::services::reports::CustomerLifetimeValue,
            crate::services::reports::ProductionEfficiency,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
