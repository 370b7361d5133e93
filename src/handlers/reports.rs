use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    errors::ServiceError,
    services::reports::{
        CustomerLifetimeValue, EmployeePerformance, ProductionEfficiency, ReportService,
        TopSellingProduct, DEFAULT_LIFETIME_VALUE_THRESHOLD,
    },
    AppState,
};

/// Build the report router.
pub fn reports_routes() -> Router<AppState> {
    Router::new()
        .route("/employee-performance", get(employee_performance))
        .route("/top-selling-products", get(top_selling_products))
        .route("/customer-lifetime-value", get(customer_lifetime_value))
        .route("/production-efficiency", get(production_efficiency))
}

/// Query parameters for the lifetime-value report.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ThresholdParams {
    /// Inclusive lower bound on a customer's total value (default: 1000)
    pub threshold: Option<String>,
}

impl ThresholdParams {
    /// Lenient like the pagination parameters: malformed values silently
    /// fall back to the default.
    pub fn threshold(&self) -> f64 {
        self.threshold
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_LIFETIME_VALUE_THRESHOLD)
    }
}

/// Query parameters for the production-efficiency report.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EfficiencyParams {
    /// ISO-8601 date (default: current UTC date)
    pub date: Option<String>,
}

impl EfficiencyParams {
    /// Unlike pagination, a malformed date is fatal for the request.
    pub fn date(&self) -> Result<NaiveDate, ServiceError> {
        match self.date.as_deref() {
            None => Ok(Utc::now().date_naive()),
            Some(raw) => parse_report_date(raw),
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full naive ISO-8601 datetime, whose date
/// component is taken.
fn parse_report_date(raw: &str) -> Result<NaiveDate, ServiceError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|_| ServiceError::InvalidInput(format!("invalid date parameter: {:?}", raw)))
}

/// Total quantity produced per employee
#[utoipa::path(
    get,
    path = "/employee-performance",
    responses(
        (status = 200, description = "Per-employee production totals", body = Vec<EmployeePerformance>),
        (status = 500, description = "Store unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn employee_performance(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeePerformance>>, ServiceError> {
    let report = ReportService::new(state.db.clone())
        .employee_performance()
        .await?;
    Ok(Json(report))
}

/// Total quantity ordered per product, best sellers first
#[utoipa::path(
    get,
    path = "/top-selling-products",
    responses(
        (status = 200, description = "Per-product order totals, descending", body = Vec<TopSellingProduct>),
        (status = 500, description = "Store unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn top_selling_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopSellingProduct>>, ServiceError> {
    let report = ReportService::new(state.db.clone())
        .top_selling_products()
        .await?;
    Ok(Json(report))
}

/// Customers whose total spend reaches the threshold
#[utoipa::path(
    get,
    path = "/customer-lifetime-value",
    params(ThresholdParams),
    responses(
        (status = 200, description = "Per-customer totals at or above the threshold", body = Vec<CustomerLifetimeValue>),
        (status = 500, description = "Store unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn customer_lifetime_value(
    State(state): State<AppState>,
    Query(params): Query<ThresholdParams>,
) -> Result<Json<Vec<CustomerLifetimeValue>>, ServiceError> {
    let report = ReportService::new(state.db.clone())
        .customer_lifetime_value(params.threshold())
        .await?;
    Ok(Json(report))
}

/// Per-product production totals for one calendar date
#[utoipa::path(
    get,
    path = "/production-efficiency",
    params(EfficiencyParams),
    responses(
        (status = 200, description = "Per-product production totals for the date", body = Vec<ProductionEfficiency>),
        (status = 400, description = "Malformed date parameter", body = crate::errors::ErrorResponse),
        (status = 500, description = "Store unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Reports"
)]
pub async fn production_efficiency(
    State(state): State<AppState>,
    Query(params): Query<EfficiencyParams>,
) -> Result<Json<Vec<ProductionEfficiency>>, ServiceError> {
    let date = params.date()?;
    let report = ReportService::new(state.db.clone())
        .production_efficiency(date)
        .await?;
    Ok(Json(report))
}
