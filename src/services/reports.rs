use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::entities::{
    customer::{self, Entity as CustomerEntity},
    employee::{self, Entity as EmployeeEntity},
    order,
    order_item::{self, Entity as OrderItemEntity},
    product::{self, Entity as ProductEntity},
    production::{self, Entity as ProductionEntity},
};
use crate::errors::ServiceError;

/// Default lifetime-value cutoff when the caller does not supply one.
pub const DEFAULT_LIFETIME_VALUE_THRESHOLD: f64 = 1000.0;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeePerformance {
    pub employee_name: String,
    pub total_produced: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopSellingProduct {
    pub product_name: String,
    pub total_ordered: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerLifetimeValue {
    pub customer_name: String,
    pub total_value: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductionEfficiency {
    pub product_name: String,
    pub total_produced: i64,
}

/// Aggregate-report service over the manufacturing schema.
///
/// Every report groups by the entity's primary key and joins display names in
/// afterwards, so two entities sharing a name are reported as separate rows.
#[derive(Clone)]
pub struct ReportService {
    db: Arc<DatabaseConnection>,
}

impl ReportService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Total quantity produced per employee, across all production records.
    ///
    /// Employees with no production rows are absent from the result.
    pub async fn employee_performance(&self) -> Result<Vec<EmployeePerformance>, ServiceError> {
        let db = &*self.db;
        debug!("computing employee performance report");

        let totals: Vec<(i32, i64)> = ProductionEntity::find()
            .select_only()
            .column(production::Column::EmployeeId)
            .column_as(production::Column::Quantity.sum(), "total_produced")
            .group_by(production::Column::EmployeeId)
            .into_tuple()
            .all(db)
            .await?;

        let names = self
            .employee_names(totals.iter().map(|(id, _)| *id).collect())
            .await?;

        Ok(totals
            .into_iter()
            .filter_map(|(id, total)| {
                names.get(&id).map(|name| EmployeePerformance {
                    employee_name: name.clone(),
                    total_produced: total,
                })
            })
            .collect())
    }

    /// Total quantity ordered per product, sorted descending by that total.
    ///
    /// Products that never appear on an order item are excluded. Tie order
    /// between equal totals is unspecified.
    pub async fn top_selling_products(&self) -> Result<Vec<TopSellingProduct>, ServiceError> {
        let db = &*self.db;
        debug!("computing top-selling products report");

        let totals: Vec<(i32, i64)> = OrderItemEntity::find()
            .select_only()
            .column(order_item::Column::ProductId)
            .column_as(order_item::Column::Quantity.sum(), "total_ordered")
            .group_by(order_item::Column::ProductId)
            .order_by_desc(order_item::Column::Quantity.sum())
            .into_tuple()
            .all(db)
            .await?;

        let names = self
            .product_names(totals.iter().map(|(id, _)| *id).collect())
            .await?;

        Ok(totals
            .into_iter()
            .filter_map(|(id, total)| {
                names.get(&id).map(|name| TopSellingProduct {
                    product_name: name.clone(),
                    total_ordered: total,
                })
            })
            .collect())
    }

    /// Sum of `price * quantity` over every order item belonging to each
    /// customer, keeping only customers at or above `threshold` (inclusive).
    ///
    /// Customers with no orders are absent, not reported with zero.
    pub async fn customer_lifetime_value(
        &self,
        threshold: f64,
    ) -> Result<Vec<CustomerLifetimeValue>, ServiceError> {
        let db = &*self.db;
        debug!(threshold, "computing customer lifetime value report");

        let totals: Vec<(i32, Decimal)> = OrderItemEntity::find()
            .select_only()
            .column(order::Column::CustomerId)
            .column_as(Expr::expr(Func::sum(line_value())), "total_value")
            .join(JoinType::InnerJoin, order_item::Relation::Order.def())
            .join(JoinType::InnerJoin, order_item::Relation::Product.def())
            .join(JoinType::InnerJoin, order::Relation::Customer.def())
            .group_by(order::Column::CustomerId)
            .having(Expr::expr(Func::sum(line_value())).gte(threshold))
            .into_tuple()
            .all(db)
            .await?;

        let names = self
            .customer_names(totals.iter().map(|(id, _)| *id).collect())
            .await?;

        Ok(totals
            .into_iter()
            .filter_map(|(id, total)| {
                names.get(&id).map(|name| CustomerLifetimeValue {
                    customer_name: name.clone(),
                    total_value: total.to_f64().unwrap_or_default(),
                })
            })
            .collect())
    }

    /// Total quantity produced per product on the given calendar date.
    ///
    /// Rows are matched on the date component only; two runs of the same
    /// product at different times of day are summed into one row. Products
    /// with no production on that date are excluded.
    pub async fn production_efficiency(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ProductionEfficiency>, ServiceError> {
        let db = &*self.db;
        debug!(%date, "computing production efficiency report");

        let day_start = date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid");
        let day_end = day_start + Duration::days(1);

        let totals: Vec<(i32, i64)> = ProductionEntity::find()
            .select_only()
            .column(production::Column::ProductId)
            .column_as(production::Column::Quantity.sum(), "total_produced")
            .filter(production::Column::ProductionDate.gte(day_start))
            .filter(production::Column::ProductionDate.lt(day_end))
            .group_by(production::Column::ProductId)
            .into_tuple()
            .all(db)
            .await?;

        let names = self
            .product_names(totals.iter().map(|(id, _)| *id).collect())
            .await?;

        Ok(totals
            .into_iter()
            .filter_map(|(id, total)| {
                names.get(&id).map(|name| ProductionEfficiency {
                    product_name: name.clone(),
                    total_produced: total,
                })
            })
            .collect())
    }

    async fn employee_names(&self, ids: Vec<i32>) -> Result<HashMap<i32, String>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = EmployeeEntity::find()
            .filter(employee::Column::Id.is_in(ids))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(|e| (e.id, e.name)).collect())
    }

    async fn product_names(&self, ids: Vec<i32>) -> Result<HashMap<i32, String>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = ProductEntity::find()
            .filter(product::Column::Id.is_in(ids))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(|p| (p.id, p.name)).collect())
    }

    async fn customer_names(&self, ids: Vec<i32>) -> Result<HashMap<i32, String>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = CustomerEntity::find()
            .filter(customer::Column::Id.is_in(ids))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }
}

/// `price * quantity` for one order item row.
fn line_value() -> SimpleExpr {
    Expr::col((ProductEntity, product::Column::Price))
        .mul(Expr::col((OrderItemEntity, order_item::Column::Quantity)))
}
