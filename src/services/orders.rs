use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use tracing::debug;

use crate::entities::{
    order::{self, Entity as OrderEntity},
    order_item::{self, Entity as OrderItemEntity},
};
use crate::errors::ServiceError;

/// One page of orders, each paired with its line items, plus full-table totals.
#[derive(Debug)]
pub struct OrderPage {
    pub orders: Vec<(order::Model, Vec<order_item::Model>)>,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Read-side service for the orders listing
#[derive(Clone)]
pub struct OrderListingService {
    db: Arc<DatabaseConnection>,
}

impl OrderListingService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Fetch one page of orders in primary-key order, then batch-load the
    /// line items for the whole page with a single `IN` query.
    pub async fn list_orders(&self, page: u64, per_page: u64) -> Result<OrderPage, ServiceError> {
        let db = &*self.db;
        debug!(page, per_page, "listing orders");

        let paginator = OrderEntity::find()
            .order_by_asc(order::Column::Id)
            .paginate(db, per_page);

        let totals = paginator.num_items_and_pages().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;

        let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        let mut items_by_order: HashMap<i32, Vec<order_item::Model>> = HashMap::new();
        if !order_ids.is_empty() {
            let items = OrderItemEntity::find()
                .filter(order_item::Column::OrderId.is_in(order_ids))
                .order_by_asc(order_item::Column::Id)
                .all(db)
                .await?;
            for item in items {
                items_by_order.entry(item.order_id).or_default().push(item);
            }
        }

        let orders = orders
            .into_iter()
            .map(|o| {
                let items = items_by_order.remove(&o.id).unwrap_or_default();
                (o, items)
            })
            .collect();

        Ok(OrderPage {
            orders,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }
}
