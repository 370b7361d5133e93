use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use tracing::debug;

use crate::entities::product::{self, Entity as ProductEntity};
use crate::errors::ServiceError;

/// One page of the product catalog plus the full-table totals.
#[derive(Debug)]
pub struct ProductPage {
    pub products: Vec<product::Model>,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Read-side service for the products listing
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Fetch one page of products in primary-key order.
    ///
    /// A page past the end of the table yields an empty slice, never an error.
    pub async fn list_products(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<ProductPage, ServiceError> {
        let db = &*self.db;
        debug!(page, per_page, "listing products");

        let paginator = ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .paginate(db, per_page);

        let totals = paginator.num_items_and_pages().await?;
        let products = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(ProductPage {
            products,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }
}
