//! PostgreSQL-backed `ProductCatalogue`.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProductCatalogue, ProductCatalogueError};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ProductPriceRow;
use super::pool::DbPool;
use super::schema::products;

/// Diesel-backed product price lookup.
#[derive(Clone)]
pub struct DieselProductCatalogue {
    pool: DbPool,
}

impl DieselProductCatalogue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalogue for DieselProductCatalogue {
    async fn find_prices(
        &self,
        product_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, f64>, ProductCatalogueError> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductPriceRow> = products::table
            .filter(products::id.eq_any(product_ids))
            .select(ProductPriceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(|row| (row.id, row.price)).collect())
    }
}
