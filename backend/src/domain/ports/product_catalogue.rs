//! Port for product price lookups used when pricing order items.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;

define_port_error! {
    /// Errors raised by product catalogue adapters.
    pub enum ProductCatalogueError {
        /// Catalogue connection could not be established.
        Connection { message: String } =>
            "product catalogue connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "product catalogue query failed: {message}",
    }
}

/// Port resolving current unit prices for products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogue: Send + Sync {
    /// Return prices for the known ids among `product_ids`. Unknown ids are
    /// absent from the map.
    async fn find_prices(
        &self,
        product_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, f64>, ProductCatalogueError>;
}

/// Fixture catalogue that knows no products.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductCatalogue;

#[async_trait]
impl ProductCatalogue for FixtureProductCatalogue {
    async fn find_prices(
        &self,
        _product_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, f64>, ProductCatalogueError> {
        Ok(HashMap::new())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_knows_no_products() {
        let prices = FixtureProductCatalogue
            .find_prices(&[Uuid::new_v4()])
            .await
            .expect("fixture lookup succeeds");
        assert!(prices.is_empty());
    }
}
