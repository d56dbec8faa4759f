//! Port for order persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Order, OrderStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order repository adapters.
    pub enum OrderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "order repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "order repository query failed: {message}",
        /// The stored status no longer matches the one the update was based on.
        StatusChanged { order_id: Uuid } =>
            "order {order_id} changed status concurrently",
    }
}

/// Port for writing and reading orders with their items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and all of its items atomically.
    async fn create(&self, order: &Order) -> Result<(), OrderRepositoryError>;

    /// Find an order, items included, by id.
    async fn find_by_id(&self, order_id: &Uuid) -> Result<Option<Order>, OrderRepositoryError>;

    /// Store `order`'s status and update time, provided the stored status is
    /// still `previous`. Fails with `StatusChanged` otherwise.
    async fn update_status(
        &self,
        order: &Order,
        previous: OrderStatus,
    ) -> Result<(), OrderRepositoryError>;
}

/// Fixture repository that accepts writes and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderRepository;

#[async_trait]
impl OrderRepository for FixtureOrderRepository {
    async fn create(&self, _order: &Order) -> Result<(), OrderRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _order_id: &Uuid) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _order: &Order,
        _previous: OrderStatus,
    ) -> Result<(), OrderRepositoryError> {
        Ok(())
    }
}
