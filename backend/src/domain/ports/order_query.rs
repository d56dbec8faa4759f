//! Driving port for order reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Identity};

use super::order_command::OrderPayload;

/// Request to read one order as `requester`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOrderRequest {
    pub order_id: Uuid,
    pub requester: Identity,
}

/// Response for a single order lookup.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderResponse {
    pub order: OrderPayload,
}

/// Driving port for order read operations.
///
/// Customers may read only their own orders; admins may read any.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Fetch one order by id.
    async fn get_order(&self, request: GetOrderRequest) -> Result<GetOrderResponse, Error>;
}

/// Fixture query that finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderQuery;

#[async_trait]
impl OrderQuery for FixtureOrderQuery {
    async fn get_order(&self, request: GetOrderRequest) -> Result<GetOrderResponse, Error> {
        Err(Error::not_found(format!(
            "order {} not found",
            request.order_id
        )))
    }
}
