//! Driving port for order mutations: placement, courier assignment, and
//! status updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    DeliveryAddress, DeliveryMethod, Error, GeoPoint, Order, OrderDraft, OrderItem, OrderStatus,
    UserId,
};

/// Serializable delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddressPayload {
    pub address: String,
    pub floor: i32,
    pub door_number: u32,
    pub entrance: u32,
}

impl From<&DeliveryAddress> for DeliveryAddressPayload {
    fn from(value: &DeliveryAddress) -> Self {
        Self {
            address: value.address.clone(),
            floor: value.floor,
            door_number: value.door_number,
            entrance: value.entrance,
        }
    }
}

impl From<DeliveryAddressPayload> for DeliveryAddress {
    fn from(value: DeliveryAddressPayload) -> Self {
        Self {
            address: value.address,
            floor: value.floor,
            door_number: value.door_number,
            entrance: value.entrance,
        }
    }
}

/// Serializable priced line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

impl From<&OrderItem> for OrderItemPayload {
    fn from(value: &OrderItem) -> Self {
        Self {
            id: value.id(),
            product_id: value.product_id(),
            quantity: value.quantity(),
            unit_price: value.unit_price(),
            total_price: value.total_price(),
        }
    }
}

/// Serializable order for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub id: Uuid,
    pub user_id: UserId,
    pub branch_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub status: OrderStatus,
    pub delivery_method: DeliveryMethod,
    pub address: DeliveryAddressPayload,
    pub location: GeoPoint,
    pub items: Vec<OrderItemPayload>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderPayload {
    fn from(value: &Order) -> Self {
        Self {
            id: value.id(),
            user_id: value.user_id(),
            branch_id: value.branch_id(),
            courier_id: value.courier_id(),
            status: value.status(),
            delivery_method: value.delivery_method(),
            address: value.address().into(),
            location: value.location(),
            items: value.items().iter().map(Into::into).collect(),
            total_price: value.total_price(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Request to place an order on behalf of `user_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrderRequest {
    pub user_id: UserId,
    pub draft: OrderDraft,
}

/// Response carrying the placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order: OrderPayload,
}

/// Request to attach the nearest active courier to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCourierRequest {
    pub order_id: Uuid,
}

/// Outcome of a courier assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCourierResponse {
    pub order_id: Uuid,
    pub courier_id: Uuid,
    pub distance_meters: f64,
}

/// Request to move an order to `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_id: Uuid,
    pub status: OrderStatus,
}

/// Response carrying the order after its status changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusResponse {
    pub order: OrderPayload,
}

/// Driving port for order write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Resolve the nearest branch for the draft's location and persist a
    /// pending order served by it.
    ///
    /// Fails with `invalid_request` for malformed drafts, `not_found` when no
    /// branch is within range or a product is unknown, and
    /// `service_unavailable` when a store cannot be reached. Nothing is
    /// written on failure.
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<PlaceOrderResponse, Error>;

    /// Assign the nearest active courier to an existing order.
    ///
    /// Fails with `not_found` when the order is missing or no courier is in
    /// range, and `conflict` when the order already has a courier or is
    /// closed. The assignment is recorded only after a courier is found.
    async fn assign_courier(
        &self,
        request: AssignCourierRequest,
    ) -> Result<AssignCourierResponse, Error>;

    /// Move an order to a new status.
    ///
    /// Fails with `not_found` when the order is missing and `conflict` when
    /// the order is closed, already picked up and being cancelled, or changed
    /// status since it was read.
    async fn update_status(
        &self,
        request: UpdateOrderStatusRequest,
    ) -> Result<UpdateOrderStatusResponse, Error>;
}

/// Fixture command for tests that do not exercise ordering. Behaves as if no
/// branch or courier were ever in range.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOrderCommand;

#[async_trait]
impl OrderCommand for FixtureOrderCommand {
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<PlaceOrderResponse, Error> {
        request
            .draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Err(Error::not_found("no service point nearby"))
    }

    async fn assign_courier(
        &self,
        request: AssignCourierRequest,
    ) -> Result<AssignCourierResponse, Error> {
        Err(Error::not_found(format!(
            "order {} not found",
            request.order_id
        )))
    }

    async fn update_status(
        &self,
        request: UpdateOrderStatusRequest,
    ) -> Result<UpdateOrderStatusResponse, Error> {
        Err(Error::not_found(format!(
            "order {} not found",
            request.order_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::{ErrorCode, OrderItemDraft};

    fn draft(quantity: u32) -> OrderDraft {
        OrderDraft {
            delivery_method: DeliveryMethod::Pickup,
            address: DeliveryAddress::default(),
            location: GeoPoint::new(41.0, 69.0).expect("valid location"),
            items: vec![OrderItemDraft {
                product_id: Uuid::nil(),
                quantity,
            }],
        }
    }

    #[rstest]
    #[case(0, ErrorCode::InvalidRequest)]
    #[case(1, ErrorCode::NotFound)]
    #[tokio::test]
    async fn fixture_validates_then_reports_no_branch(
        #[case] quantity: u32,
        #[case] expected: ErrorCode,
    ) {
        let err = FixtureOrderCommand
            .place_order(PlaceOrderRequest {
                user_id: UserId::random(),
                draft: draft(quantity),
            })
            .await
            .expect_err("fixture never places orders");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    fn order_payload_serialises_camel_case() {
        let product = Uuid::nil();
        let order = Order::place(
            Uuid::nil(),
            UserId::from_uuid(Uuid::nil()),
            Uuid::nil(),
            draft(2),
            &HashMap::from([(product, 4.25)]),
            DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
                .expect("RFC3339 fixture timestamp")
                .with_timezone(&Utc),
        )
        .expect("valid order");

        let value = serde_json::to_value(OrderPayload::from(&order)).expect("serialise order");

        assert_eq!(value["status"], json!("pending"));
        assert_eq!(value["deliveryMethod"], json!("pickup"));
        assert_eq!(value["courierId"], json!(null));
        assert_eq!(value["totalPrice"], json!(8.5));
        assert_eq!(value["items"][0]["unitPrice"], json!(4.25));
        assert_eq!(value["address"]["doorNumber"], json!(0));
        assert_eq!(value["location"]["latitude"], json!(41.0));
    }
}
