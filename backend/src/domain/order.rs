//! Order aggregate: items, pricing, status lifecycle, and courier linkage.
//!
//! Orders are built from an [`OrderDraft`] once a branch has been resolved and
//! product prices are known. Totals are rounded to two decimal places.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::courier::status_labels;
use super::geo::GeoPoint;
use super::identity::UserId;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    Preparing,
    PickedUp,
    Delivered,
}

status_labels!(OrderStatus, "order", {
    Pending => "pending",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
    Preparing => "preparing",
    PickedUp => "picked_up",
    Delivered => "delivered",
});

impl OrderStatus {
    /// Cancelled and delivered orders accept no further changes.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Delivered)
    }
}

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    Pickup,
    Delivery,
}

status_labels!(DeliveryMethod, "delivery method", {
    Pickup => "pickup",
    Delivery => "delivery",
});

/// Postal details for the drop-off.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryAddress {
    pub address: String,
    pub floor: i32,
    pub door_number: u32,
    pub entrance: u32,
}

/// Errors raised while building or mutating an order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    #[error("order must contain at least one item")]
    NoItems,
    #[error("quantity for product {product_id} must be greater than zero")]
    ZeroQuantity { product_id: Uuid },
    #[error("product {product_id} was not found")]
    UnknownProduct { product_id: Uuid },
    #[error("product {product_id} has an invalid price")]
    InvalidPrice { product_id: Uuid },
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("order already has courier {courier_id}")]
    CourierAlreadyAssigned { courier_id: Uuid },
    #[error("order is {status} and cannot take a courier")]
    Closed { status: OrderStatus },
}

/// Requested line item before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItemDraft {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// Customer input for a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub delivery_method: DeliveryMethod,
    pub address: DeliveryAddress,
    pub location: GeoPoint,
    pub items: Vec<OrderItemDraft>,
}

impl OrderDraft {
    /// Check structural rules that need no store access.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.items.is_empty() {
            return Err(OrderValidationError::NoItems);
        }
        if let Some(item) = self.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderValidationError::ZeroQuantity {
                product_id: item.product_id,
            });
        }
        Ok(())
    }

    /// Distinct product ids referenced by the draft, in first-seen order.
    pub fn product_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if !ids.contains(&item.product_id) {
                ids.push(item.product_id);
            }
        }
        ids
    }
}

/// A priced line item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    id: Uuid,
    product_id: Uuid,
    quantity: u32,
    unit_price: f64,
    total_price: f64,
}

impl OrderItem {
    /// Price `quantity` units at `unit_price`.
    pub fn priced(
        id: Uuid,
        product_id: Uuid,
        quantity: u32,
        unit_price: f64,
    ) -> Result<Self, OrderValidationError> {
        if quantity == 0 {
            return Err(OrderValidationError::ZeroQuantity { product_id });
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(OrderValidationError::InvalidPrice { product_id });
        }
        Ok(Self {
            id,
            product_id,
            quantity,
            unit_price,
            total_price: round_money(unit_price * f64::from(quantity)),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }
}

/// Round a money amount to two decimal places.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Persisted state used to rehydrate an [`Order`].
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub branch_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub status: OrderStatus,
    pub delivery_method: DeliveryMethod,
    pub address: DeliveryAddress,
    pub location: GeoPoint,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order placed by a customer and served by one branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Uuid,
    user_id: UserId,
    branch_id: Uuid,
    courier_id: Option<Uuid>,
    status: OrderStatus,
    delivery_method: DeliveryMethod,
    address: DeliveryAddress,
    location: GeoPoint,
    items: Vec<OrderItem>,
    total_price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a pending order for `branch_id`, pricing items from `prices`.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use backend::domain::{
    ///     DeliveryAddress, DeliveryMethod, GeoPoint, Order, OrderDraft, OrderItemDraft,
    ///     OrderStatus, UserId,
    /// };
    /// use uuid::Uuid;
    ///
    /// let product = Uuid::new_v4();
    /// let draft = OrderDraft {
    ///     delivery_method: DeliveryMethod::Delivery,
    ///     address: DeliveryAddress::default(),
    ///     location: GeoPoint::new(41.0, 69.0).unwrap(),
    ///     items: vec![OrderItemDraft { product_id: product, quantity: 3 }],
    /// };
    /// let prices = HashMap::from([(product, 2.5)]);
    ///
    /// let order = Order::place(Uuid::new_v4(), UserId::random(), Uuid::new_v4(), draft, &prices, chrono::Utc::now())
    ///     .unwrap();
    /// assert_eq!(order.status(), OrderStatus::Pending);
    /// assert_eq!(order.total_price(), 7.5);
    /// ```
    pub fn place(
        id: Uuid,
        user_id: UserId,
        branch_id: Uuid,
        draft: OrderDraft,
        prices: &HashMap<Uuid, f64>,
        now: DateTime<Utc>,
    ) -> Result<Self, OrderValidationError> {
        draft.validate()?;
        let OrderDraft {
            delivery_method,
            address,
            location,
            items,
        } = draft;

        let items = items
            .into_iter()
            .map(|item| {
                let unit_price = prices.get(&item.product_id).copied().ok_or(
                    OrderValidationError::UnknownProduct {
                        product_id: item.product_id,
                    },
                )?;
                OrderItem::priced(Uuid::new_v4(), item.product_id, item.quantity, unit_price)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let total_price = round_money(items.iter().map(OrderItem::total_price).sum());

        Ok(Self {
            id,
            user_id,
            branch_id,
            courier_id: None,
            status: OrderStatus::Pending,
            delivery_method,
            address,
            location,
            items,
            total_price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate from storage without re-running placement rules.
    pub fn from_record(record: OrderRecord) -> Self {
        let OrderRecord {
            id,
            user_id,
            branch_id,
            courier_id,
            status,
            delivery_method,
            address,
            location,
            items,
            total_price,
            created_at,
            updated_at,
        } = record;
        Self {
            id,
            user_id,
            branch_id,
            courier_id,
            status,
            delivery_method,
            address,
            location,
            items,
            total_price,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn branch_id(&self) -> Uuid {
        self.branch_id
    }

    pub fn courier_id(&self) -> Option<Uuid> {
        self.courier_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn delivery_method(&self) -> DeliveryMethod {
        self.delivery_method
    }

    pub fn address(&self) -> &DeliveryAddress {
        &self.address
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Move to `next`, refusing changes out of terminal states and
    /// cancellation after pick-up.
    pub fn transition_to(
        &mut self,
        next: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<(), OrderValidationError> {
        let blocked = self.status.is_terminal()
            || (self.status == OrderStatus::PickedUp && next == OrderStatus::Cancelled);
        if blocked {
            return Err(OrderValidationError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Check that a courier may still be attached.
    pub fn ensure_courier_assignable(&self) -> Result<(), OrderValidationError> {
        if let Some(courier_id) = self.courier_id {
            return Err(OrderValidationError::CourierAlreadyAssigned { courier_id });
        }
        if self.status.is_terminal() {
            return Err(OrderValidationError::Closed {
                status: self.status,
            });
        }
        Ok(())
    }

    /// Attach `courier_id` after [`Order::ensure_courier_assignable`] succeeds.
    pub fn assign_courier(
        &mut self,
        courier_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), OrderValidationError> {
        self.ensure_courier_assignable()?;
        self.courier_id = Some(courier_id);
        self.updated_at = now;
        Ok(())
    }
}
