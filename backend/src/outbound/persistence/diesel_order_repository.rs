//! PostgreSQL-backed `OrderRepository`.
//!
//! An order and its items are written in one transaction; reads rehydrate
//! the aggregate through [`Order::from_record`]. Status changes are guarded
//! on the status the caller read, so a concurrent change reports
//! `StatusChanged` instead of being overwritten.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{
    DeliveryAddress, GeoPoint, Order, OrderItem, OrderRecord, OrderStatus, UserId,
};

use super::diesel_basic_error_mapping::{malformed_row, map_diesel_error, map_pool_error};
use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};
use super::pool::DbPool;
use super::schema::{order_items, orders};

/// Diesel-backed order repository.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_column(value: u32, field: &str) -> Result<i32, OrderRepositoryError> {
    i32::try_from(value)
        .map_err(|_| OrderRepositoryError::query(format!("{field} {value} exceeds column range")))
}

fn from_column(value: i32, field: &str) -> Result<u32, OrderRepositoryError> {
    u32::try_from(value).map_err(|_| malformed_row("orders", format!("negative {field} {value}")))
}

fn new_order_row(order: &Order) -> Result<NewOrderRow<'_>, OrderRepositoryError> {
    let address = order.address();
    Ok(NewOrderRow {
        id: order.id(),
        user_id: *order.user_id().as_uuid(),
        branch_id: order.branch_id(),
        courier_id: order.courier_id(),
        status: order.status().as_str(),
        delivery_method: order.delivery_method().as_str(),
        address: address.address.as_str(),
        floor: address.floor,
        door_number: to_column(address.door_number, "door number")?,
        entrance: to_column(address.entrance, "entrance")?,
        latitude: order.location().latitude(),
        longitude: order.location().longitude(),
        total_price: order.total_price(),
        created_at: order.created_at(),
        updated_at: order.updated_at(),
    })
}

fn new_item_rows(order: &Order) -> Result<Vec<NewOrderItemRow>, OrderRepositoryError> {
    order
        .items()
        .iter()
        .map(|item| {
            Ok(NewOrderItemRow {
                id: item.id(),
                order_id: order.id(),
                product_id: item.product_id(),
                quantity: to_column(item.quantity(), "quantity")?,
                unit_price: item.unit_price(),
                total_price: item.total_price(),
            })
        })
        .collect()
}

/// Largest gap tolerated between a stored line total and the recomputed one.
const LINE_TOTAL_TOLERANCE: f64 = 0.005;

fn row_to_item(row: OrderItemRow) -> Result<OrderItem, OrderRepositoryError> {
    let quantity = u32::try_from(row.quantity)
        .map_err(|_| malformed_row("order_items", format!("negative quantity {}", row.quantity)))?;
    let item = OrderItem::priced(row.id, row.product_id, quantity, row.unit_price)
        .map_err(|err| malformed_row("order_items", err))?;
    if (item.total_price() - row.total_price).abs() > LINE_TOTAL_TOLERANCE {
        return Err(malformed_row(
            "order_items",
            format!(
                "item {} stores total {} but {} x {} is {}",
                row.id,
                row.total_price,
                quantity,
                row.unit_price,
                item.total_price()
            ),
        ));
    }
    Ok(item)
}

fn status_update_outcome(updated: usize, order_id: Uuid) -> Result<(), OrderRepositoryError> {
    if updated == 0 {
        return Err(OrderRepositoryError::status_changed(order_id));
    }
    Ok(())
}

fn rows_to_order(row: OrderRow, items: Vec<OrderItemRow>) -> Result<Order, OrderRepositoryError> {
    let OrderRow {
        id,
        user_id,
        branch_id,
        courier_id,
        status,
        delivery_method,
        address,
        floor,
        door_number,
        entrance,
        latitude,
        longitude,
        total_price,
        created_at,
        updated_at,
    } = row;

    let items = items
        .into_iter()
        .map(row_to_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Order::from_record(OrderRecord {
        id,
        user_id: UserId::from_uuid(user_id),
        branch_id,
        courier_id,
        status: status.parse().map_err(|err| malformed_row("orders", err))?,
        delivery_method: delivery_method
            .parse()
            .map_err(|err| malformed_row("orders", err))?,
        address: DeliveryAddress {
            address,
            floor,
            door_number: from_column(door_number, "door number")?,
            entrance: from_column(entrance, "entrance")?,
        },
        location: GeoPoint::new(latitude, longitude).map_err(|err| malformed_row("orders", err))?,
        items,
        total_price,
        created_at,
        updated_at,
    }))
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        let order_row = new_order_row(order)?;
        let item_rows = new_item_rows(order)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(orders::table)
                    .values(&order_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(order_items::table)
                    .values(&item_rows)
                    .execute(conn)
                    .await?;
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, order_id: &Uuid) -> Result<Option<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let Some(row) = orders::table
            .filter(orders::id.eq(order_id))
            .select(OrderRow::as_select())
            .first::<OrderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let items: Vec<OrderItemRow> = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::id)
            .select(OrderItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_order(row, items).map(Some)
    }

    async fn update_status(
        &self,
        order: &Order,
        previous: OrderStatus,
    ) -> Result<(), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            orders::table
                .filter(orders::id.eq(order.id()))
                .filter(orders::status.eq(previous.as_str())),
        )
        .set((
            orders::status.eq(order.status().as_str()),
            orders::updated_at.eq(order.updated_at()),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        status_update_outcome(updated, order.id())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{DateTime, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{DeliveryMethod, OrderDraft, OrderItemDraft, OrderStatus};

    const PRODUCT: Uuid = Uuid::from_u128(0x51);

    #[fixture]
    fn order() -> Order {
        let placed_at = DateTime::parse_from_rfc3339("2026-04-05T06:07:08Z")
            .expect("RFC3339 fixture timestamp")
            .with_timezone(&Utc);
        Order::place(
            Uuid::from_u128(0x01),
            UserId::from_uuid(Uuid::from_u128(0x02)),
            Uuid::from_u128(0x03),
            OrderDraft {
                delivery_method: DeliveryMethod::Delivery,
                address: DeliveryAddress {
                    address: "7 Navoi Street".to_owned(),
                    floor: -1,
                    door_number: 12,
                    entrance: 3,
                },
                location: GeoPoint::new(41.31, 69.28).expect("valid location"),
                items: vec![OrderItemDraft {
                    product_id: PRODUCT,
                    quantity: 3,
                }],
            },
            &HashMap::from([(PRODUCT, 8.33)]),
            placed_at,
        )
        .expect("valid order")
    }

    fn stored(order: &Order) -> (OrderRow, Vec<OrderItemRow>) {
        let row = new_order_row(order).expect("order row");
        let stored_row = OrderRow {
            id: row.id,
            user_id: row.user_id,
            branch_id: row.branch_id,
            courier_id: row.courier_id,
            status: row.status.to_owned(),
            delivery_method: row.delivery_method.to_owned(),
            address: row.address.to_owned(),
            floor: row.floor,
            door_number: row.door_number,
            entrance: row.entrance,
            latitude: row.latitude,
            longitude: row.longitude,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        let items = new_item_rows(order)
            .expect("item rows")
            .into_iter()
            .map(|item| OrderItemRow {
                id: item.id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
                total_price: item.total_price,
            })
            .collect();
        (stored_row, items)
    }

    #[rstest]
    fn stored_rows_rehydrate_the_same_order(order: Order) {
        let (row, items) = stored(&order);
        let restored = rows_to_order(row, items).expect("rehydrate");
        assert_eq!(restored, order);
        assert_eq!(restored.total_price(), 24.99);
    }

    #[rstest]
    fn labels_are_stored_as_snake_case(order: Order) {
        let row = new_order_row(&order).expect("order row");
        assert_eq!(row.status, OrderStatus::Pending.as_str());
        assert_eq!(row.delivery_method, "delivery");
    }

    #[rstest]
    fn unknown_status_is_reported_as_malformed(order: Order) {
        let (mut row, items) = stored(&order);
        row.status = "lost".to_owned();
        let err = rows_to_order(row, items).expect_err("bad status");
        assert!(err.to_string().contains("malformed orders row"));
    }

    #[rstest]
    fn negative_quantity_is_reported_as_malformed(order: Order) {
        let (row, mut items) = stored(&order);
        if let Some(item) = items.first_mut() {
            item.quantity = -2;
        }
        let err = rows_to_order(row, items).expect_err("bad quantity");
        assert!(matches!(err, OrderRepositoryError::Query { .. }));
    }

    #[rstest]
    fn tampered_line_total_is_reported_as_malformed(order: Order) {
        let (row, mut items) = stored(&order);
        if let Some(item) = items.first_mut() {
            item.total_price = 1.0;
        }
        let err = rows_to_order(row, items).expect_err("bad line total");
        assert!(matches!(err, OrderRepositoryError::Query { .. }));
        assert!(err.to_string().contains("malformed order_items row"));
    }

    #[rstest]
    fn rounded_line_total_is_accepted(order: Order) {
        let (row, mut items) = stored(&order);
        if let Some(item) = items.first_mut() {
            item.total_price += 0.001;
        }
        assert!(rows_to_order(row, items).is_ok());
    }

    #[rstest]
    #[case(1, true)]
    #[case(0, false)]
    fn status_update_needs_a_matching_row(#[case] updated: usize, #[case] accepted: bool) {
        let order_id = Uuid::from_u128(0x01);
        let outcome = status_update_outcome(updated, order_id);
        assert_eq!(outcome.is_ok(), accepted);
        if let Err(err) = outcome {
            assert_eq!(err, OrderRepositoryError::status_changed(order_id));
        }
    }
}
