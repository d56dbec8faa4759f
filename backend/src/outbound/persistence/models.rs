//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; adapters convert them to
//! domain values and report malformed rows as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{branches, couriers, order_couriers, order_items, orders, products};

/// Branch columns that rebuild a [`crate::domain::Branch`].
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = branches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BranchRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Courier columns that rebuild a [`crate::domain::Courier`].
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = couriers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourierRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub latitude: f64,
    pub longitude: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductPriceRow {
    pub id: Uuid,
    pub price: f64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub branch_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub status: String,
    pub delivery_method: String,
    pub address: String,
    pub floor: i32,
    pub door_number: i32,
    pub entrance: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub branch_id: Uuid,
    pub courier_id: Option<Uuid>,
    pub status: &'a str,
    pub delivery_method: &'a str,
    pub address: &'a str,
    pub floor: i32,
    pub door_number: i32,
    pub entrance: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderItemRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_items)]
pub(crate) struct NewOrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_couriers)]
pub(crate) struct NewOrderCourierRow<'a> {
    pub id: Uuid,
    pub order_id: Uuid,
    pub courier_id: Uuid,
    pub status: &'a str,
    pub assigned_at: DateTime<Utc>,
}
