//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Service points that prepare and hand out orders.
    branches (id) {
        id -> Uuid,
        name -> Varchar,
        address -> Varchar,
        phone -> Varchar,
        latitude -> Float8,
        longitude -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Couriers with their last reported position.
    ///
    /// `status` is one of `active`, `busy`, `inactive`.
    couriers (id) {
        id -> Uuid,
        user_id -> Uuid,
        status -> Varchar,
        latitude -> Float8,
        longitude -> Float8,
        last_updated -> Timestamptz,
    }
}

diesel::table! {
    /// Orderable catalogue items.
    products (id) {
        id -> Uuid,
        name -> Varchar,
        price -> Float8,
    }
}

diesel::table! {
    /// Placed orders.
    ///
    /// `courier_id` stays null until a courier is assigned; the assignment
    /// update is conditional on it still being null and the order being open.
    orders (id) {
        id -> Uuid,
        user_id -> Uuid,
        branch_id -> Uuid,
        courier_id -> Nullable<Uuid>,
        status -> Varchar,
        delivery_method -> Varchar,
        address -> Varchar,
        floor -> Int4,
        door_number -> Int4,
        entrance -> Int4,
        latitude -> Float8,
        longitude -> Float8,
        total_price -> Float8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Priced line items; prices are copied at placement time.
    order_items (id) {
        id -> Uuid,
        order_id -> Uuid,
        product_id -> Uuid,
        quantity -> Int4,
        unit_price -> Float8,
        total_price -> Float8,
    }
}

diesel::table! {
    /// Courier assignment history. `order_id` is unique.
    order_couriers (id) {
        id -> Uuid,
        order_id -> Uuid,
        courier_id -> Uuid,
        status -> Varchar,
        assigned_at -> Timestamptz,
    }
}

diesel::joinable!(orders -> branches (branch_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> products (product_id));
diesel::joinable!(order_couriers -> orders (order_id));
diesel::joinable!(order_couriers -> couriers (courier_id));

diesel::allow_tables_to_appear_in_same_query!(
    branches,
    couriers,
    order_couriers,
    order_items,
    orders,
    products,
);
