//! Order HTTP handlers.
//!
//! ```text
//! POST  /api/v1/orders
//! GET   /api/v1/orders/{id}
//! POST  /api/v1/orders/{id}/courier
//! PATCH /api/v1/orders/{id}/status
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    AssignCourierRequest, AssignCourierResponse, DeliveryAddressPayload, GetOrderRequest,
    OrderPayload, PlaceOrderRequest, UpdateOrderStatusRequest,
};
use crate::domain::{
    DeliveryAddress, DeliveryMethod, Error, OrderDraft, OrderItemDraft, OrderStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AssignCourierResponseSchema, ErrorSchema, OrderSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_geo_point, parse_label, parse_uuid};

const DELIVERY_METHODS: &str = "pickup, delivery";
const ORDER_STATUSES: &str = "pending, confirmed, cancelled, preparing, picked_up, delivered";

/// Request payload for placing an order.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequestBody {
    #[schema(example = "delivery")]
    pub delivery_method: String,
    #[serde(default)]
    pub address: Option<DeliveryAddressBody>,
    #[schema(example = 41.2995)]
    pub latitude: f64,
    #[schema(example = 69.2401)]
    pub longitude: f64,
    pub items: Vec<OrderItemBody>,
}

/// Delivery address payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddressBody {
    pub address: String,
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub door_number: u32,
    #[serde(default)]
    pub entrance: u32,
}

/// Requested line item.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemBody {
    #[schema(format = "uuid")]
    pub product_id: String,
    #[schema(minimum = 1)]
    pub quantity: u32,
}

/// Request payload for moving an order to a new status.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequestBody {
    #[schema(example = "preparing")]
    pub status: String,
}

impl From<DeliveryAddressBody> for DeliveryAddressPayload {
    fn from(value: DeliveryAddressBody) -> Self {
        Self {
            address: value.address,
            floor: value.floor,
            door_number: value.door_number,
            entrance: value.entrance,
        }
    }
}

impl TryFrom<PlaceOrderRequestBody> for OrderDraft {
    type Error = Error;

    fn try_from(value: PlaceOrderRequestBody) -> Result<Self, Self::Error> {
        let delivery_method: DeliveryMethod = parse_label(
            &value.delivery_method,
            FieldName::new("deliveryMethod"),
            DELIVERY_METHODS,
        )?;
        let location = parse_geo_point(value.latitude, value.longitude)?;
        let items = value
            .items
            .into_iter()
            .map(|item| {
                Ok(OrderItemDraft {
                    product_id: parse_uuid(&item.product_id, FieldName::new("productId"))?,
                    quantity: item.quantity,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let address: DeliveryAddress = value
            .address
            .map(|body| DeliveryAddressPayload::from(body).into())
            .unwrap_or_default();

        Ok(Self {
            delivery_method,
            address,
            location,
            items,
        })
    }
}

/// Place an order served by the nearest branch.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = PlaceOrderRequestBody,
    responses(
        (status = 201, description = "Order placed", body = OrderSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No branch in range or unknown product", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "placeOrder",
    security(("SessionCookie" = []))
)]
#[post("/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PlaceOrderRequestBody>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let draft = OrderDraft::try_from(payload.into_inner())?;
    let response = state
        .orders
        .place_order(PlaceOrderRequest {
            user_id: identity.user_id(),
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(response.order))
}

/// Fetch one order. Customers may read only their own orders.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = String, Path, description = "Order identifier", format = "uuid")),
    responses(
        (status = 200, description = "Order", body = OrderSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "getOrder",
    security(("SessionCookie" = []))
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderPayload>> {
    let requester = session.require_identity()?;
    let order_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let response = state
        .orders_query
        .get_order(GetOrderRequest {
            order_id,
            requester,
        })
        .await?;
    Ok(web::Json(response.order))
}

/// Assign the nearest active courier to an order. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/courier",
    params(("id" = String, Path, description = "Order identifier", format = "uuid")),
    responses(
        (status = 200, description = "Courier assigned", body = AssignCourierResponseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Order missing or no courier in range", body = ErrorSchema),
        (status = 409, description = "Order already has a courier or is closed", body = ErrorSchema),
        (status = 503, description = "Courier assignment disabled or store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "assignCourier",
    security(("SessionCookie" = []))
)]
#[post("/orders/{id}/courier")]
pub async fn assign_courier(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AssignCourierResponse>> {
    session.require_admin()?;
    let order_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let response = state
        .orders
        .assign_courier(AssignCourierRequest { order_id })
        .await?;
    Ok(web::Json(response))
}

/// Move an order to a new status. Admin only.
#[utoipa::path(
    patch,
    path = "/api/v1/orders/{id}/status",
    params(("id" = String, Path, description = "Order identifier", format = "uuid")),
    request_body = UpdateOrderStatusRequestBody,
    responses(
        (status = 200, description = "Order with its new status", body = OrderSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed or status changed concurrently", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["orders"],
    operation_id = "updateOrderStatus",
    security(("SessionCookie" = []))
)]
#[patch("/orders/{id}/status")]
pub async fn update_order_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateOrderStatusRequestBody>,
) -> ApiResult<web::Json<OrderPayload>> {
    session.require_admin()?;
    let order_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let status: OrderStatus = parse_label(
        &payload.into_inner().status,
        FieldName::new("status"),
        ORDER_STATUSES,
    )?;
    let response = state
        .orders
        .update_status(UpdateOrderStatusRequest { order_id, status })
        .await?;
    Ok(web::Json(response.order))
}

#[cfg(test)]
#[path = "orders_tests.rs"]
mod tests;
