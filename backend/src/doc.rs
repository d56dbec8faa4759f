//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the schema
//! wrappers from [`crate::inbound::http::schemas`], and the session cookie
//! security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::orders::{
    DeliveryAddressBody, OrderItemBody, PlaceOrderRequestBody, UpdateOrderStatusRequestBody,
};
use crate::inbound::http::schemas::{
    AssignCourierResponseSchema, BranchDistanceSchema, DeliveryAddressSchema,
    DeliveryMethodSchema, ErrorCodeSchema, ErrorSchema, GeoPointSchema, NearestBranchesSchema,
    OrderItemSchema, OrderSchema, OrderStatusSchema,
};
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Delivery backend API",
        description = "Order placement against the nearest branch, courier assignment, and branch discovery."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::assign_courier,
        crate::inbound::http::orders::update_order_status,
        crate::inbound::http::branches::nearest_branches,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        GeoPointSchema,
        OrderStatusSchema,
        DeliveryMethodSchema,
        DeliveryAddressSchema,
        OrderItemSchema,
        OrderSchema,
        AssignCourierResponseSchema,
        BranchDistanceSchema,
        NearestBranchesSchema,
        LoginRequest,
        LoginResponse,
        PlaceOrderRequestBody,
        DeliveryAddressBody,
        OrderItemBody,
        UpdateOrderStatusRequestBody,
    )),
    tags(
        (name = "users", description = "Session login"),
        (name = "orders", description = "Order placement, courier assignment, and status updates"),
        (name = "branches", description = "Branch discovery by proximity"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
