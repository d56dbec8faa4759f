//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers below mirror their serialised shape and register under the domain
//! type's path so generated documents name the real payloads.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with the current state of the resource.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "no service point nearby")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::GeoPoint`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GeoPoint)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GeoPointSchema {
    #[schema(minimum = -90.0, maximum = 90.0, example = 41.2995)]
    latitude: f64,
    #[schema(minimum = -180.0, maximum = 180.0, example = 69.2401)]
    longitude: f64,
}

/// OpenAPI schema for [`crate::domain::OrderStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::OrderStatus, rename_all = "snake_case")]
pub enum OrderStatusSchema {
    Pending,
    Confirmed,
    Cancelled,
    Preparing,
    PickedUp,
    Delivered,
}

/// OpenAPI schema for [`crate::domain::DeliveryMethod`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DeliveryMethod, rename_all = "snake_case")]
pub enum DeliveryMethodSchema {
    Pickup,
    Delivery,
}

/// OpenAPI schema for [`crate::domain::ports::DeliveryAddressPayload`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::DeliveryAddressPayload, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DeliveryAddressSchema {
    address: String,
    floor: i32,
    door_number: u32,
    entrance: u32,
}

/// OpenAPI schema for [`crate::domain::ports::OrderItemPayload`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::OrderItemPayload, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrderItemSchema {
    #[schema(format = "uuid")]
    id: String,
    #[schema(format = "uuid")]
    product_id: String,
    quantity: u32,
    /// Catalogue price at placement time.
    unit_price: f64,
    /// `unit_price * quantity`, rounded to two decimals.
    total_price: f64,
}

/// OpenAPI schema for [`crate::domain::ports::OrderPayload`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::OrderPayload, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct OrderSchema {
    #[schema(format = "uuid")]
    id: String,
    #[schema(format = "uuid")]
    user_id: String,
    /// Nearest branch at placement time.
    #[schema(format = "uuid")]
    branch_id: String,
    #[schema(format = "uuid")]
    courier_id: Option<String>,
    status: OrderStatusSchema,
    delivery_method: DeliveryMethodSchema,
    address: DeliveryAddressSchema,
    location: GeoPointSchema,
    items: Vec<OrderItemSchema>,
    total_price: f64,
    #[schema(format = "date-time")]
    created_at: String,
    #[schema(format = "date-time")]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::ports::AssignCourierResponse`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::AssignCourierResponse, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AssignCourierResponseSchema {
    #[schema(format = "uuid")]
    order_id: String,
    #[schema(format = "uuid")]
    courier_id: String,
    distance_meters: f64,
}

/// OpenAPI schema for [`crate::domain::ports::BranchDistancePayload`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::BranchDistancePayload, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BranchDistanceSchema {
    #[schema(format = "uuid")]
    branch_id: String,
    distance_meters: f64,
}

/// OpenAPI schema for [`crate::domain::ports::NearestBranchesResponse`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::NearestBranchesResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NearestBranchesSchema {
    /// Closest first; ties broken by branch id.
    branches: Vec<BranchDistanceSchema>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("forbidden")]
    #[case("not_found")]
    #[case("conflict")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_every_code(#[case] code: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(code), "missing {code}");
    }

    #[test]
    fn order_status_schema_uses_snake_case_labels() {
        let schema_json = schema_to_json::<OrderStatusSchema>();
        assert!(schema_json.contains("picked_up"));
        assert_eq!(OrderStatusSchema::name(), "crate.domain.OrderStatus");
    }

    #[test]
    fn order_schema_exposes_camel_case_fields() {
        let schema_json = schema_to_json::<OrderSchema>();
        for field in ["branchId", "courierId", "deliveryMethod", "totalPrice", "createdAt"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
