//! Branch discovery handler.
//!
//! ```text
//! GET /api/v1/branches/nearest?latitude=41.3&longitude=69.24&limit=5
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::ports::{NearestBranchesRequest, NearestBranchesResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, NearestBranchesSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_geo_point;

/// Query parameters for the nearest branch lookup.
#[derive(Debug, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NearestBranchesQuery {
    /// Origin latitude in decimal degrees.
    pub latitude: f64,
    /// Origin longitude in decimal degrees.
    pub longitude: f64,
    /// Search radius in meters. Defaults to the configured branch radius.
    pub radius_meters: Option<f64>,
    /// Maximum number of branches to return (1 to 50).
    pub limit: Option<usize>,
}

/// List branches within range of a point, closest first.
#[utoipa::path(
    get,
    path = "/api/v1/branches/nearest",
    params(NearestBranchesQuery),
    responses(
        (status = 200, description = "Branches in range", body = NearestBranchesSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No branch in range", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["branches"],
    operation_id = "nearestBranches",
    security([])
)]
#[get("/branches/nearest")]
pub async fn nearest_branches(
    state: web::Data<HttpState>,
    query: web::Query<NearestBranchesQuery>,
) -> ApiResult<web::Json<NearestBranchesResponse>> {
    let NearestBranchesQuery {
        latitude,
        longitude,
        radius_meters,
        limit,
    } = query.into_inner();
    let origin = parse_geo_point(latitude, longitude)?;
    let response = state
        .branches
        .nearest_branches(NearestBranchesRequest {
            origin,
            radius_meters,
            limit,
        })
        .await?;
    Ok(web::Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::{BranchDistancePayload, MockBranchLocator};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::fixture_ports;

    fn test_app(
        ports: HttpStatePorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::new(ports)))
            .service(web::scope("/api/v1").service(nearest_branches))
    }

    #[actix_web::test]
    async fn forwards_query_and_returns_ranked_branches() {
        let near = Uuid::from_u128(1);
        let far = Uuid::from_u128(2);
        let mut locator = MockBranchLocator::new();
        locator
            .expect_nearest_branches()
            .withf(|request| {
                request.origin.latitude() == 41.3
                    && request.radius_meters == Some(2_500.0)
                    && request.limit == Some(2)
            })
            .times(1)
            .returning(move |_| {
                Ok(NearestBranchesResponse {
                    branches: vec![
                        BranchDistancePayload {
                            branch_id: near,
                            distance_meters: 120.0,
                        },
                        BranchDistancePayload {
                            branch_id: far,
                            distance_meters: 1_980.5,
                        },
                    ],
                })
            });
        let mut ports = fixture_ports();
        ports.branches = Arc::new(locator);
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/branches/nearest?latitude=41.3&longitude=69.24&radiusMeters=2500&limit=2")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["branches"][0]["branchId"], json!(near.to_string()));
        assert_eq!(body["branches"][1]["distanceMeters"], json!(1_980.5));
    }

    #[actix_web::test]
    async fn rejects_out_of_range_latitude_before_lookup() {
        let mut locator = MockBranchLocator::new();
        locator.expect_nearest_branches().times(0);
        let mut ports = fixture_ports();
        ports.branches = Arc::new(locator);
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/branches/nearest?latitude=120&longitude=69.24")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "latitude");
    }

    #[actix_web::test]
    async fn empty_neighbourhood_is_not_found() {
        let mut locator = MockBranchLocator::new();
        locator
            .expect_nearest_branches()
            .returning(|_| Err(Error::not_found("no service point nearby")));
        let mut ports = fixture_ports();
        ports.branches = Arc::new(locator);
        let app = actix_test::init_service(test_app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/branches/nearest?latitude=0&longitude=0")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
