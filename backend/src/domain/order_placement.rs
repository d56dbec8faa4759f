//! Order placement, courier assignment, and branch lookup services.
//!
//! Each service reads a fresh candidate snapshot, runs the pure proximity
//! resolver, and only then touches the write side. Any failure aborts the
//! flow before a write happens.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{
    AssignCourierRequest, AssignCourierResponse, BranchDistancePayload, BranchLocator,
    CandidateSnapshotError, CandidateSnapshotProvider, CourierAssignmentRepository,
    CourierAssignmentRepositoryError, GetOrderRequest, GetOrderResponse, MAX_NEAREST_BRANCHES,
    NearestBranchesRequest, NearestBranchesResponse, OrderCommand, OrderPayload, OrderQuery,
    OrderRepository, OrderRepositoryError, PlaceOrderRequest, PlaceOrderResponse,
    ProductCatalogue, ProductCatalogueError, UpdateOrderStatusRequest, UpdateOrderStatusResponse,
};
use crate::domain::{
    CandidateCategory, CandidateId, CourierAssignment, Error, Order, OrderValidationError,
    ProximityError, ProximityPolicy, ProximityQuery, ProximityResult, resolve,
};

/// Message returned when no branch serves the requested location.
pub const NO_SERVICE_POINT_NEARBY: &str = "no service point nearby";
/// Message returned when no active courier is in range of an order.
pub const NO_COURIER_NEARBY: &str = "no courier nearby";

fn map_snapshot_error(error: CandidateSnapshotError) -> Error {
    match error {
        CandidateSnapshotError::Connection { message } => {
            Error::service_unavailable(format!("candidate store unavailable: {message}"))
        }
        CandidateSnapshotError::Query { message } => {
            Error::internal(format!("candidate store error: {message}"))
        }
    }
}

fn map_order_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
        OrderRepositoryError::StatusChanged { order_id } => {
            Error::conflict(format!("order {order_id} changed status concurrently"))
        }
    }
}

fn map_catalogue_error(error: ProductCatalogueError) -> Error {
    match error {
        ProductCatalogueError::Connection { message } => {
            Error::service_unavailable(format!("product catalogue unavailable: {message}"))
        }
        ProductCatalogueError::Query { message } => {
            Error::internal(format!("product catalogue error: {message}"))
        }
    }
}

fn map_assignment_error(error: CourierAssignmentRepositoryError) -> Error {
    match error {
        CourierAssignmentRepositoryError::Connection { message } => Error::service_unavailable(
            format!("courier assignment repository unavailable: {message}"),
        ),
        CourierAssignmentRepositoryError::Query { message } => {
            Error::internal(format!("courier assignment repository error: {message}"))
        }
        CourierAssignmentRepositoryError::NotAssignable { order_id } => {
            Error::conflict(format!("order {order_id} already has a courier or is closed"))
        }
    }
}

fn map_order_validation_error(error: OrderValidationError) -> Error {
    match error {
        OrderValidationError::NoItems | OrderValidationError::ZeroQuantity { .. } => {
            Error::invalid_request(error.to_string())
        }
        OrderValidationError::UnknownProduct { .. } => Error::not_found(error.to_string()),
        OrderValidationError::InvalidPrice { .. } => Error::internal(error.to_string()),
        OrderValidationError::InvalidTransition { .. }
        | OrderValidationError::CourierAlreadyAssigned { .. }
        | OrderValidationError::Closed { .. } => Error::conflict(error.to_string()),
    }
}

fn map_proximity_error(error: ProximityError, not_found_message: &str) -> Error {
    match error {
        ProximityError::InvalidArgument { reason } => Error::invalid_request(reason),
        ProximityError::NotFound { .. } => Error::not_found(not_found_message),
    }
}

fn candidate_uuid(id: &CandidateId) -> Result<Uuid, Error> {
    id.to_uuid()
        .map_err(|err| Error::internal(format!("candidate id {id} is not a UUID: {err}")))
}

/// Read a fresh snapshot of `category` and resolve `query` against it.
async fn resolve_from_snapshot<S>(
    provider: &S,
    category: CandidateCategory,
    query: &ProximityQuery,
    not_found_message: &str,
) -> Result<ProximityResult, Error>
where
    S: CandidateSnapshotProvider + ?Sized,
{
    let candidates = provider
        .list_candidates(category)
        .await
        .map_err(map_snapshot_error)?;

    match resolve(&candidates, query) {
        Ok(result) => {
            info!(
                category = %category,
                candidates = candidates.len(),
                matches = result.len(),
                radius_meters = query.radius_meters(),
                "proximity resolved"
            );
            Ok(result)
        }
        Err(error) => {
            debug!(
                category = %category,
                candidates = candidates.len(),
                radius_meters = query.radius_meters(),
                %error,
                "proximity resolution found no match"
            );
            Err(map_proximity_error(error, not_found_message))
        }
    }
}

/// Order service implementing the order command and query driving ports.
#[derive(Clone)]
pub struct OrderPlacementService<S, O, P, A> {
    candidates: Arc<S>,
    orders: Arc<O>,
    catalogue: Arc<P>,
    assignments: Arc<A>,
    policy: ProximityPolicy,
    courier_assignment_enabled: bool,
}

impl<S, O, P, A> OrderPlacementService<S, O, P, A> {
    /// Create a service with default radii and courier assignment enabled.
    pub fn new(candidates: Arc<S>, orders: Arc<O>, catalogue: Arc<P>, assignments: Arc<A>) -> Self {
        Self {
            candidates,
            orders,
            catalogue,
            assignments,
            policy: ProximityPolicy::default(),
            courier_assignment_enabled: true,
        }
    }

    /// Override the per-category search radii.
    #[must_use]
    pub fn with_policy(mut self, policy: ProximityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Toggle courier assignment. When disabled, assignment requests fail with
    /// `service_unavailable`.
    #[must_use]
    pub fn with_courier_assignment(mut self, enabled: bool) -> Self {
        self.courier_assignment_enabled = enabled;
        self
    }
}

impl<S, O, P, A> OrderPlacementService<S, O, P, A>
where
    O: OrderRepository,
{
    async fn load_order(&self, order_id: Uuid) -> Result<Order, Error> {
        self.orders
            .find_by_id(&order_id)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found(format!("order {order_id} not found")))
    }
}

#[async_trait]
impl<S, O, P, A> OrderCommand for OrderPlacementService<S, O, P, A>
where
    S: CandidateSnapshotProvider,
    O: OrderRepository,
    P: ProductCatalogue,
    A: CourierAssignmentRepository,
{
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<PlaceOrderResponse, Error> {
        let PlaceOrderRequest { user_id, draft } = request;
        draft.validate().map_err(map_order_validation_error)?;

        let query = self
            .policy
            .nearest_query(CandidateCategory::Branch, draft.location)
            .map_err(|err| map_proximity_error(err, NO_SERVICE_POINT_NEARBY))?;
        let result = resolve_from_snapshot(
            self.candidates.as_ref(),
            CandidateCategory::Branch,
            &query,
            NO_SERVICE_POINT_NEARBY,
        )
        .await?;
        let branch = result
            .nearest()
            .ok_or_else(|| Error::not_found(NO_SERVICE_POINT_NEARBY))?;
        let branch_id = candidate_uuid(branch.id())?;

        let prices = self
            .catalogue
            .find_prices(&draft.product_ids())
            .await
            .map_err(map_catalogue_error)?;

        let order = Order::place(Uuid::new_v4(), user_id, branch_id, draft, &prices, Utc::now())
            .map_err(map_order_validation_error)?;
        self.orders
            .create(&order)
            .await
            .map_err(map_order_repository_error)?;

        info!(
            order_id = %order.id(),
            branch_id = %branch_id,
            distance_meters = branch.distance_meters(),
            "order placed"
        );
        Ok(PlaceOrderResponse {
            order: OrderPayload::from(&order),
        })
    }

    async fn assign_courier(
        &self,
        request: AssignCourierRequest,
    ) -> Result<AssignCourierResponse, Error> {
        if !self.courier_assignment_enabled {
            return Err(Error::service_unavailable(
                "courier assignment is disabled",
            ));
        }

        let mut order = self.load_order(request.order_id).await?;
        order
            .ensure_courier_assignable()
            .map_err(map_order_validation_error)?;

        let query = self
            .policy
            .nearest_query(CandidateCategory::Courier, order.location())
            .map_err(|err| map_proximity_error(err, NO_COURIER_NEARBY))?;
        let result = resolve_from_snapshot(
            self.candidates.as_ref(),
            CandidateCategory::Courier,
            &query,
            NO_COURIER_NEARBY,
        )
        .await?;
        let courier = result
            .nearest()
            .ok_or_else(|| Error::not_found(NO_COURIER_NEARBY))?;
        let courier_id = candidate_uuid(courier.id())?;

        let now = Utc::now();
        order
            .assign_courier(courier_id, now)
            .map_err(map_order_validation_error)?;
        let assignment = CourierAssignment::pending(order.id(), courier_id, now);
        self.assignments
            .record(&assignment)
            .await
            .map_err(map_assignment_error)?;

        info!(
            order_id = %order.id(),
            courier_id = %courier_id,
            distance_meters = courier.distance_meters(),
            "courier assigned"
        );
        Ok(AssignCourierResponse {
            order_id: order.id(),
            courier_id,
            distance_meters: courier.distance_meters(),
        })
    }

    async fn update_status(
        &self,
        request: UpdateOrderStatusRequest,
    ) -> Result<UpdateOrderStatusResponse, Error> {
        let mut order = self.load_order(request.order_id).await?;
        let previous = order.status();
        order
            .transition_to(request.status, Utc::now())
            .map_err(map_order_validation_error)?;
        self.orders
            .update_status(&order, previous)
            .await
            .map_err(map_order_repository_error)?;

        info!(
            order_id = %order.id(),
            from = %previous,
            to = %order.status(),
            "order status updated"
        );
        Ok(UpdateOrderStatusResponse {
            order: OrderPayload::from(&order),
        })
    }
}

#[async_trait]
impl<S, O, P, A> OrderQuery for OrderPlacementService<S, O, P, A>
where
    S: CandidateSnapshotProvider,
    O: OrderRepository,
    P: ProductCatalogue,
    A: CourierAssignmentRepository,
{
    async fn get_order(&self, request: GetOrderRequest) -> Result<GetOrderResponse, Error> {
        let order = self.load_order(request.order_id).await?;

        if !request.requester.can_access(order.user_id()) {
            return Err(Error::forbidden("order belongs to another user"));
        }

        Ok(GetOrderResponse {
            order: OrderPayload::from(&order),
        })
    }
}

/// Branch lookup service implementing the [`BranchLocator`] driving port.
#[derive(Clone)]
pub struct BranchLocatorService<S> {
    candidates: Arc<S>,
    policy: ProximityPolicy,
}

impl<S> BranchLocatorService<S> {
    /// Create a locator using the default branch radius.
    pub fn new(candidates: Arc<S>) -> Self {
        Self {
            candidates,
            policy: ProximityPolicy::default(),
        }
    }

    /// Override the default radius used when a request omits one.
    #[must_use]
    pub fn with_policy(mut self, policy: ProximityPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl<S> BranchLocator for BranchLocatorService<S>
where
    S: CandidateSnapshotProvider,
{
    async fn nearest_branches(
        &self,
        request: NearestBranchesRequest,
    ) -> Result<NearestBranchesResponse, Error> {
        let limit = request.limit.unwrap_or(1);
        if limit > MAX_NEAREST_BRANCHES {
            return Err(Error::invalid_request(format!(
                "limit must not exceed {MAX_NEAREST_BRANCHES}"
            )));
        }
        let radius = request
            .radius_meters
            .unwrap_or_else(|| self.policy.radius_for(CandidateCategory::Branch));
        let query = ProximityQuery::new(request.origin, radius, limit)
            .map_err(|err| map_proximity_error(err, NO_SERVICE_POINT_NEARBY))?;

        let result = resolve_from_snapshot(
            self.candidates.as_ref(),
            CandidateCategory::Branch,
            &query,
            NO_SERVICE_POINT_NEARBY,
        )
        .await?;

        let branches = result
            .iter()
            .map(|found| {
                Ok(BranchDistancePayload {
                    branch_id: candidate_uuid(found.id())?,
                    distance_meters: found.distance_meters(),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(NearestBranchesResponse { branches })
    }
}

#[cfg(test)]
#[path = "order_placement_tests.rs"]
mod tests;
