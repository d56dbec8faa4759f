//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`CandidateSnapshotProvider`, `OrderRepository`,
//! `ProductCatalogue`, `CourierAssignmentRepository`) are implemented by
//! outbound adapters. Driving ports (`OrderCommand`, `OrderQuery`,
//! `BranchLocator`, `LoginService`) are called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod branch_locator;
mod candidate_snapshot_provider;
mod courier_assignment_repository;
mod login_service;
mod order_command;
mod order_query;
mod order_repository;
mod product_catalogue;

#[cfg(test)]
pub use branch_locator::MockBranchLocator;
pub use branch_locator::{
    BranchDistancePayload, BranchLocator, FixtureBranchLocator, MAX_NEAREST_BRANCHES,
    NearestBranchesRequest, NearestBranchesResponse,
};
#[cfg(test)]
pub use candidate_snapshot_provider::MockCandidateSnapshotProvider;
pub use candidate_snapshot_provider::{
    CandidateSnapshotError, CandidateSnapshotProvider, FixtureCandidateSnapshotProvider,
};
#[cfg(test)]
pub use courier_assignment_repository::MockCourierAssignmentRepository;
pub use courier_assignment_repository::{
    CourierAssignmentRepository, CourierAssignmentRepositoryError,
    FixtureCourierAssignmentRepository,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FIXTURE_ADMIN_ID, FIXTURE_CUSTOMER_ID, FixtureLoginService, LoginService,
    UnavailableLoginService,
};
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_command::{
    AssignCourierRequest, AssignCourierResponse, DeliveryAddressPayload, FixtureOrderCommand,
    OrderCommand, OrderItemPayload, OrderPayload, PlaceOrderRequest, PlaceOrderResponse,
    UpdateOrderStatusRequest, UpdateOrderStatusResponse,
};
#[cfg(test)]
pub use order_query::MockOrderQuery;
pub use order_query::{FixtureOrderQuery, GetOrderRequest, GetOrderResponse, OrderQuery};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{FixtureOrderRepository, OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use product_catalogue::MockProductCatalogue;
pub use product_catalogue::{FixtureProductCatalogue, ProductCatalogue, ProductCatalogueError};
