//! Domain types, services, and ports.
//!
//! Purpose: model orders, branches, and couriers, and resolve the nearest
//! branch or courier for a location. Everything here is transport agnostic;
//! inbound and outbound adapters talk to the domain through [`ports`].
//!
//! Public surface:
//! - [`GeoPoint`] and [`distance_meters`]: validated coordinates and haversine
//!   distance.
//! - [`resolve`] with [`Candidate`], [`ProximityQuery`], and
//!   [`ProximityResult`]: the pure nearest-candidate resolver.
//! - [`Order`], [`Branch`], [`Courier`]: aggregates and their candidates.
//! - [`OrderPlacementService`] and [`BranchLocatorService`]: driving port
//!   implementations.
//! - [`Error`] and [`ErrorCode`]: the error payload shared by all adapters.

pub mod branch;
pub mod courier;
pub mod error;
pub mod geo;
pub mod identity;
pub mod order;
pub mod order_placement;
pub mod ports;
pub mod proximity;
pub mod trace_id;

pub use self::branch::{Branch, BranchDraft};
pub use self::courier::{
    AssignmentStatus, Courier, CourierAssignment, CourierStatus, ParseStatusError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::geo::{EARTH_RADIUS_METERS, GeoPoint, GeoValidationError, distance_meters};
pub use self::identity::{
    Identity, LoginCredentials, LoginValidationError, ParseRoleError, Role, UserId,
};
pub use self::order::{
    DeliveryAddress, DeliveryMethod, Order, OrderDraft, OrderItem, OrderItemDraft, OrderRecord,
    OrderStatus, OrderValidationError, round_money,
};
pub use self::order_placement::{
    BranchLocatorService, NO_COURIER_NEARBY, NO_SERVICE_POINT_NEARBY, OrderPlacementService,
};
pub use self::proximity::{
    Candidate, CandidateCategory, CandidateId, DEFAULT_BRANCH_RADIUS_METERS,
    DEFAULT_COURIER_RADIUS_METERS, NO_CANDIDATE_WITHIN_RADIUS, ProximityError, ProximityMatch,
    ProximityPolicy, ProximityQuery, ProximityResult, resolve,
};
pub use self::trace_id::TraceId;

