//! Builders wiring driving ports to Diesel adapters or fixtures.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use backend::domain::ports::{
    BranchLocator, CandidateSnapshotProvider, CourierAssignmentRepository,
    FixtureCandidateSnapshotProvider, FixtureCourierAssignmentRepository, FixtureLoginService,
    FixtureOrderRepository, FixtureProductCatalogue, LoginService, OrderCommand, OrderQuery,
    OrderRepository, ProductCatalogue, UnavailableLoginService,
};
use backend::domain::{BranchLocatorService, OrderPlacementService, ProximityPolicy};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{
    DieselCandidateSnapshotProvider, DieselCourierAssignmentRepository, DieselOrderRepository,
    DieselProductCatalogue,
};

use super::ServerConfig;

/// Driving ports backed by one set of driven adapters.
struct OrderingPorts {
    orders: Arc<dyn OrderCommand>,
    orders_query: Arc<dyn OrderQuery>,
    branches: Arc<dyn BranchLocator>,
}

fn ordering_ports<S, O, P, A>(
    candidates: S,
    orders: O,
    catalogue: P,
    assignments: A,
    policy: ProximityPolicy,
    courier_assignment_enabled: bool,
) -> OrderingPorts
where
    S: CandidateSnapshotProvider + 'static,
    O: OrderRepository + 'static,
    P: ProductCatalogue + 'static,
    A: CourierAssignmentRepository + 'static,
{
    let candidates = Arc::new(candidates);
    let placement = Arc::new(
        OrderPlacementService::new(
            candidates.clone(),
            Arc::new(orders),
            Arc::new(catalogue),
            Arc::new(assignments),
        )
        .with_policy(policy)
        .with_courier_assignment(courier_assignment_enabled),
    );
    let branches = BranchLocatorService::new(candidates).with_policy(policy);

    OrderingPorts {
        orders: placement.clone(),
        orders_query: placement,
        branches: Arc::new(branches),
    }
}

fn build_ordering_ports(config: &ServerConfig) -> OrderingPorts {
    let policy = config.policy;
    let enabled = config.courier_assignment_enabled;
    match &config.db_pool {
        Some(pool) => {
            info!("wiring PostgreSQL adapters");
            ordering_ports(
                DieselCandidateSnapshotProvider::new(pool.clone()),
                DieselOrderRepository::new(pool.clone()),
                DieselProductCatalogue::new(pool.clone()),
                DieselCourierAssignmentRepository::new(pool.clone()),
                policy,
                enabled,
            )
        }
        None => {
            info!("no database configured; wiring fixture adapters");
            ordering_ports(
                FixtureCandidateSnapshotProvider,
                FixtureOrderRepository,
                FixtureProductCatalogue,
                FixtureCourierAssignmentRepository,
                policy,
                enabled,
            )
        }
    }
}

fn build_login_service(config: &ServerConfig) -> Arc<dyn LoginService> {
    if config.fixture_login {
        warn!("fixture login enabled; development accounts accept the password 'password'");
        Arc::new(FixtureLoginService)
    } else {
        info!("fixture login disabled; login requests are unavailable");
        Arc::new(UnavailableLoginService)
    }
}

/// Build the shared HTTP state.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let OrderingPorts {
        orders,
        orders_query,
        branches,
    } = build_ordering_ports(config);

    web::Data::new(HttpState::new(HttpStatePorts {
        login: build_login_service(config),
        orders,
        orders_query,
        branches,
    }))
}
