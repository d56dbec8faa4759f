//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so they
//! stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BranchLocator, LoginService, OrderCommand, OrderQuery};

/// Parameter object bundling the port implementations for [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrderQuery>,
    pub branches: Arc<dyn BranchLocator>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrderQuery>,
    pub branches: Arc<dyn BranchLocator>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureBranchLocator, FixtureLoginService, FixtureOrderCommand, FixtureOrderQuery,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     orders: Arc::new(FixtureOrderCommand),
    ///     orders_query: Arc::new(FixtureOrderQuery),
    ///     branches: Arc::new(FixtureBranchLocator),
    /// });
    /// let _orders = state.orders.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            orders,
            orders_query,
            branches,
        } = ports;
        Self {
            login,
            orders,
            orders_query,
            branches,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
