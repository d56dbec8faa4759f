//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use backend::domain::ProximityPolicy;
use backend::outbound::persistence::DbPool;

/// Everything `create_server` needs beyond the health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) policy: ProximityPolicy,
    pub(crate) courier_assignment_enabled: bool,
    pub(crate) fixture_login: bool,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            policy: ProximityPolicy::default(),
            courier_assignment_enabled: true,
            fixture_login: false,
        }
    }

    /// Use Diesel adapters instead of fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_proximity_policy(mut self, policy: ProximityPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_courier_assignment(mut self, enabled: bool) -> Self {
        self.courier_assignment_enabled = enabled;
        self
    }

    /// Accept the built-in development accounts. Login is unavailable
    /// otherwise.
    #[must_use]
    pub fn with_fixture_login(mut self, enabled: bool) -> Self {
        self.fixture_login = enabled;
        self
    }
}
