//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    FixtureBranchLocator, FixtureLoginService, FixtureOrderCommand, FixtureOrderQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation, names the cookie `session`, and disables
/// the `Secure` flag so plain-HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Ports wired to fixtures; override individual fields per test.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        orders: Arc::new(FixtureOrderCommand),
        orders_query: Arc::new(FixtureOrderQuery),
        branches: Arc::new(FixtureBranchLocator),
    }
}

/// State wired entirely to fixtures.
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports())
}
