//! Session helpers that keep HTTP handlers free of framework details.
//!
//! The signed session cookie stores the caller's user id and role. Handlers
//! ask for an [`Identity`] and never touch raw session keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Identity, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper exposing identity-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &Identity) -> Result<(), Error> {
        self.0.renew();
        self.insert(USER_ID_KEY, identity.user_id().to_string())?;
        self.insert(ROLE_KEY, identity.role().as_str().to_owned())
    }

    fn insert(&self, key: &str, value: String) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Current identity, if the cookie carries a well-formed one.
    pub fn identity(&self) -> Result<Option<Identity>, Error> {
        let (Some(raw_id), Some(raw_role)) = (self.read(USER_ID_KEY)?, self.read(ROLE_KEY)?)
        else {
            return Ok(None);
        };
        let user_id = match raw_id.parse::<UserId>() {
            Ok(id) => id,
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                return Ok(None);
            }
        };
        let role = match raw_role.parse::<Role>() {
            Ok(role) => role,
            Err(error) => {
                warn!(%error, "invalid role in session cookie");
                return Ok(None);
            }
        };
        Ok(Some(Identity::new(user_id, role)))
    }

    /// Require an authenticated caller or fail with `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated admin; other callers get `403 Forbidden`.
    pub fn require_admin(&self) -> Result<Identity, Error> {
        let identity = self.require_identity()?;
        if identity.is_admin() {
            Ok(identity)
        } else {
            Err(Error::forbidden("admin role required"))
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
