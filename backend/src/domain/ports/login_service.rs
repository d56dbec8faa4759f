//! Driving port for login.
//!
//! Inbound adapters authenticate credentials through this port without
//! knowing how identities are stored. Password hashing and token formats are
//! left to implementations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Identity, LoginCredentials, Role, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the caller's identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}

/// Fixed development account with the admin role.
pub const FIXTURE_ADMIN_ID: Uuid = Uuid::from_u128(0x123e4567_e89b_12d3_a456_426614174000);
/// Fixed development account with the customer role.
pub const FIXTURE_CUSTOMER_ID: Uuid = Uuid::from_u128(0x9b2f1c4e_0a6d_4c3b_8e7f_5d1a2b3c4d5e);

/// In-memory authenticator with two development accounts:
/// `admin` / `password` and `customer` / `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        if credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        match credentials.username() {
            "admin" => Ok(Identity::new(UserId::from_uuid(FIXTURE_ADMIN_ID), Role::Admin)),
            "customer" => Ok(Identity::new(
                UserId::from_uuid(FIXTURE_CUSTOMER_ID),
                Role::Customer,
            )),
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

/// Authenticator used when no identity provider is configured. Every login
/// fails with `service_unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableLoginService;

#[async_trait]
impl LoginService for UnavailableLoginService {
    async fn authenticate(&self, _credentials: &LoginCredentials) -> Result<Identity, Error> {
        Err(Error::service_unavailable("login is not configured"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case("admin", "password", Some(Role::Admin))]
    #[case("customer", "password", Some(Role::Customer))]
    #[case("admin", "wrong", None)]
    #[case("stranger", "password", None)]
    #[tokio::test]
    async fn fixture_accounts_authenticate(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected_role: Option<Role>,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        let result = FixtureLoginService.authenticate(&creds).await;
        match (expected_role, result) {
            (Some(role), Ok(identity)) => assert_eq!(identity.role(), role),
            (None, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (expected, outcome) => panic!("expected {expected:?}, got {outcome:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_login_rejects_development_accounts() {
        let creds = LoginCredentials::try_from_parts("admin", "password").expect("credentials shape");
        let err = UnavailableLoginService
            .authenticate(&creds)
            .await
            .expect_err("no identity provider");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
