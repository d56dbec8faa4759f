//! Driving port ranking branches near a point.
//!
//! Lets clients check service availability before placing an order. Uses the
//! same resolver and radius defaults as order placement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, GeoPoint};

/// Largest number of branches a single lookup may return.
pub const MAX_NEAREST_BRANCHES: usize = 50;

/// Request for the branches nearest to `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestBranchesRequest {
    pub origin: GeoPoint,
    /// Overrides the configured branch radius when present.
    pub radius_meters: Option<f64>,
    /// Defaults to one branch.
    pub limit: Option<usize>,
}

/// A branch and its distance from the request origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDistancePayload {
    pub branch_id: Uuid,
    pub distance_meters: f64,
}

/// Branches ordered nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestBranchesResponse {
    pub branches: Vec<BranchDistancePayload>,
}

/// Driving port for nearest-branch lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BranchLocator: Send + Sync {
    /// Rank branches within range of the origin. Fails with `not_found` when
    /// none are in range and `invalid_request` for unusable radius or limit.
    async fn nearest_branches(
        &self,
        request: NearestBranchesRequest,
    ) -> Result<NearestBranchesResponse, Error>;
}

/// Fixture locator with no branches in range.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBranchLocator;

#[async_trait]
impl BranchLocator for FixtureBranchLocator {
    async fn nearest_branches(
        &self,
        _request: NearestBranchesRequest,
    ) -> Result<NearestBranchesResponse, Error> {
        Err(Error::not_found("no service point nearby"))
    }
}
