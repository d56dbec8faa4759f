//! PostgreSQL-backed `CandidateSnapshotProvider`.
//!
//! Rows are rebuilt into [`Branch`] and [`Courier`] aggregates, which decide
//! their own eligibility. Each call loads a fresh snapshot; nothing is cached
//! between resolutions.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CandidateSnapshotError, CandidateSnapshotProvider};
use crate::domain::{
    Branch, BranchDraft, Candidate, CandidateCategory, Courier, CourierStatus, GeoPoint, UserId,
};

use super::diesel_basic_error_mapping::{malformed_row, map_diesel_error, map_pool_error};
use super::models::{BranchRow, CourierRow};
use super::pool::DbPool;
use super::schema::{branches, couriers};

/// Diesel-backed candidate snapshot provider for branches and couriers.
#[derive(Clone)]
pub struct DieselCandidateSnapshotProvider {
    pool: DbPool,
}

impl DieselCandidateSnapshotProvider {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn location(table: &str, latitude: f64, longitude: f64) -> Result<GeoPoint, CandidateSnapshotError> {
    GeoPoint::new(latitude, longitude).map_err(|err| malformed_row(table, err))
}

fn row_to_branch(row: BranchRow) -> Result<Branch, CandidateSnapshotError> {
    let BranchRow {
        id,
        name,
        address,
        phone,
        latitude,
        longitude,
    } = row;
    Ok(Branch::new(BranchDraft {
        id,
        name,
        address,
        phone,
        location: location("branches", latitude, longitude)?,
    }))
}

fn row_to_courier(row: CourierRow) -> Result<Courier, CandidateSnapshotError> {
    let status: CourierStatus = row
        .status
        .parse()
        .map_err(|err| malformed_row("couriers", err))?;
    Ok(Courier::new(
        row.id,
        UserId::from_uuid(row.user_id),
        status,
        location("couriers", row.latitude, row.longitude)?,
        row.last_updated,
    ))
}

#[async_trait]
impl CandidateSnapshotProvider for DieselCandidateSnapshotProvider {
    async fn list_candidates(
        &self,
        category: CandidateCategory,
    ) -> Result<Vec<Candidate>, CandidateSnapshotError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let candidates = match category {
            CandidateCategory::Branch => branches::table
                .select(BranchRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .map(|row| row_to_branch(row).map(|branch| branch.to_candidate()))
                .collect::<Result<Vec<_>, _>>()?,
            CandidateCategory::Courier => couriers::table
                .select(CourierRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .map(|row| row_to_courier(row).map(|courier| courier.to_candidate()))
                .collect::<Result<Vec<_>, _>>()?,
        };

        debug!(%category, count = candidates.len(), "loaded candidate snapshot");
        Ok(candidates)
    }
}
