//! Port for reading geo-tagged candidate snapshots.
//!
//! Every proximity resolution reads a fresh snapshot; adapters must not cache
//! between calls. A failed read is reported as an error and never as an empty
//! snapshot, so callers can tell "nothing nearby" apart from "store down".

use async_trait::async_trait;

use crate::domain::{Candidate, CandidateCategory};

use super::define_port_error;

define_port_error! {
    /// Errors raised by candidate snapshot adapters.
    pub enum CandidateSnapshotError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "candidate store connection failed: {message}",
        /// Query failed during execution or returned malformed rows.
        Query { message: String } =>
            "candidate store query failed: {message}",
    }
}

/// Port supplying the current candidates of one category.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateSnapshotProvider: Send + Sync {
    /// List every candidate of `category` with its eligibility resolved.
    async fn list_candidates(
        &self,
        category: CandidateCategory,
    ) -> Result<Vec<Candidate>, CandidateSnapshotError>;
}

/// Fixture provider with no branches and no couriers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCandidateSnapshotProvider;

#[async_trait]
impl CandidateSnapshotProvider for FixtureCandidateSnapshotProvider {
    async fn list_candidates(
        &self,
        _category: CandidateCategory,
    ) -> Result<Vec<Candidate>, CandidateSnapshotError> {
        Ok(Vec::new())
    }
}
