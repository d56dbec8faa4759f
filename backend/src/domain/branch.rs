//! Branches (service points) that fulfil orders.

use uuid::Uuid;

use super::geo::GeoPoint;
use super::proximity::{Candidate, CandidateId};

/// A persisted branch with its service location.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    id: Uuid,
    name: String,
    address: String,
    phone: String,
    location: GeoPoint,
}

/// Input for [`Branch::new`].
#[derive(Debug, Clone)]
pub struct BranchDraft {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub location: GeoPoint,
}

impl Branch {
    pub fn new(draft: BranchDraft) -> Self {
        let BranchDraft {
            id,
            name,
            address,
            phone,
            location,
        } = draft;
        Self {
            id,
            name,
            address,
            phone,
            location,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Every persisted branch is eligible to serve orders.
    pub fn to_candidate(&self) -> Candidate {
        Candidate::new(CandidateId::from_uuid(self.id), self.location, true)
    }
}
