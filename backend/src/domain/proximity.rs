//! Proximity resolution over geo-tagged candidates.
//!
//! Given a snapshot of candidates (branches or couriers) and a query origin,
//! [`resolve`] returns the nearest eligible candidates within a radius ordered
//! by distance, ties broken by candidate id. The resolver is a pure function:
//! it performs no I/O, holds no state, and never mutates its inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geo::{GeoPoint, distance_meters};

/// Reason reported when no candidate survives filtering.
pub const NO_CANDIDATE_WITHIN_RADIUS: &str = "no eligible candidate within radius";

/// Default search radius for branches, in meters.
pub const DEFAULT_BRANCH_RADIUS_METERS: f64 = 10_000.0;

/// Default search radius for couriers, in meters.
pub const DEFAULT_COURIER_RADIUS_METERS: f64 = 5_000.0;

/// Kind of entity a candidate represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateCategory {
    Branch,
    Courier,
}

impl CandidateCategory {
    /// Stable lowercase label used in logs and payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Courier => "courier",
        }
    }
}

impl fmt::Display for CandidateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by proximity resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProximityError {
    /// The query parameters are unusable (non-positive radius, zero limit, blank id).
    #[error("invalid proximity argument: {reason}")]
    InvalidArgument { reason: String },
    /// No eligible candidate lies within the radius.
    #[error("{reason}")]
    NotFound { reason: String },
}

impl ProximityError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound {
            reason: NO_CANDIDATE_WITHIN_RADIUS.to_owned(),
        }
    }
}

/// Opaque candidate identifier, unique within a category.
///
/// Ordering is the byte order of the underlying string and is used to break
/// distance ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CandidateId(String);

impl CandidateId {
    /// Construct an identifier, rejecting blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, ProximityError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ProximityError::invalid_argument(
                "candidate id must not be empty",
            ));
        }
        Ok(Self(id))
    }

    /// Identifier for an entity keyed by UUID.
    pub fn from_uuid(id: uuid::Uuid) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Parse the identifier back into the UUID of the underlying entity.
    pub fn to_uuid(&self) -> Result<uuid::Uuid, uuid::Error> {
        uuid::Uuid::parse_str(&self.0)
    }
}

impl AsRef<str> for CandidateId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CandidateId {
    type Error = ProximityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CandidateId> for String {
    fn from(value: CandidateId) -> Self {
        value.0
    }
}

/// A geo-tagged entity that may be matched against a query.
///
/// Eligibility is decided by the category-specific source before the snapshot
/// reaches the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    id: CandidateId,
    location: GeoPoint,
    eligible: bool,
}

impl Candidate {
    pub fn new(id: CandidateId, location: GeoPoint, eligible: bool) -> Self {
        Self {
            id,
            location,
            eligible,
        }
    }

    pub fn id(&self) -> &CandidateId {
        &self.id
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible
    }
}

/// Validated search parameters.
///
/// # Examples
/// ```
/// use backend::domain::{GeoPoint, ProximityQuery};
///
/// let origin = GeoPoint::new(41.0, 69.0).expect("valid origin");
/// assert!(ProximityQuery::new(origin, 0.0, 1).is_err());
/// assert!(ProximityQuery::new(origin, 5_000.0, 0).is_err());
/// let query = ProximityQuery::nearest(origin, 5_000.0).expect("valid query");
/// assert_eq!(query.limit(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    origin: GeoPoint,
    radius_meters: f64,
    limit: usize,
}

impl ProximityQuery {
    /// Validate and construct a query returning at most `limit` matches.
    pub fn new(origin: GeoPoint, radius_meters: f64, limit: usize) -> Result<Self, ProximityError> {
        validate(radius_meters, limit)?;
        Ok(Self {
            origin,
            radius_meters,
            limit,
        })
    }

    /// Query for the single nearest candidate.
    pub fn nearest(origin: GeoPoint, radius_meters: f64) -> Result<Self, ProximityError> {
        Self::new(origin, radius_meters, 1)
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

fn validate(radius_meters: f64, limit: usize) -> Result<(), ProximityError> {
    if !radius_meters.is_finite() || radius_meters <= 0.0 {
        return Err(ProximityError::invalid_argument(format!(
            "radius must be a positive number of meters, got {radius_meters}"
        )));
    }
    if limit == 0 {
        return Err(ProximityError::invalid_argument(
            "limit must be at least 1",
        ));
    }
    Ok(())
}

/// A candidate paired with its distance from the query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityMatch {
    candidate: Candidate,
    distance_meters: f64,
}

impl ProximityMatch {
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn id(&self) -> &CandidateId {
        self.candidate.id()
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }
}

/// Matches ordered ascending by distance, ties by candidate id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityResult(Vec<ProximityMatch>);

impl ProximityResult {
    pub fn matches(&self) -> &[ProximityMatch] {
        &self.0
    }

    /// The closest match, if any.
    pub fn nearest(&self) -> Option<&ProximityMatch> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProximityMatch> {
        self.0.iter()
    }

    pub fn into_matches(self) -> Vec<ProximityMatch> {
        self.0
    }
}

impl IntoIterator for ProximityResult {
    type Item = ProximityMatch;
    type IntoIter = std::vec::IntoIter<ProximityMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Resolve the nearest eligible candidates within the query radius.
///
/// Ineligible candidates are skipped, distances are computed with
/// [`distance_meters`], candidates beyond the radius are discarded, and the
/// survivors are sorted by `(distance, id)` and truncated to the query limit.
/// Duplicate ids are not collapsed.
///
/// # Errors
/// - [`ProximityError::InvalidArgument`] when the radius or limit is unusable;
///   no candidate is evaluated in that case.
/// - [`ProximityError::NotFound`] when nothing survives filtering.
///
/// # Examples
/// ```
/// use backend::domain::{Candidate, CandidateId, GeoPoint, ProximityQuery, resolve};
///
/// let a = Candidate::new(CandidateId::new("A")?, GeoPoint::new(41.0, 69.0).unwrap(), true);
/// let b = Candidate::new(CandidateId::new("B")?, GeoPoint::new(41.01, 69.01).unwrap(), true);
/// let query = ProximityQuery::nearest(GeoPoint::new(41.0, 69.0).unwrap(), 5_000.0)?;
///
/// let result = resolve(&[a, b], &query)?;
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.matches()[0].id().as_str(), "A");
/// assert_eq!(result.matches()[0].distance_meters(), 0.0);
/// # Ok::<(), backend::domain::ProximityError>(())
/// ```
pub fn resolve(
    candidates: &[Candidate],
    query: &ProximityQuery,
) -> Result<ProximityResult, ProximityError> {
    validate(query.radius_meters, query.limit)?;

    let mut matches: Vec<ProximityMatch> = candidates
        .iter()
        .filter(|candidate| candidate.eligible)
        .filter_map(|candidate| {
            let distance = distance_meters(query.origin, candidate.location);
            (distance <= query.radius_meters).then(|| ProximityMatch {
                candidate: candidate.clone(),
                distance_meters: distance,
            })
        })
        .collect();

    matches.sort_by(|left, right| {
        left.distance_meters
            .total_cmp(&right.distance_meters)
            .then_with(|| left.candidate.id.cmp(&right.candidate.id))
    });
    matches.truncate(query.limit);

    if matches.is_empty() {
        return Err(ProximityError::not_found());
    }
    Ok(ProximityResult(matches))
}

/// Per-category search radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityPolicy {
    branch_radius_meters: f64,
    courier_radius_meters: f64,
}

impl Default for ProximityPolicy {
    fn default() -> Self {
        Self {
            branch_radius_meters: DEFAULT_BRANCH_RADIUS_METERS,
            courier_radius_meters: DEFAULT_COURIER_RADIUS_METERS,
        }
    }
}

impl ProximityPolicy {
    /// Build a policy, rejecting non-positive radii.
    pub fn new(
        branch_radius_meters: f64,
        courier_radius_meters: f64,
    ) -> Result<Self, ProximityError> {
        validate(branch_radius_meters, 1)?;
        validate(courier_radius_meters, 1)?;
        Ok(Self {
            branch_radius_meters,
            courier_radius_meters,
        })
    }

    pub fn radius_for(&self, category: CandidateCategory) -> f64 {
        match category {
            CandidateCategory::Branch => self.branch_radius_meters,
            CandidateCategory::Courier => self.courier_radius_meters,
        }
    }

    /// Single-nearest query for `category` around `origin`.
    pub fn nearest_query(
        &self,
        category: CandidateCategory,
        origin: GeoPoint,
    ) -> Result<ProximityQuery, ProximityError> {
        ProximityQuery::nearest(origin, self.radius_for(category))
    }
}

#[cfg(test)]
mod tests;
