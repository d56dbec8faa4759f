//! Couriers and their order assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geo::GeoPoint;
use super::identity::UserId;
use super::proximity::{Candidate, CandidateId};

/// Availability of a courier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierStatus {
    Active,
    Busy,
    Inactive,
}

/// Status of a courier's assignment to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Accepted,
    Delivered,
}

/// Error raised when a stored status label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} status: {value}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl ParseStatusError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

macro_rules! status_labels {
    ($ty:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::domain::courier::ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err($crate::domain::courier::ParseStatusError::new($kind, other)),
                }
            }
        }
    };
}

pub(crate) use status_labels;

status_labels!(CourierStatus, "courier", {
    Active => "active",
    Busy => "busy",
    Inactive => "inactive",
});

status_labels!(AssignmentStatus, "assignment", {
    Pending => "pending",
    Accepted => "accepted",
    Delivered => "delivered",
});

/// A courier and their last reported position.
#[derive(Debug, Clone, PartialEq)]
pub struct Courier {
    id: Uuid,
    user_id: UserId,
    status: CourierStatus,
    location: GeoPoint,
    last_updated: DateTime<Utc>,
}

impl Courier {
    pub fn new(
        id: Uuid,
        user_id: UserId,
        status: CourierStatus,
        location: GeoPoint,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            status,
            location,
            last_updated,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn status(&self) -> CourierStatus {
        self.status
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Only active couriers may take new orders.
    pub fn to_candidate(&self) -> Candidate {
        Candidate::new(
            CandidateId::from_uuid(self.id),
            self.location,
            self.status == CourierStatus::Active,
        )
    }
}

/// Link between an order and the courier chosen to deliver it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourierAssignment {
    order_id: Uuid,
    courier_id: Uuid,
    status: AssignmentStatus,
    assigned_at: DateTime<Utc>,
}

impl CourierAssignment {
    /// New assignments start out pending.
    pub fn pending(order_id: Uuid, courier_id: Uuid, assigned_at: DateTime<Utc>) -> Self {
        Self {
            order_id,
            courier_id,
            status: AssignmentStatus::Pending,
            assigned_at,
        }
    }

    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn courier_id(&self) -> Uuid {
        self.courier_id
    }

    pub fn status(&self) -> AssignmentStatus {
        self.status
    }

    pub fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }
}
