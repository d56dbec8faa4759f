//! Port for recording courier assignments.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::CourierAssignment;

use super::define_port_error;

define_port_error! {
    /// Errors raised by courier assignment adapters.
    pub enum CourierAssignmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "courier assignment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "courier assignment repository query failed: {message}",
        /// The order gained a courier or was closed since it was read.
        NotAssignable { order_id: Uuid } =>
            "order {order_id} already has a courier or is closed",
    }
}

/// Port writing the assignment row and the order's courier link together.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourierAssignmentRepository: Send + Sync {
    /// Record `assignment` atomically. Fails with `NotAssignable` when the
    /// order already carries a courier or has been cancelled or delivered.
    async fn record(
        &self,
        assignment: &CourierAssignment,
    ) -> Result<(), CourierAssignmentRepositoryError>;
}

/// Fixture repository that accepts every assignment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourierAssignmentRepository;

#[async_trait]
impl CourierAssignmentRepository for FixtureCourierAssignmentRepository {
    async fn record(
        &self,
        _assignment: &CourierAssignment,
    ) -> Result<(), CourierAssignmentRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn not_assignable_names_the_order() {
        let order_id = Uuid::nil();
        let err = CourierAssignmentRepositoryError::not_assignable(order_id);
        assert_eq!(
            err.to_string(),
            "order 00000000-0000-0000-0000-000000000000 already has a courier or is closed"
        );
    }
}
