//! PostgreSQL-backed `CourierAssignmentRepository`.
//!
//! The order's courier column is claimed with a conditional update before the
//! assignment row is inserted, both in one transaction. The claim only matches
//! open orders without a courier, so losing it to a concurrent assignment or
//! cancellation rolls back and reports `NotAssignable`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::{CourierAssignment, OrderStatus};
use crate::domain::ports::{CourierAssignmentRepository, CourierAssignmentRepositoryError};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewOrderCourierRow;
use super::pool::DbPool;
use super::schema::{order_couriers, orders};

/// Diesel-backed courier assignment writer.
#[derive(Clone)]
pub struct DieselCourierAssignmentRepository {
    pool: DbPool,
}

impl DieselCourierAssignmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Statuses that close an order to courier assignment.
const CLOSED_STATUSES: [&str; 2] = [
    OrderStatus::Cancelled.as_str(),
    OrderStatus::Delivered.as_str(),
];

enum ClaimOutcome {
    Recorded,
    NotAssignable,
}

#[async_trait]
impl CourierAssignmentRepository for DieselCourierAssignmentRepository {
    async fn record(
        &self,
        assignment: &CourierAssignment,
    ) -> Result<(), CourierAssignmentRepositoryError> {
        let order_id = assignment.order_id();
        let courier_id = assignment.courier_id();
        let assigned_at = assignment.assigned_at();
        let row = NewOrderCourierRow {
            id: Uuid::new_v4(),
            order_id,
            courier_id,
            status: assignment.status().as_str(),
            assigned_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let claimed = diesel::update(
                        orders::table
                            .filter(orders::id.eq(order_id))
                            .filter(orders::courier_id.is_null())
                            .filter(orders::status.ne_all(CLOSED_STATUSES)),
                    )
                    .set((
                        orders::courier_id.eq(Some(courier_id)),
                        orders::updated_at.eq(assigned_at),
                    ))
                    .execute(conn)
                    .await?;

                    if claimed == 0 {
                        return Ok(ClaimOutcome::NotAssignable);
                    }

                    diesel::insert_into(order_couriers::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(ClaimOutcome::Recorded)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            ClaimOutcome::Recorded => Ok(()),
            ClaimOutcome::NotAssignable => {
                Err(CourierAssignmentRepositoryError::not_assignable(order_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(OrderStatus::Pending)]
    #[case(OrderStatus::Confirmed)]
    #[case(OrderStatus::Cancelled)]
    #[case(OrderStatus::Preparing)]
    #[case(OrderStatus::PickedUp)]
    #[case(OrderStatus::Delivered)]
    fn claim_skips_exactly_the_terminal_statuses(#[case] status: OrderStatus) {
        assert_eq!(CLOSED_STATUSES.contains(&status.as_str()), status.is_terminal());
    }
}
