//! Shared mapping from pool and Diesel failures to port errors.
//!
//! Every port error in this layer distinguishes an unreachable store from a
//! failed query; [`StoreError`] captures that split so adapters share one
//! mapping.

use tracing::debug;

use crate::domain::ports::{
    CandidateSnapshotError, CourierAssignmentRepositoryError, OrderRepositoryError,
    ProductCatalogueError,
};

use super::pool::PoolError;

/// Port errors with connection and query variants.
pub(crate) trait StoreError {
    fn from_connection(message: String) -> Self;
    fn from_query(message: String) -> Self;
}

macro_rules! impl_store_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl StoreError for $error {
                fn from_connection(message: String) -> Self {
                    <$error>::connection(message)
                }

                fn from_query(message: String) -> Self {
                    <$error>::query(message)
                }
            }
        )+
    };
}

impl_store_error!(
    CandidateSnapshotError,
    CourierAssignmentRepositoryError,
    OrderRepositoryError,
    ProductCatalogueError,
);

/// Pool failures always mean the store is unreachable.
pub(crate) fn map_pool_error<E: StoreError>(error: PoolError) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    E::from_connection(message)
}

/// Map Diesel failures, keeping driver detail out of the returned message.
pub(crate) fn map_diesel_error<E: StoreError>(error: diesel::result::Error) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::from_connection("database connection error".to_owned())
        }
        DieselError::NotFound => E::from_query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::from_query("database query error".to_owned()),
        _ => E::from_query("database error".to_owned()),
    }
}

/// Report a stored row that fails domain validation.
pub(crate) fn malformed_row<E: StoreError>(table: &str, detail: impl std::fmt::Display) -> E {
    E::from_query(format!("malformed {table} row: {detail}"))
}
