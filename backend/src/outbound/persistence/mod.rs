//! PostgreSQL persistence adapters using Diesel.
//!
//! Adapters only translate between Diesel rows and domain values. Row structs
//! (`models`) and table definitions (`schema`) stay private to this module,
//! and every database failure is mapped to the port's own error type.
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselOrderRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/delivery")).await?;
//! let orders = DieselOrderRepository::new(pool);
//! # let _ = orders;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_candidate_snapshot_provider;
mod diesel_courier_assignment_repository;
mod diesel_order_repository;
mod diesel_product_catalogue;
mod models;
mod pool;
mod schema;

pub use diesel_candidate_snapshot_provider::DieselCandidateSnapshotProvider;
pub use diesel_courier_assignment_repository::DieselCourierAssignmentRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_product_catalogue::DieselProductCatalogue;
pub use pool::{DbPool, PoolConfig, PoolError};
