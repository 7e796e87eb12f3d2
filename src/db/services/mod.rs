//! High-level data access for the rest of the application: target CRUD plus
//! the Postgres-backed implementations of the core's store contracts.

pub mod series_service;
pub mod target_service;

pub use series_service::PgSeriesStore;
pub use target_service::PgTargetCatalog;
