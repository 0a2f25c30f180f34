//! Snapshot persistence backends.
//!
//! Both stores keep named records that are fully overwritten on every save.
//! The file store suits single-host deployments; the `PostgreSQL` store is
//! selected when a database is configured.

pub mod file_snapshot_store;
pub mod pg_snapshot_store;
pub mod schema;

pub use file_snapshot_store::FileSnapshotStore;
pub use pg_snapshot_store::PgSnapshotStore;
