//! Core domain logic for the warehouse inventory backend.
//! This crate is the single source of truth for persistence rules and the
//! error classification every resource shares.

pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use context::{CancelHandle, Interrupted, OpContext};
pub use db::{open_db, open_db_in_memory, open_db_with_busy_timeout, DbError, DbResult};
pub use error::ErrorKind;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{Entity, ForeignKey, MissingRecordPolicy, RecordId};
pub use repo::{Existence, RepoError, RepoResult, Repository, SqliteRepository};
pub use service::{EntityService, LocalityService, ReportService, ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
