//! Core domain logic for the cartório front office.
//! This crate is the single source of truth for submission rules and record shapes.

pub mod action;
pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use action::{ActionResult, ActionStatus};
pub use config::{ConfigError, CoreConfig, LoggingConfig, StorageConfig};
pub use form::{flatten, FlattenOptions, FormData, FormValue};
pub use logging::{active_logging, default_log_level, init_logging, LogTarget};
pub use model::id::RecordId;
pub use model::Record;
pub use repo::{
    InMemoryRepository, MemoryProvider, RecordRepository, RepoError, RepoResult,
    RepositoryProvider, SqliteProvider, SqliteRecordRepository,
};
pub use service::{
    AppointmentService, RegistrationService, ServiceError, ServiceResult, StatusPolicy,
    UserService,
};
pub use validation::{parse_form, FieldError, FormSchema, ValidationErrors};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
