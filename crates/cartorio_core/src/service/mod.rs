//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own id generation, timestamps, filtering and list ordering.
//!
//! # Invariants
//! - Services never bypass the injected repository.
//! - Missing records surface as `None`/`false`, not as errors.

mod appointment_service;
mod registration_service;
mod user_service;

pub use appointment_service::{AppointmentService, StatusPolicy};
pub use registration_service::RegistrationService;
pub use user_service::UserService;

use crate::model::appointment::AppointmentStatus;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Status change rejected by `StatusPolicy::Enforced`.
    IllegalTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::IllegalTransition { from, to } => {
                write!(f, "illegal appointment status transition: {from} -> {to}")
            }
            Self::InconsistentState(details) => write!(f, "inconsistent service state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
