//! Submission handlers returning a uniform result envelope.
//!
//! # Responsibility
//! - Run flatten -> validate -> service for every form submission.
//! - Convert every outcome into an `ActionResult`.
//!
//! # Invariants
//! - Handlers never panic and never return `Err`; failures become
//!   `ActionStatus::Error` results.
//! - The service is not called when validation fails.
//! - Service errors are logged and reported with a generic message.

mod appointment_actions;
mod registration_actions;
mod user_actions;

pub use appointment_actions::{change_appointment_status, delete_appointment, submit_appointment};
pub use registration_actions::submit_registration;
pub use user_actions::{delete_user, save_user};

use crate::validation::ValidationErrors;
use log::debug;
use serde::{Deserialize, Serialize};

pub const VALIDATION_FAILED_MESSAGE: &str = "Erro de validação. Verifique os campos.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Error,
}

/// Outcome of one submission, serialized as
/// `{ "message", "status", "errors", "data" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub message: String,
    pub status: ActionStatus,
    pub errors: Option<ValidationErrors>,
    pub data: Option<T>,
}

impl<T> ActionResult<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status: ActionStatus::Success,
            errors: None,
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: ActionStatus::Error,
            errors: None,
            data: None,
        }
    }

    pub fn invalid(errors: ValidationErrors) -> Self {
        Self {
            message: VALIDATION_FAILED_MESSAGE.to_string(),
            status: ActionStatus::Error,
            errors: Some(errors),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }
}

/// Logs a resubmission that follows a failed attempt.
fn note_resubmission<T>(action: &str, previous: Option<&ActionResult<T>>) {
    if let Some(previous) = previous.filter(|previous| !previous.is_success()) {
        debug!(
            "event={action} module=action status=resubmit previous_errors={}",
            previous.errors.as_ref().map_or(0, ValidationErrors::len)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionResult, ActionStatus};
    use crate::validation::ValidationErrors;
    use serde_json::json;

    #[test]
    fn serializes_wire_shape() {
        let mut errors = ValidationErrors::new();
        errors.push(vec!["hora".to_string()], "Formato de hora inválido (HH:MM).");
        let result: ActionResult<()> = ActionResult::invalid(errors);

        assert_eq!(result.status, ActionStatus::Error);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "message": "Erro de validação. Verifique os campos.",
                "status": "error",
                "errors": [{"path": ["hora"], "message": "Formato de hora inválido (HH:MM)."}],
                "data": null
            })
        );
    }

    #[test]
    fn success_carries_data_without_errors() {
        let result = ActionResult::success("ok", 7);
        assert!(result.is_success());
        assert_eq!(result.data, Some(7));
        assert!(result.errors.is_none());
    }
}
