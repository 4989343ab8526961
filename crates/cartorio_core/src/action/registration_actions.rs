use super::{note_resubmission, ActionResult};
use crate::form::FormData;
use crate::model::registration::{Registration, RegistrationKind};
use crate::repo::RecordRepository;
use crate::service::RegistrationService;
use crate::validation::parse_form;
use log::{error, warn};

/// Validates and stores one registration of kind `T`.
pub fn submit_registration<T, R>(
    service: &mut RegistrationService<T, R>,
    previous: Option<&ActionResult<Registration<T>>>,
    form: &FormData,
) -> ActionResult<Registration<T>>
where
    T: RegistrationKind,
    R: RecordRepository<Registration<T>>,
{
    note_resubmission("registration_submit", previous);

    let parsed = match parse_form::<T>(form) {
        Ok(parsed) => parsed,
        Err(errors) => {
            warn!(
                "event=registration_submit module=action status=invalid kind={} error_count={}",
                T::LABEL,
                errors.len()
            );
            return ActionResult::invalid(errors);
        }
    };

    match service.register(parsed) {
        Ok(registration) => ActionResult::success(T::CREATED_MESSAGE, registration),
        Err(err) => {
            error!(
                "event=registration_submit module=action status=error kind={} error={err}",
                T::LABEL
            );
            ActionResult::error(T::FAILURE_MESSAGE)
        }
    }
}
