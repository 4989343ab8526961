use super::{note_resubmission, ActionResult};
use crate::form::FormData;
use crate::model::appointment::{Appointment, AppointmentForm, AppointmentStatus};
use crate::model::id::RecordId;
use crate::repo::RecordRepository;
use crate::service::{AppointmentService, ServiceError};
use crate::validation::parse_form;
use log::{error, warn};

const CREATED_MESSAGE: &str = "Agendamento criado com sucesso!";
const CREATE_FAILED_MESSAGE: &str = "Ocorreu um erro ao processar o agendamento.";
const STATUS_FAILED_MESSAGE: &str = "Erro ao atualizar status do agendamento.";
const DELETE_FAILED_MESSAGE: &str = "Erro ao deletar agendamento.";

pub fn submit_appointment<R: RecordRepository<Appointment>>(
    service: &mut AppointmentService<R>,
    previous: Option<&ActionResult<Appointment>>,
    form: &FormData,
) -> ActionResult<Appointment> {
    note_resubmission("appointment_submit", previous);

    let parsed = match parse_form::<AppointmentForm>(form) {
        Ok(parsed) => parsed,
        Err(errors) => {
            warn!(
                "event=appointment_submit module=action status=invalid error_count={}",
                errors.len()
            );
            return ActionResult::invalid(errors);
        }
    };

    match service.create_appointment(parsed) {
        Ok(appointment) => ActionResult::success(CREATED_MESSAGE, appointment),
        Err(err) => {
            error!("event=appointment_submit module=action status=error error={err}");
            ActionResult::error(CREATE_FAILED_MESSAGE)
        }
    }
}

pub fn change_appointment_status<R: RecordRepository<Appointment>>(
    service: &mut AppointmentService<R>,
    id: &RecordId,
    status: AppointmentStatus,
) -> ActionResult<Appointment> {
    match service.update_status(id, status) {
        Ok(Some(appointment)) => ActionResult::success(
            format!("Status do agendamento {id} atualizado para {status}."),
            appointment,
        ),
        Ok(None) => ActionResult::error(format!("Agendamento {id} não encontrado.")),
        Err(ServiceError::IllegalTransition { from, to }) => ActionResult::error(format!(
            "Não é possível alterar o status do agendamento {id} de {from} para {to}."
        )),
        Err(err) => {
            error!(
                "event=appointment_status module=action status=error appointment_id={id} error={err}"
            );
            ActionResult::error(STATUS_FAILED_MESSAGE)
        }
    }
}

pub fn delete_appointment<R: RecordRepository<Appointment>>(
    service: &mut AppointmentService<R>,
    id: &RecordId,
) -> ActionResult<()> {
    match service.delete_appointment(id) {
        Ok(true) => ActionResult::success(format!("Agendamento {id} deletado com sucesso."), ()),
        Ok(false) => {
            ActionResult::error(format!("Agendamento {id} não encontrado ou já deletado."))
        }
        Err(err) => {
            error!(
                "event=appointment_delete module=action status=error appointment_id={id} error={err}"
            );
            ActionResult::error(DELETE_FAILED_MESSAGE)
        }
    }
}
