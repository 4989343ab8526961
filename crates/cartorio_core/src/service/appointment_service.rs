//! Appointment scheduling service.
//!
//! # Invariants
//! - New appointments are `Pendente` with no `updated_at`.
//! - `list_appointments` is sorted by date, then time, then creation time.
//! - Status changes always stamp `updated_at`.

use crate::model::appointment::{
    Appointment, AppointmentFilter, AppointmentForm, AppointmentKind, AppointmentStatus,
    APPOINTMENT_ID_PREFIX,
};
use crate::model::id::RecordId;
use crate::repo::RecordRepository;
use crate::service::{ServiceError, ServiceResult};
use chrono::{NaiveDate, NaiveTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Whether status updates must follow the legal-transition table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Any status may replace any other.
    #[default]
    Unconstrained,
    /// Only `AppointmentStatus::can_transition_to` moves are accepted.
    Enforced,
}

pub struct AppointmentService<R: RecordRepository<Appointment>> {
    repo: R,
    policy: StatusPolicy,
}

impl<R: RecordRepository<Appointment>> AppointmentService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_policy(repo, StatusPolicy::default())
    }

    pub fn with_policy(repo: R, policy: StatusPolicy) -> Self {
        Self { repo, policy }
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create_appointment(&mut self, form: AppointmentForm) -> ServiceResult<Appointment> {
        let appointment = Appointment::from_form(
            RecordId::generate(APPOINTMENT_ID_PREFIX),
            form,
            Utc::now(),
        );
        let appointment = self.repo.insert(appointment)?;
        info!(
            "event=appointment_create module=service status=ok appointment_id={} kind={} date={}",
            appointment.id, appointment.kind, appointment.date
        );
        Ok(appointment)
    }

    pub fn list_appointments(&self, filter: &AppointmentFilter) -> ServiceResult<Vec<Appointment>> {
        let mut appointments: Vec<Appointment> = self
            .repo
            .list()?
            .into_iter()
            .filter(|appointment| filter.matches(appointment))
            .collect();
        appointments.sort_by(|a, b| {
            (a.date, a.time, a.created_at).cmp(&(b.date, b.time, b.created_at))
        });
        Ok(appointments)
    }

    pub fn get_appointment(&self, id: &RecordId) -> ServiceResult<Option<Appointment>> {
        Ok(self.repo.get(id)?)
    }

    /// Sets a new status. Returns `None` for an unknown id.
    ///
    /// # Errors
    /// - `IllegalTransition` under `StatusPolicy::Enforced` when the move is
    ///   not in the transition table.
    pub fn update_status(
        &mut self,
        id: &RecordId,
        status: AppointmentStatus,
    ) -> ServiceResult<Option<Appointment>> {
        let Some(mut appointment) = self.repo.get(id)? else {
            return Ok(None);
        };

        let from = appointment.status;
        if self.policy == StatusPolicy::Enforced && !from.can_transition_to(status) {
            warn!(
                "event=appointment_status module=service status=rejected appointment_id={id} from={from} to={status}"
            );
            return Err(ServiceError::IllegalTransition { from, to: status });
        }

        appointment.status = status;
        appointment.updated_at = Some(Utc::now());
        let appointment = self.repo.replace(appointment)?;
        info!(
            "event=appointment_status module=service status=ok appointment_id={id} from={from} to={status}"
        );
        Ok(Some(appointment))
    }

    pub fn delete_appointment(&mut self, id: &RecordId) -> ServiceResult<bool> {
        let deleted = self.repo.delete(id)?;
        if deleted {
            info!("event=appointment_delete module=service status=ok appointment_id={id}");
        }
        Ok(deleted)
    }

    /// Inserts the two demo appointments when the store is empty.
    pub fn seed_demo_appointments(&mut self) -> ServiceResult<usize> {
        if !self.repo.list()?.is_empty() {
            return Ok(0);
        }

        let demo = demo_appointments()?;
        let count = demo.len();
        for appointment in demo {
            self.repo.insert(appointment)?;
        }
        info!("event=seed_appointments module=service status=ok count={count}");
        Ok(count)
    }
}

fn demo_appointments() -> ServiceResult<Vec<Appointment>> {
    let now = Utc::now();
    let date = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d).ok_or(ServiceError::InconsistentState("invalid demo date"))
    };
    let time = |h, m| {
        NaiveTime::from_hms_opt(h, m, 0).ok_or(ServiceError::InconsistentState("invalid demo time"))
    };

    Ok(vec![
        Appointment {
            id: RecordId::new("ag-exemplo-1"),
            kind: AppointmentKind::CivilWedding,
            date: date(2025, 7, 15)?,
            time: time(10, 0)?,
            requester_name: "Fulano de Tal".to_string(),
            requester_cpf: Some("111.111.111-11".to_string()),
            requester_phone: Some("(11) 99999-1111".to_string()),
            requester_email: Some("fulano@example.com".to_string()),
            secondary_requester_name: Some("Ciclana de Sousa".to_string()),
            notes: Some("Cerimônia simples.".to_string()),
            status: AppointmentStatus::Confirmed,
            created_at: now,
            updated_at: None,
        },
        Appointment {
            id: RecordId::new("ag-exemplo-2"),
            kind: AppointmentKind::GeneralService,
            date: date(2025, 7, 16)?,
            time: time(14, 30)?,
            requester_name: "Beltrano Silva".to_string(),
            requester_cpf: Some("222.222.222-22".to_string()),
            requester_phone: Some("(22) 98888-2222".to_string()),
            requester_email: Some("beltrano@example.com".to_string()),
            secondary_requester_name: None,
            notes: Some("Dúvidas sobre registro de imóvel.".to_string()),
            status: AppointmentStatus::Pending,
            created_at: now,
            updated_at: None,
        },
    ])
}
