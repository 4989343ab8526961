//! Office appointments and their status lifecycle.
//!
//! # Invariants
//! - New appointments start as `Pendente`.
//! - `date` and `time` are real calendar values; their wire form is
//!   `YYYY-MM-DD` and `HH:MM`.
//! - The transition table is advisory; enforcement is a service policy.

use crate::model::id::RecordId;
use crate::model::Record;
use crate::validation::patterns::{is_cpf, is_date, is_email, is_phone, is_time};
use crate::validation::{FieldReader, FormSchema};
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub const APPOINTMENT_ID_PREFIX: &str = "ag";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum AppointmentKind {
    #[serde(rename = "CasamentoCivil")]
    #[strum(serialize = "CasamentoCivil")]
    CivilWedding,
    #[serde(rename = "AtendimentoGeral")]
    #[strum(serialize = "AtendimentoGeral")]
    GeneralService,
    #[serde(rename = "ReconhecimentoFirma")]
    #[strum(serialize = "ReconhecimentoFirma")]
    SignatureRecognition,
    #[serde(rename = "Procuracao")]
    #[strum(serialize = "Procuracao")]
    PowerOfAttorney,
    #[serde(rename = "Outro")]
    #[strum(serialize = "Outro")]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum AppointmentStatus {
    #[serde(rename = "Pendente")]
    #[strum(serialize = "Pendente")]
    Pending,
    #[serde(rename = "Confirmado")]
    #[strum(serialize = "Confirmado")]
    Confirmed,
    #[serde(rename = "Cancelado")]
    #[strum(serialize = "Cancelado")]
    Cancelled,
    #[serde(rename = "Realizado")]
    #[strum(serialize = "Realizado")]
    Done,
}

impl AppointmentStatus {
    /// Legal-transition table. Re-applying the current status is always legal.
    ///
    /// - `Pendente -> Confirmado | Cancelado`
    /// - `Confirmado -> Cancelado | Realizado`
    /// - `Cancelado`, `Realizado`: terminal
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Done)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: AppointmentKind,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub requester_name: String,
    pub requester_cpf: Option<String>,
    pub requester_phone: Option<String>,
    pub requester_email: Option<String>,
    pub secondary_requester_name: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Appointment {
    pub fn from_form(id: RecordId, form: AppointmentForm, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: form.kind,
            date: form.date,
            time: form.time,
            requester_name: form.requester_name,
            requester_cpf: form.requester_cpf,
            requester_phone: form.requester_phone,
            requester_email: form.requester_email,
            secondary_requester_name: form.secondary_requester_name,
            notes: form.notes,
            status: AppointmentStatus::Pending,
            created_at,
            updated_at: None,
        }
    }
}

impl Record for Appointment {
    const COLLECTION: &'static str = "appointments";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Validated appointment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentForm {
    pub kind: AppointmentKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub requester_name: String,
    pub requester_cpf: Option<String>,
    pub requester_phone: Option<String>,
    pub requester_email: Option<String>,
    pub secondary_requester_name: Option<String>,
    pub notes: Option<String>,
}

impl FormSchema for AppointmentForm {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let kind = r.choice("tipo", "Tipo de agendamento inválido.");
        let date = r
            .required_pattern(
                "data",
                "Data do agendamento é obrigatória.",
                is_date,
                "Formato de data inválido (AAAA-MM-DD).",
            )
            .and_then(|value| match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    r.error("data", "Data inválida.");
                    None
                }
            });
        let time = r
            .required_pattern(
                "hora",
                "Hora do agendamento é obrigatória.",
                is_time,
                "Formato de hora inválido (HH:MM).",
            )
            .and_then(|value| parse_time(&value));
        let requester_name = r.text(
            "nomeSolicitantePrincipal",
            3,
            "Nome do solicitante principal é obrigatório (mínimo 3 caracteres).",
        );
        let requester_cpf = r.optional_pattern(
            "cpfSolicitantePrincipal",
            is_cpf,
            "CPF do solicitante principal inválido.",
        );
        let requester_phone = r.optional_pattern(
            "telefoneSolicitantePrincipal",
            is_phone,
            "Telefone do solicitante principal inválido.",
        );
        let requester_email = r.optional_pattern(
            "emailSolicitantePrincipal",
            is_email,
            "Email do solicitante principal inválido.",
        );
        let secondary_requester_name = r.optional_text("nomeSolicitanteSecundario");
        let notes = r.optional_text_max(
            "observacoes",
            500,
            "Observações devem ter no máximo 500 caracteres.",
        );

        Some(Self {
            kind: kind?,
            date: date?,
            time: time?,
            requester_name: requester_name?,
            requester_cpf,
            requester_phone,
            requester_email,
            secondary_requester_name,
            notes,
        })
    }
}

/// List filter; every set field must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.date.map_or(true, |date| date == appointment.date)
            && self
                .status
                .map_or(true, |status| status == appointment.status)
    }
}

/// Parses an `H:MM`/`HH:MM` wall-clock time.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.trim().split_once(':')?;
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// Formats a time as zero-padded `HH:MM`.
pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

mod hh_mm {
    use super::{format_time, parse_time};
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).ok_or_else(|| de::Error::custom(format!("invalid HH:MM time `{raw}`")))
    }
}
