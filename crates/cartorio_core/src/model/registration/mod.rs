//! Civil-registry records.
//!
//! # Responsibility
//! - Define the five registration forms and their field rules.
//! - Wrap each validated form in a stored `Registration<T>` envelope.
//!
//! # Invariants
//! - A registration's `data` is exactly the validated form; nothing is
//!   derived or normalized after validation.
//! - Each kind starts in its own fixed initial status.

mod birth;
mod civil_union;
pub mod common;
mod death;
mod marriage;
mod stillbirth;

pub use birth::{BirthForm, ChildData, DeclarantInfo};
pub use civil_union::{CivilUnionForm, CommonChild, PartnerData};
pub use death::{DeathForm, DeceasedData};
pub use marriage::{MarriageForm, SpouseData};
pub use stillbirth::{StillbirthData, StillbirthForm};

use crate::model::id::RecordId;
use crate::model::Record;
use crate::validation::FormSchema;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum RegistrationStatus {
    #[serde(rename = "Pendente")]
    #[strum(serialize = "Pendente")]
    Pending,
    #[serde(rename = "Habilitação em Análise")]
    #[strum(serialize = "Habilitação em Análise")]
    UnderReview,
    #[serde(rename = "Registrado")]
    #[strum(serialize = "Registrado")]
    Registered,
}

/// A registration form type together with its storage and messaging constants.
pub trait RegistrationKind: FormSchema + Clone + Serialize + DeserializeOwned {
    const COLLECTION: &'static str;
    const ID_PREFIX: &'static str;
    /// Short name used in log lines.
    const LABEL: &'static str;
    const INITIAL_STATUS: RegistrationStatus;
    const CREATED_MESSAGE: &'static str;
    const FAILURE_MESSAGE: &'static str;
}

/// Stored registration: the validated form plus system fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration<T> {
    pub id: RecordId,
    pub registered_at: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub data: T,
}

impl<T: RegistrationKind> Registration<T> {
    pub fn new(data: T, registered_at: DateTime<Utc>) -> Self {
        Self {
            id: RecordId::generate(T::ID_PREFIX),
            registered_at,
            status: T::INITIAL_STATUS,
            data,
        }
    }
}

impl<T: RegistrationKind> Record for Registration<T> {
    const COLLECTION: &'static str = T::COLLECTION;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl RegistrationKind for MarriageForm {
    const COLLECTION: &'static str = "marriage_registrations";
    const ID_PREFIX: &'static str = "cas";
    const LABEL: &'static str = "marriage";
    const INITIAL_STATUS: RegistrationStatus = RegistrationStatus::UnderReview;
    const CREATED_MESSAGE: &'static str =
        "Registro de Casamento (Habilitação) iniciado com sucesso (simulado).";
    const FAILURE_MESSAGE: &'static str =
        "Ocorreu um erro ao processar o registro de casamento.";
}

impl RegistrationKind for BirthForm {
    const COLLECTION: &'static str = "birth_registrations";
    const ID_PREFIX: &'static str = "nasc";
    const LABEL: &'static str = "birth";
    const INITIAL_STATUS: RegistrationStatus = RegistrationStatus::Pending;
    const CREATED_MESSAGE: &'static str = "Registro de Nascimento criado com sucesso (simulado).";
    const FAILURE_MESSAGE: &'static str = "Ocorreu um erro ao processar o registro.";
}

impl RegistrationKind for DeathForm {
    const COLLECTION: &'static str = "death_registrations";
    const ID_PREFIX: &'static str = "obito";
    const LABEL: &'static str = "death";
    const INITIAL_STATUS: RegistrationStatus = RegistrationStatus::Registered;
    const CREATED_MESSAGE: &'static str = "Registro de Óbito criado com sucesso (simulado).";
    const FAILURE_MESSAGE: &'static str = "Ocorreu um erro ao processar o registro de óbito.";
}

impl RegistrationKind for StillbirthForm {
    const COLLECTION: &'static str = "stillbirth_registrations";
    const ID_PREFIX: &'static str = "nati";
    const LABEL: &'static str = "stillbirth";
    const INITIAL_STATUS: RegistrationStatus = RegistrationStatus::Registered;
    const CREATED_MESSAGE: &'static str = "Registro de Natimorto criado com sucesso (simulado).";
    const FAILURE_MESSAGE: &'static str =
        "Ocorreu um erro ao processar o registro de natimorto.";
}

impl RegistrationKind for CivilUnionForm {
    const COLLECTION: &'static str = "civil_union_registrations";
    const ID_PREFIX: &'static str = "uniao";
    const LABEL: &'static str = "civil_union";
    const INITIAL_STATUS: RegistrationStatus = RegistrationStatus::Registered;
    const CREATED_MESSAGE: &'static str =
        "Registro de União Estável criado com sucesso (simulado).";
    const FAILURE_MESSAGE: &'static str =
        "Ocorreu um erro ao processar o registro de união estável.";
}
