//! Stillbirth registration.
//!
//! Numeric leaves that are empty or not numbers are dropped while
//! flattening, so they end up absent instead of failing validation.

use super::common::{DeclarantData, DeliveryType, FatherData, MotherData, ParentKeys, StillbirthSex};
use crate::form::FlattenOptions;
use crate::validation::patterns::is_time;
use crate::validation::{FieldReader, FormSchema};
use serde::{Deserialize, Serialize};

const NUMERIC_LEAVES: &[&str] = &["tempoGestacaoSemanas", "pesoAoNascerGramas", "idadeEpocaParto"];

const OPTIONAL_LEAVES: &[&str] = &[
    "nomeCompleto",
    "horaEvento",
    "causaMorteNatimorto",
    "naturalidade",
    "nacionalidade",
    "profissao",
    "cpf",
    "rg",
    "enderecoCompleto",
    "estadoCivil",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StillbirthData {
    pub full_name: Option<String>,
    pub sex: StillbirthSex,
    pub event_date: String,
    pub event_time: Option<String>,
    pub place: String,
    pub municipality: String,
    pub state: String,
    pub gestation_weeks: Option<u32>,
    pub delivery_type: Option<DeliveryType>,
    pub birth_weight_grams: Option<u32>,
    pub cause_of_death: Option<String>,
}

impl StillbirthData {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let full_name = r.optional_text("nomeCompleto");
        let sex = r.choice("sexo", "Sexo é obrigatório");
        let event_date = r.text("dataEvento", 1, "Data do evento é obrigatória");
        let event_time = r.optional_pattern("horaEvento", is_time, "Hora do evento inválida (HH:MM)");
        let place = r.text("localOcorrencia", 1, "Local de ocorrência é obrigatório");
        let municipality = r.text("municipioOcorrencia", 1, "Município de ocorrência é obrigatório");
        let state = r.text_len("ufOcorrencia", 2, "UF de ocorrência deve ter 2 caracteres");
        let gestation_weeks = r.optional_positive_int(
            "tempoGestacaoSemanas",
            "Tempo de gestação deve ser um número",
            "Tempo de gestação deve ser positivo",
        );
        let delivery_type = r.optional_choice("tipoParto", "Tipo de parto inválido");
        let birth_weight_grams = r.optional_positive_int(
            "pesoAoNascerGramas",
            "Peso deve ser um número",
            "Peso deve ser positivo",
        );
        let cause_of_death = r.optional_text("causaMorteNatimorto");

        Some(Self {
            full_name,
            sex: sex?,
            event_date: event_date?,
            event_time,
            place: place?,
            municipality: municipality?,
            state: state?,
            gestation_weeks,
            delivery_type,
            birth_weight_grams,
            cause_of_death,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StillbirthForm {
    pub stillbirth: StillbirthData,
    pub mother: MotherData,
    /// Absent when no `pai.*` field was filled in.
    pub father: Option<FatherData>,
    pub declarant: DeclarantData,
    pub fetal_death_declaration_url: Option<String>,
    pub parents_documents_url: Option<String>,
    pub parents_residence_proof_url: Option<String>,
}

impl FormSchema for StillbirthForm {
    fn flatten_options() -> FlattenOptions {
        FlattenOptions::new()
            .absent_when_empty(OPTIONAL_LEAVES)
            .absent_when_not_numeric(NUMERIC_LEAVES)
    }

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let stillbirth = r.group("natimorto", StillbirthData::read);
        let mother = r.group("mae", |group| MotherData::read(group, ParentKeys::NESTED));
        let father = r.optional_group("pai", |group| FatherData::read(group, ParentKeys::NESTED));
        let declarant = r.group("declarante", |group| {
            DeclarantData::read(
                group,
                "vinculoComNatimortoOuPais",
                "Vínculo do declarante é obrigatório",
            )
        });
        let fetal_death_declaration_url = r.optional_text("declaracaoObitoFetalUrl");
        let parents_documents_url = r.optional_text("documentosPaisUrl");
        let parents_residence_proof_url = r.optional_text("comprovanteResidenciaPaisUrl");

        Some(Self {
            stillbirth: stillbirth?,
            mother: mother?,
            father,
            declarant: declarant?,
            fetal_death_declaration_url,
            parents_documents_url,
            parents_residence_proof_url,
        })
    }
}
