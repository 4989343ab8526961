//! Death registration.

use super::common::{DeclarantData, MaritalStatus, RecordedSex};
use crate::form::FlattenOptions;
use crate::validation::patterns::{is_cpf, is_time};
use crate::validation::{FieldReader, FormSchema};
use serde::{Deserialize, Serialize};

/// Leaves whose empty submission is dropped before validation.
const OPTIONAL_LEAVES: &[&str] = &[
    "dataNascimento",
    "horaObito",
    "cpf",
    "rg",
    "profissao",
    "nomeConjuge",
    "nomePai",
    "nomeMae",
    "enderecoCompleto",
    "medicoResponsavelDeclaracaoNome",
    "medicoResponsavelDeclaracaoCRM",
    "localSepultamentoEnterro",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeceasedData {
    pub full_name: String,
    pub sex: Option<RecordedSex>,
    pub nationality: String,
    pub birthplace: String,
    pub profession: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub birth_date: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub spouse_name: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub address: Option<String>,
}

impl DeceasedData {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let full_name = r.text("nomeCompleto", 1, "Nome completo do falecido é obrigatório");
        let sex = r.optional_choice("sexo", "Sexo do falecido é obrigatório");
        let nationality = r.text("nacionalidade", 1, "Nacionalidade do falecido é obrigatória");
        let birthplace = r.text(
            "naturalidade",
            1,
            "Naturalidade (Cidade/UF) do falecido é obrigatória",
        );
        let profession = r.optional_text("profissao");
        let cpf = r.optional_pattern("cpf", is_cpf, "CPF do falecido inválido");
        let rg = r.optional_text("rg");
        let birth_date = r.optional_text("dataNascimento");
        let marital_status = r.optional_choice("estadoCivil", "Estado civil do falecido inválido");
        let spouse_name = r.optional_text("nomeConjuge");
        let father_name = r.optional_text("nomePai");
        let mother_name = r.optional_text("nomeMae");
        let address = r.optional_text("enderecoCompleto");

        Some(Self {
            full_name: full_name?,
            sex,
            nationality: nationality?,
            birthplace: birthplace?,
            profession,
            cpf,
            rg,
            birth_date,
            marital_status,
            spouse_name,
            father_name,
            mother_name,
            address,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathForm {
    pub deceased: DeceasedData,
    pub death_date: String,
    pub death_time: Option<String>,
    pub death_place: String,
    pub death_municipality: String,
    pub death_state: String,
    pub cause_of_death: String,
    pub physician_name: Option<String>,
    pub physician_crm: Option<String>,
    pub burial_place: Option<String>,
    /// Unchecked or absent checkbox means `false`.
    pub cremation: bool,
    pub declarant: DeclarantData,
    pub death_declaration_url: Option<String>,
    pub deceased_document_url: Option<String>,
    pub deceased_certificate_url: Option<String>,
}

impl FormSchema for DeathForm {
    fn flatten_options() -> FlattenOptions {
        FlattenOptions::new().absent_when_empty(OPTIONAL_LEAVES)
    }

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let deceased = r.group("falecido", DeceasedData::read);
        let death_date = r.text("dataObito", 1, "Data do óbito é obrigatória");
        let death_time = r.optional_pattern("horaObito", is_time, "Hora do óbito inválida (HH:MM)");
        let death_place = r.text("localObito", 1, "Local do óbito é obrigatório");
        let death_municipality = r.text("municipioObito", 1, "Município do óbito é obrigatório");
        let death_state = r.text_len("ufObito", 2, "UF do óbito deve ter 2 caracteres");
        let cause_of_death = r.text(
            "causaMorteAtestadoMedico",
            1,
            "Causa da morte (conforme atestado) é obrigatória",
        );
        let physician_name = r.optional_text("medicoResponsavelDeclaracaoNome");
        let physician_crm = r.optional_text("medicoResponsavelDeclaracaoCRM");
        let burial_place = r.optional_text("localSepultamentoEnterro");
        let cremation = r.checkbox("seraCreimado");
        let declarant = r.group("declarante", |group| {
            DeclarantData::read(
                group,
                "vinculoComFalecido",
                "Vínculo com o falecido é obrigatório",
            )
        });
        let death_declaration_url = r.optional_text("declaracaoObitoUrl");
        let deceased_document_url = r.optional_text("documentoFalecidoUrl");
        let deceased_certificate_url = r.optional_text("certidaoCasamentoNascimentoFalecidoUrl");

        Some(Self {
            deceased: deceased?,
            death_date: death_date?,
            death_time,
            death_place: death_place?,
            death_municipality: death_municipality?,
            death_state: death_state?,
            cause_of_death: cause_of_death?,
            physician_name,
            physician_crm,
            burial_place,
            cremation,
            declarant: declarant?,
            death_declaration_url,
            deceased_document_url,
            deceased_certificate_url,
        })
    }
}
