//! Civil union (união estável) registration.

use super::common::{PartnerMaritalStatus, UnionPropertyRegime, WitnessData};
use crate::form::FlattenOptions;
use crate::validation::patterns::is_cpf;
use crate::validation::{FieldReader, FormSchema};
use serde::{Deserialize, Serialize};

const OPTIONAL_LEAVES: &[&str] = &[
    "dataInicioConvivencia",
    "pactoRegimeBensUrl",
    "comprovanteResidenciaComumUrl",
    "dataRegistro",
    "nomePai",
    "nomeMae",
];

const JOINT_DECLARATION_REQUIRED: &str =
    "A declaração de vontade conjunta de constituir união estável é obrigatória.";

/// One partner of the union (`convivente1` / `convivente2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerData {
    pub full_name: String,
    pub nationality: String,
    pub profession: String,
    pub marital_status: PartnerMaritalStatus,
    pub cpf: String,
    pub rg: String,
    pub address: String,
    pub birth_date: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
}

impl PartnerData {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let full_name = r.text("nomeCompleto", 1, "Nome completo é obrigatório");
        let nationality = r.text("nacionalidade", 1, "Nacionalidade é obrigatória");
        let profession = r.text("profissao", 1, "Profissão é obrigatória");
        let marital_status = r.choice("estadoCivil", "Estado civil é obrigatório");
        let cpf = r.pattern("cpf", is_cpf, "CPF inválido");
        let rg = r.text("rg", 1, "RG é obrigatório");
        let address = r.text("enderecoCompleto", 1, "Endereço completo é obrigatório");
        let birth_date = r.text("dataNascimento", 1, "Data de nascimento é obrigatória");
        let father_name = r.optional_text("nomePai");
        let mother_name = r.optional_text("nomeMae");

        Some(Self {
            full_name: full_name?,
            nationality: nationality?,
            profession: profession?,
            marital_status: marital_status?,
            cpf: cpf?,
            rg: rg?,
            address: address?,
            birth_date: birth_date?,
            father_name,
            mother_name,
        })
    }
}

/// Child shared by both partners (`filhosComuns[n]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonChild {
    pub full_name: String,
    pub birth_date: String,
}

impl CommonChild {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let full_name = r.text("nomeCompleto", 1, "Nome completo do filho é obrigatório");
        let birth_date = r.text(
            "dataNascimento",
            1,
            "Data de nascimento do filho é obrigatória",
        );

        Some(Self {
            full_name: full_name?,
            birth_date: birth_date?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilUnionForm {
    pub partner1: PartnerData,
    pub partner2: PartnerData,
    pub cohabitation_start_date: Option<String>,
    pub property_regime: Option<UnionPropertyRegime>,
    pub property_agreement_url: Option<String>,
    /// Always `true` on a validated form.
    pub joint_declaration: bool,
    pub common_children: Option<Vec<CommonChild>>,
    pub witness1: Option<WitnessData>,
    pub witness2: Option<WitnessData>,
    pub partner1_document_urls: Option<Vec<String>>,
    pub partner2_document_urls: Option<Vec<String>>,
    pub shared_residence_proof_url: Option<String>,
    pub registration_date: Option<String>,
}

impl FormSchema for CivilUnionForm {
    fn flatten_options() -> FlattenOptions {
        FlattenOptions::new()
            .absent_when_empty(OPTIONAL_LEAVES)
            .array_paths(&["filhosComuns"])
    }

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let partner1 = r.group("convivente1", PartnerData::read);
        let partner2 = r.group("convivente2", PartnerData::read);
        let cohabitation_start_date = r.optional_text("dataInicioConvivencia");
        let property_regime = r.optional_choice("regimeBens", "Regime de bens é obrigatório");
        let property_agreement_url = r.optional_text("pactoRegimeBensUrl");
        let joint_declaration = r.checkbox("declaracaoVontadeConjunta");
        if !joint_declaration {
            r.error("declaracaoVontadeConjunta", JOINT_DECLARATION_REQUIRED);
        }
        let common_children = r.optional_group_list("filhosComuns", CommonChild::read);
        let witness1 = r.optional_group("testemunha1", WitnessData::read);
        let witness2 = r.optional_group("testemunha2", WitnessData::read);
        let partner1_document_urls = r.optional_list("documentosConvivente1Urls");
        let partner2_document_urls = r.optional_list("documentosConvivente2Urls");
        let shared_residence_proof_url = r.optional_text("comprovanteResidenciaComumUrl");
        let registration_date = r.optional_text("dataRegistro");

        if !joint_declaration {
            return None;
        }

        Some(Self {
            partner1: partner1?,
            partner2: partner2?,
            cohabitation_start_date,
            property_regime,
            property_agreement_url,
            joint_declaration,
            common_children,
            witness1,
            witness2,
            partner1_document_urls,
            partner2_document_urls,
            shared_residence_proof_url,
            registration_date,
        })
    }
}
