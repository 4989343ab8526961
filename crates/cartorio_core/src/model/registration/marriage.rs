//! Marriage registration (habilitação and celebração).

use super::common::{MarriagePropertyRegime, PriorMaritalStatus, Sex, WitnessData};
use crate::form::FlattenOptions;
use crate::validation::patterns::is_cpf;
use crate::validation::{FieldReader, FormSchema};
use serde::{Deserialize, Serialize};

/// One party to the marriage (`noivo1` / `noivo2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseData {
    pub full_name: String,
    pub sex: Option<Sex>,
    pub nationality: String,
    pub birthplace: String,
    pub prior_marital_status: PriorMaritalStatus,
    pub profession: String,
    pub age: Option<u32>,
    pub cpf: String,
    pub rg: String,
    pub address: String,
    pub father_name: String,
    pub mother_name: String,
    pub identification_document_url: Option<String>,
    pub birth_or_marriage_certificate_url: Option<String>,
}

impl SpouseData {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let full_name = r.text("nomeCompleto", 1, "Nome completo é obrigatório");
        let sex = r.optional_choice("sexo", "Sexo é obrigatório");
        let nationality = r.text("nacionalidade", 1, "Nacionalidade é obrigatória");
        let birthplace = r.text("naturalidade", 1, "Naturalidade (Cidade/UF) é obrigatória");
        let prior_marital_status =
            r.choice("estadoCivilAnterior", "Estado civil anterior é obrigatório");
        let profession = r.text("profissao", 1, "Profissão é obrigatória");
        let age = r.optional_positive_int("idade", "Idade deve ser um número", "Idade deve ser positiva");
        let cpf = r.pattern("cpf", is_cpf, "CPF inválido");
        let rg = r.text("rg", 1, "RG é obrigatório");
        let address = r.text("enderecoCompleto", 1, "Endereço completo é obrigatório");
        let father_name = r.text("nomePai", 1, "Nome do pai é obrigatório");
        let mother_name = r.text("nomeMae", 1, "Nome da mãe é obrigatório");
        let identification_document_url = r.optional_text("documentoIdentificacaoUrl");
        let birth_or_marriage_certificate_url = r.optional_text("certidaoNascimentoCasamentoUrl");

        Some(Self {
            full_name: full_name?,
            sex,
            nationality: nationality?,
            birthplace: birthplace?,
            prior_marital_status: prior_marital_status?,
            profession: profession?,
            age,
            cpf: cpf?,
            rg: rg?,
            address: address?,
            father_name: father_name?,
            mother_name: mother_name?,
            identification_document_url,
            birth_or_marriage_certificate_url,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageForm {
    pub spouse1: SpouseData,
    pub spouse2: SpouseData,
    pub witness1: WitnessData,
    pub witness2: WitnessData,
    pub property_regime: MarriagePropertyRegime,
    pub prenuptial_agreement_url: Option<String>,
    pub expected_ceremony_date: String,
    pub celebration_date: String,
    pub celebration_place: String,
    pub celebrant_name: String,
    pub ceremony_witness1_name: Option<String>,
    pub ceremony_witness2_name: Option<String>,
    pub spouse1_adopted_name: Option<String>,
    pub spouse2_adopted_name: Option<String>,
    pub residence_proof_url: Option<String>,
}

impl FormSchema for MarriageForm {
    fn flatten_options() -> FlattenOptions {
        FlattenOptions::new().absent_when_empty(&["idade"])
    }

    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let spouse1 = r.group("noivo1", SpouseData::read);
        let spouse2 = r.group("noivo2", SpouseData::read);
        let witness1 = r.group("testemunha1", WitnessData::read);
        let witness2 = r.group("testemunha2", WitnessData::read);
        let property_regime = r.choice("regimeBens", "Regime de bens é obrigatório");
        let prenuptial_agreement_url = r.optional_text("pactoAntenupcialUrl");
        let expected_ceremony_date = r.text(
            "dataProvavelCerimonia",
            1,
            "Data provável da cerimônia é obrigatória",
        );
        let celebration_date = r.text("dataCelebracao", 1, "Data da celebração é obrigatória");
        let celebration_place = r.text("localCelebracao", 1, "Local da celebração é obrigatório");
        let celebrant_name = r.text("nomeCelebrante", 1, "Nome do celebrante é obrigatório");
        let ceremony_witness1_name = r.optional_text("testemunhaCerimonia1Nome");
        let ceremony_witness2_name = r.optional_text("testemunhaCerimonia2Nome");
        let spouse1_adopted_name = r.optional_text("nomeAdotadoNoivo1");
        let spouse2_adopted_name = r.optional_text("nomeAdotadoNoivo2");
        let residence_proof_url = r.optional_text("comprovanteResidenciaNoivosUrl");

        Some(Self {
            spouse1: spouse1?,
            spouse2: spouse2?,
            witness1: witness1?,
            witness2: witness2?,
            property_regime: property_regime?,
            prenuptial_agreement_url,
            expected_ceremony_date: expected_ceremony_date?,
            celebration_date: celebration_date?,
            celebration_place: celebration_place?,
            celebrant_name: celebrant_name?,
            ceremony_witness1_name,
            ceremony_witness2_name,
            spouse1_adopted_name,
            spouse2_adopted_name,
            residence_proof_url,
        })
    }
}
