//! Birth registration. Submitted with flat prefixed keys (`crianca*`, `mae*`,
//! `pai*`, `declarante*`).

use super::common::{FatherData, MotherData, ParentKeys, RecordedSex};
use crate::validation::patterns::is_time;
use crate::validation::{FieldReader, FormSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildData {
    pub full_name: String,
    pub sex: RecordedSex,
    pub birth_date: String,
    pub birth_time: Option<String>,
    pub birth_place: String,
    pub birth_municipality: String,
    pub birth_state: String,
    pub nationality: String,
}

/// Declarant when neither parent reports the birth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarantInfo {
    pub full_name: Option<String>,
    pub identification: Option<String>,
    pub relationship: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthForm {
    pub child: ChildData,
    pub mother: MotherData,
    /// `None` when no father field was filled in.
    pub father: Option<FatherData>,
    pub declarant: Option<DeclarantInfo>,
    /// Live-birth declaration (DNV) number.
    pub dnv_number: Option<String>,
}

impl FormSchema for BirthForm {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let child = read_child(r);
        let mother = MotherData::read(r, ParentKeys::BIRTH_MOTHER);
        let father = FatherData::read(r, ParentKeys::BIRTH_FATHER).filter(|father| !father.is_empty());
        let declarant = DeclarantInfo {
            full_name: r.optional_text("declaranteNomeCompleto"),
            identification: r.optional_text("declaranteDocumentoIdentificacao"),
            relationship: r.optional_text("declaranteParentescoVinculo"),
        };
        let dnv_number = r.optional_text("dnvNumero");

        Some(Self {
            child: child?,
            mother: mother?,
            father,
            declarant: (declarant != DeclarantInfo::default()).then_some(declarant),
            dnv_number,
        })
    }
}

fn read_child(r: &mut FieldReader<'_>) -> Option<ChildData> {
    let full_name = r.text("criancaNomeCompleto", 1, "Nome completo da criança é obrigatório");
    let sex = r.choice("criancaSexo", "Sexo da criança é obrigatório");
    let birth_date = r.text("criancaDataNascimento", 1, "Data de nascimento é obrigatória");
    let birth_time = r.optional_pattern(
        "criancaHoraNascimento",
        is_time,
        "Hora de nascimento inválida (HH:MM)",
    );
    let birth_place = r.text("criancaLocalNascimento", 1, "Local de nascimento é obrigatório");
    let birth_municipality = r.text(
        "criancaMunicipioNascimento",
        1,
        "Município de nascimento é obrigatório",
    );
    let birth_state = r.text_len("criancaUFNascimento", 2, "UF de nascimento deve ter 2 caracteres");
    let nationality = r.text(
        "criancaNacionalidade",
        1,
        "Nacionalidade da criança é obrigatória",
    );

    Some(ChildData {
        full_name: full_name?,
        sex: sex?,
        birth_date: birth_date?,
        birth_time,
        birth_place: birth_place?,
        birth_municipality: birth_municipality?,
        birth_state: birth_state?,
        nationality: nationality?,
    })
}
