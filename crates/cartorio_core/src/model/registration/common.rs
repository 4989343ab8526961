//! Closed value sets and person groups shared by several registrations.

use crate::validation::patterns::is_cpf;
use crate::validation::FieldReader;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Sex of a marriage party.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum Sex {
    #[serde(rename = "Masculino")]
    #[strum(serialize = "Masculino")]
    Male,
    #[serde(rename = "Feminino")]
    #[strum(serialize = "Feminino")]
    Female,
    #[serde(rename = "Outro")]
    #[strum(serialize = "Outro")]
    Other,
    #[serde(rename = "Não informado")]
    #[strum(serialize = "Não informado")]
    NotInformed,
}

/// Sex as recorded on birth and death certificates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum RecordedSex {
    #[serde(rename = "Masculino")]
    #[strum(serialize = "Masculino")]
    Male,
    #[serde(rename = "Feminino")]
    #[strum(serialize = "Feminino")]
    Female,
    #[serde(rename = "Ignorado")]
    #[strum(serialize = "Ignorado")]
    Unknown,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum StillbirthSex {
    #[serde(rename = "Masculino")]
    #[strum(serialize = "Masculino")]
    Male,
    #[serde(rename = "Feminino")]
    #[strum(serialize = "Feminino")]
    Female,
    #[serde(rename = "Ignorado")]
    #[strum(serialize = "Ignorado")]
    Unknown,
    #[serde(rename = "Indeterminado")]
    #[strum(serialize = "Indeterminado")]
    Indeterminate,
}

/// Marital status of a spouse before the marriage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum PriorMaritalStatus {
    #[serde(rename = "Solteiro(a)")]
    #[strum(serialize = "Solteiro(a)")]
    Single,
    #[serde(rename = "Divorciado(a)")]
    #[strum(serialize = "Divorciado(a)")]
    Divorced,
    #[serde(rename = "Viúvo(a)")]
    #[strum(serialize = "Viúvo(a)")]
    Widowed,
    #[serde(rename = "Não informado")]
    #[strum(serialize = "Não informado")]
    NotInformed,
}

/// Marital status of a deceased person.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum MaritalStatus {
    #[serde(rename = "Solteiro(a)")]
    #[strum(serialize = "Solteiro(a)")]
    Single,
    #[serde(rename = "Casado(a)")]
    #[strum(serialize = "Casado(a)")]
    Married,
    #[serde(rename = "Divorciado(a)")]
    #[strum(serialize = "Divorciado(a)")]
    Divorced,
    #[serde(rename = "Viúvo(a)")]
    #[strum(serialize = "Viúvo(a)")]
    Widowed,
    #[serde(rename = "União Estável")]
    #[strum(serialize = "União Estável")]
    CivilUnion,
    #[serde(rename = "Não informado")]
    #[strum(serialize = "Não informado")]
    NotInformed,
}

/// Marital status of a civil-union partner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum PartnerMaritalStatus {
    #[serde(rename = "Solteiro(a)")]
    #[strum(serialize = "Solteiro(a)")]
    Single,
    #[serde(rename = "Divorciado(a)")]
    #[strum(serialize = "Divorciado(a)")]
    Divorced,
    #[serde(rename = "Viúvo(a)")]
    #[strum(serialize = "Viúvo(a)")]
    Widowed,
    #[serde(rename = "Casado(a)")]
    #[strum(serialize = "Casado(a)")]
    Married,
    #[serde(rename = "Separado(a) Judicialmente")]
    #[strum(serialize = "Separado(a) Judicialmente")]
    JudiciallySeparated,
    #[serde(rename = "Não informado")]
    #[strum(serialize = "Não informado")]
    NotInformed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum MotherMaritalStatus {
    #[serde(rename = "Solteira")]
    #[strum(serialize = "Solteira")]
    Single,
    #[serde(rename = "Casada")]
    #[strum(serialize = "Casada")]
    Married,
    #[serde(rename = "Divorciada")]
    #[strum(serialize = "Divorciada")]
    Divorced,
    #[serde(rename = "Viúva")]
    #[strum(serialize = "Viúva")]
    Widowed,
    #[serde(rename = "União Estável")]
    #[strum(serialize = "União Estável")]
    CivilUnion,
    #[serde(rename = "Não informado")]
    #[strum(serialize = "Não informado")]
    NotInformed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum FatherMaritalStatus {
    #[serde(rename = "Solteiro")]
    #[strum(serialize = "Solteiro")]
    Single,
    #[serde(rename = "Casado")]
    #[strum(serialize = "Casado")]
    Married,
    #[serde(rename = "Divorciado")]
    #[strum(serialize = "Divorciado")]
    Divorced,
    #[serde(rename = "Viúvo")]
    #[strum(serialize = "Viúvo")]
    Widowed,
    #[serde(rename = "União Estável")]
    #[strum(serialize = "União Estável")]
    CivilUnion,
    #[serde(rename = "Não informado")]
    #[strum(serialize = "Não informado")]
    NotInformed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum MarriagePropertyRegime {
    #[serde(rename = "Comunhão Parcial de Bens")]
    #[strum(serialize = "Comunhão Parcial de Bens")]
    PartialCommunity,
    #[serde(rename = "Comunhão Universal de Bens")]
    #[strum(serialize = "Comunhão Universal de Bens")]
    UniversalCommunity,
    #[serde(rename = "Separação Total de Bens")]
    #[strum(serialize = "Separação Total de Bens")]
    TotalSeparation,
    #[serde(rename = "Participação Final nos Aquestos")]
    #[strum(serialize = "Participação Final nos Aquestos")]
    FinalParticipation,
    #[serde(rename = "Separação Obrigatória de Bens")]
    #[strum(serialize = "Separação Obrigatória de Bens")]
    MandatorySeparation,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum UnionPropertyRegime {
    #[serde(rename = "Comunhão Parcial de Bens")]
    #[strum(serialize = "Comunhão Parcial de Bens")]
    PartialCommunity,
    #[serde(rename = "Comunhão Universal de Bens")]
    #[strum(serialize = "Comunhão Universal de Bens")]
    UniversalCommunity,
    #[serde(rename = "Separação Total de Bens")]
    #[strum(serialize = "Separação Total de Bens")]
    TotalSeparation,
    #[serde(rename = "Participação Final nos Aquestos")]
    #[strum(serialize = "Participação Final nos Aquestos")]
    FinalParticipation,
    #[serde(rename = "Não especificado")]
    #[strum(serialize = "Não especificado")]
    Unspecified,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum DeliveryType {
    #[serde(rename = "Normal")]
    #[strum(serialize = "Normal")]
    Vaginal,
    #[serde(rename = "Cesáreo")]
    #[strum(serialize = "Cesáreo")]
    Cesarean,
    #[serde(rename = "Fórceps")]
    #[strum(serialize = "Fórceps")]
    Forceps,
    #[serde(rename = "Ignorado")]
    #[strum(serialize = "Ignorado")]
    Unknown,
}

/// Witness to a marriage or civil union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessData {
    pub full_name: String,
    pub rg: String,
    pub cpf: String,
    pub address: String,
    pub profession: Option<String>,
}

impl WitnessData {
    pub fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let full_name = r.text("nomeCompleto", 1, "Nome completo da testemunha é obrigatório");
        let rg = r.text("rg", 1, "RG da testemunha é obrigatório");
        let cpf = r.pattern("cpf", is_cpf, "CPF da testemunha inválido");
        let address = r.text("enderecoCompleto", 1, "Endereço da testemunha é obrigatório");
        let profession = r.optional_text("profissao");

        Some(Self {
            full_name: full_name?,
            rg: rg?,
            cpf: cpf?,
            address: address?,
            profession,
        })
    }
}

/// Person formally reporting a death or stillbirth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarantData {
    pub full_name: String,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub relationship: String,
    pub address: Option<String>,
}

impl DeclarantData {
    /// Reads a declarant whose relationship lives under `relationship_key`.
    pub fn read(
        r: &mut FieldReader<'_>,
        relationship_key: &str,
        relationship_message: &str,
    ) -> Option<Self> {
        let full_name = r.text("nomeCompleto", 1, "Nome completo do declarante é obrigatório");
        let cpf = r.optional_pattern("cpf", is_cpf, "CPF do declarante inválido");
        let rg = r.optional_text("rg");
        let relationship = r.text(relationship_key, 1, relationship_message);
        let address = r.optional_text("enderecoCompleto");

        Some(Self {
            full_name: full_name?,
            cpf,
            rg,
            relationship: relationship?,
            address,
        })
    }
}

/// Form keys of one parent group.
///
/// Birth submissions use flat prefixed keys (`maeNomeCompleto`); stillbirth
/// submissions nest the same fields under `mae.` and `pai.`.
#[derive(Debug, Clone, Copy)]
pub struct ParentKeys {
    pub full_name: &'static str,
    pub birthplace: &'static str,
    pub nationality: &'static str,
    pub profession: &'static str,
    pub age: &'static str,
    pub cpf: &'static str,
    pub rg: &'static str,
    pub address: &'static str,
    pub marital_status: &'static str,
}

impl ParentKeys {
    pub const BIRTH_MOTHER: Self = Self {
        full_name: "maeNomeCompleto",
        birthplace: "maeNaturalidade",
        nationality: "maeNacionalidade",
        profession: "maeProfissao",
        age: "maeIdadeEpocaNascimento",
        cpf: "maeCPF",
        rg: "maeRG",
        address: "maeEnderecoCompleto",
        marital_status: "maeEstadoCivil",
    };

    pub const BIRTH_FATHER: Self = Self {
        full_name: "paiNomeCompleto",
        birthplace: "paiNaturalidade",
        nationality: "paiNacionalidade",
        profession: "paiProfissao",
        age: "paiIdadeEpocaNascimento",
        cpf: "paiCPF",
        rg: "paiRG",
        address: "paiEnderecoCompleto",
        marital_status: "paiEstadoCivil",
    };

    pub const NESTED: Self = Self {
        full_name: "nomeCompleto",
        birthplace: "naturalidade",
        nationality: "nacionalidade",
        profession: "profissao",
        age: "idadeEpocaParto",
        cpf: "cpf",
        rg: "rg",
        address: "enderecoCompleto",
        marital_status: "estadoCivil",
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotherData {
    pub full_name: String,
    pub birthplace: Option<String>,
    pub nationality: Option<String>,
    pub profession: Option<String>,
    pub age: Option<u32>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub address: Option<String>,
    pub marital_status: Option<MotherMaritalStatus>,
}

impl MotherData {
    pub fn read(r: &mut FieldReader<'_>, keys: ParentKeys) -> Option<Self> {
        let full_name = r.text(keys.full_name, 1, "Nome completo da mãe é obrigatório");
        let birthplace = r.optional_text(keys.birthplace);
        let nationality = r.optional_text(keys.nationality);
        let profession = r.optional_text(keys.profession);
        let age = r.optional_positive_int(
            keys.age,
            "Idade da mãe deve ser um número",
            "Idade da mãe deve ser positiva",
        );
        let cpf = r.optional_pattern(keys.cpf, is_cpf, "CPF da mãe inválido");
        let rg = r.optional_text(keys.rg);
        let address = r.optional_text(keys.address);
        let marital_status = r.optional_choice(keys.marital_status, "Estado civil da mãe inválido");

        Some(Self {
            full_name: full_name?,
            birthplace,
            nationality,
            profession,
            age,
            cpf,
            rg,
            address,
            marital_status,
        })
    }
}

/// Father data; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatherData {
    pub full_name: Option<String>,
    pub birthplace: Option<String>,
    pub nationality: Option<String>,
    pub profession: Option<String>,
    pub age: Option<u32>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub address: Option<String>,
    pub marital_status: Option<FatherMaritalStatus>,
}

impl FatherData {
    pub fn read(r: &mut FieldReader<'_>, keys: ParentKeys) -> Option<Self> {
        Some(Self {
            full_name: r.optional_text(keys.full_name),
            birthplace: r.optional_text(keys.birthplace),
            nationality: r.optional_text(keys.nationality),
            profession: r.optional_text(keys.profession),
            age: r.optional_positive_int(
                keys.age,
                "Idade do pai deve ser um número",
                "Idade do pai deve ser positiva",
            ),
            cpf: r.optional_pattern(keys.cpf, is_cpf, "CPF do pai inválido"),
            rg: r.optional_text(keys.rg),
            address: r.optional_text(keys.address),
            marital_status: r.optional_choice(keys.marital_status, "Estado civil do pai inválido"),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
