use cartorio_core::action::{submit_registration, VALIDATION_FAILED_MESSAGE};
use cartorio_core::model::registration::common::{
    DeliveryType, MarriagePropertyRegime, MotherMaritalStatus, PriorMaritalStatus, RecordedSex,
    StillbirthSex, UnionPropertyRegime,
};
use cartorio_core::model::registration::{
    BirthForm, CivilUnionForm, DeathForm, MarriageForm, RegistrationKind, RegistrationStatus,
    StillbirthForm,
};
use cartorio_core::{parse_form, ActionStatus, FormData, InMemoryRepository, RegistrationService};

fn form(pairs: &[(&str, &str)]) -> FormData {
    pairs.iter().copied().collect()
}

fn with_prefix(prefix: &str, pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, value)| (format!("{prefix}.{key}"), value.to_string()))
        .collect()
}

fn spouse(prefix: &str, name: &str) -> Vec<(String, String)> {
    with_prefix(
        prefix,
        &[
            ("nomeCompleto", name),
            ("sexo", "Feminino"),
            ("nacionalidade", "Brasileira"),
            ("naturalidade", "São Paulo/SP"),
            ("estadoCivilAnterior", "Solteiro(a)"),
            ("profissao", "Engenheira"),
            ("idade", ""),
            ("cpf", "123.456.789-00"),
            ("rg", "12.345.678-9"),
            ("enderecoCompleto", "Rua A, 10"),
            ("nomePai", "Carlos"),
            ("nomeMae", "Maria"),
        ],
    )
}

fn witness(prefix: &str) -> Vec<(String, String)> {
    with_prefix(
        prefix,
        &[
            ("nomeCompleto", "Pedro Souza"),
            ("rg", "98.765.432-1"),
            ("cpf", "98765432100"),
            ("enderecoCompleto", "Rua B, 20"),
        ],
    )
}

fn marriage_form() -> FormData {
    let mut pairs = Vec::new();
    pairs.extend(spouse("noivo1", "Ana Lima"));
    pairs.extend(spouse("noivo2", "Bia Costa"));
    pairs.extend(witness("testemunha1"));
    pairs.extend(witness("testemunha2"));
    pairs.extend(
        [
            ("regimeBens", "Comunhão Parcial de Bens"),
            ("dataProvavelCerimonia", "2025-09-01"),
            ("dataCelebracao", "2025-09-01"),
            ("localCelebracao", "Cartório Central"),
            ("nomeCelebrante", "Dr. Oliveira"),
            ("pactoAntenupcialUrl", ""),
        ]
        .map(|(key, value)| (key.to_string(), value.to_string())),
    );
    pairs.into_iter().collect()
}

fn birth_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("criancaNomeCompleto", "Lucas Pereira"),
        ("criancaSexo", "Masculino"),
        ("criancaDataNascimento", "2025-06-10"),
        ("criancaHoraNascimento", "08:45"),
        ("criancaLocalNascimento", "Hospital Santa Luzia"),
        ("criancaMunicipioNascimento", "Campinas"),
        ("criancaUFNascimento", "SP"),
        ("criancaNacionalidade", "Brasileira"),
        ("maeNomeCompleto", "Joana Pereira"),
        ("maeIdadeEpocaNascimento", "29"),
        ("maeEstadoCivil", "Casada"),
    ]
}

fn death_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("falecido.nomeCompleto", "José Almeida"),
        ("falecido.nacionalidade", "Brasileira"),
        ("falecido.naturalidade", "Recife/PE"),
        ("falecido.cpf", ""),
        ("falecido.dataNascimento", ""),
        ("dataObito", "2025-05-02"),
        ("horaObito", ""),
        ("localObito", "Hospital Geral"),
        ("municipioObito", "Recife"),
        ("ufObito", "PE"),
        ("causaMorteAtestadoMedico", "Parada cardiorrespiratória"),
        ("declarante.nomeCompleto", "Marta Almeida"),
        ("declarante.vinculoComFalecido", "Filha"),
    ]
}

fn stillbirth_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("natimorto.sexo", "Indeterminado"),
        ("natimorto.dataEvento", "2025-04-03"),
        ("natimorto.localOcorrencia", "Maternidade Municipal"),
        ("natimorto.municipioOcorrencia", "Curitiba"),
        ("natimorto.ufOcorrencia", "PR"),
        ("natimorto.tempoGestacaoSemanas", "32"),
        ("natimorto.pesoAoNascerGramas", "abc"),
        ("natimorto.tipoParto", "Cesáreo"),
        ("mae.nomeCompleto", "Clara Nunes"),
        ("mae.idadeEpocaParto", ""),
        ("pai.nomeCompleto", ""),
        ("declarante.nomeCompleto", "Clara Nunes"),
        ("declarante.vinculoComNatimortoOuPais", "Mãe"),
    ]
}

fn civil_union_form() -> Vec<(String, String)> {
    let partner = |prefix: &str, name: &str| {
        with_prefix(
            prefix,
            &[
                ("nomeCompleto", name),
                ("nacionalidade", "Brasileira"),
                ("profissao", "Professora"),
                ("estadoCivil", "Divorciado(a)"),
                ("cpf", "11122233344"),
                ("rg", "11.222.333-4"),
                ("enderecoCompleto", "Rua C, 30"),
                ("dataNascimento", "1990-01-01"),
                ("nomePai", ""),
            ],
        )
    };
    let mut pairs = Vec::new();
    pairs.extend(partner("convivente1", "Rita Gomes"));
    pairs.extend(partner("convivente2", "Lia Prado"));
    pairs.extend(
        [
            ("declaracaoVontadeConjunta", "on"),
            ("regimeBens", "Separação Total de Bens"),
            ("filhosComuns[0].nomeCompleto", ""),
            ("filhosComuns[0].dataNascimento", ""),
            ("filhosComuns[1].nomeCompleto", "Davi Gomes"),
            ("filhosComuns[1].dataNascimento", "2015-03-03"),
            ("documentosConvivente1Urls[]", "rg-rita.pdf"),
            ("documentosConvivente1Urls[]", " "),
            ("testemunha1.nomeCompleto", ""),
            ("dataRegistro", ""),
        ]
        .map(|(key, value)| (key.to_string(), value.to_string())),
    );
    pairs
}

#[test]
fn marriage_submission_is_stored_under_review() {
    let mut service = RegistrationService::<MarriageForm, _>::new(InMemoryRepository::new());

    let result = submit_registration(&mut service, None, &marriage_form());

    assert_eq!(result.status, ActionStatus::Success);
    assert_eq!(result.message, MarriageForm::CREATED_MESSAGE);
    let stored = result.data.unwrap();
    assert!(stored.id.as_str().starts_with("cas-"));
    assert_eq!(stored.status, RegistrationStatus::UnderReview);
    assert_eq!(stored.data.spouse1.full_name, "Ana Lima");
    assert_eq!(stored.data.spouse1.age, None);
    assert_eq!(stored.data.spouse2.prior_marital_status, PriorMaritalStatus::Single);
    assert_eq!(
        stored.data.property_regime,
        MarriagePropertyRegime::PartialCommunity
    );
    assert_eq!(stored.data.prenuptial_agreement_url, None);
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn marriage_errors_carry_nested_paths() {
    let mut pairs: Vec<(String, String)> = marriage_form()
        .entries()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    for (key, value) in &mut pairs {
        match key.as_str() {
            "noivo2.cpf" => *value = "123".to_string(),
            "noivo1.idade" => *value = "-3".to_string(),
            "regimeBens" => *value = "Qualquer".to_string(),
            _ => {}
        }
    }
    pairs.retain(|(key, _)| !key.starts_with("testemunha2."));
    let submission: FormData = pairs.into_iter().collect();

    let errors = parse_form::<MarriageForm>(&submission).unwrap_err();

    assert_eq!(errors.messages_for("noivo2.cpf"), vec!["CPF inválido"]);
    assert_eq!(errors.messages_for("noivo1.idade"), vec!["Idade deve ser positiva"]);
    assert_eq!(errors.messages_for("regimeBens"), vec!["Regime de bens é obrigatório"]);
    assert_eq!(
        errors.messages_for("testemunha2.nomeCompleto"),
        vec!["Nome completo da testemunha é obrigatório"]
    );
    assert_eq!(
        errors.messages_for("testemunha2.cpf"),
        vec!["CPF da testemunha inválido"]
    );
}

#[test]
fn invalid_submission_is_not_stored() {
    let mut service = RegistrationService::<MarriageForm, _>::new(InMemoryRepository::new());

    let result = submit_registration(&mut service, None, &FormData::new());

    assert_eq!(result.status, ActionStatus::Error);
    assert_eq!(result.message, VALIDATION_FAILED_MESSAGE);
    assert!(result.data.is_none());
    assert!(!result.errors.unwrap().is_empty());
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn birth_without_father_or_declarant_leaves_them_absent() {
    let parsed = parse_form::<BirthForm>(&form(&birth_form())).unwrap();

    assert_eq!(parsed.child.sex, RecordedSex::Male);
    assert_eq!(parsed.child.birth_time.as_deref(), Some("08:45"));
    assert_eq!(parsed.mother.age, Some(29));
    assert_eq!(parsed.mother.marital_status, Some(MotherMaritalStatus::Married));
    assert!(parsed.father.is_none());
    assert!(parsed.declarant.is_none());
}

#[test]
fn birth_keeps_father_when_any_field_is_filled() {
    let mut pairs = birth_form();
    pairs.push(("paiNomeCompleto", "Rafael Pereira"));
    pairs.push(("declaranteNomeCompleto", "Avó Materna"));

    let parsed = parse_form::<BirthForm>(&form(&pairs)).unwrap();

    assert_eq!(
        parsed.father.unwrap().full_name.as_deref(),
        Some("Rafael Pereira")
    );
    assert_eq!(
        parsed.declarant.unwrap().full_name.as_deref(),
        Some("Avó Materna")
    );
}

#[test]
fn birth_rejects_long_state_and_bad_time() {
    let mut pairs = birth_form();
    pairs.retain(|(key, _)| *key != "criancaUFNascimento" && *key != "criancaHoraNascimento");
    pairs.push(("criancaUFNascimento", "São Paulo"));
    pairs.push(("criancaHoraNascimento", "25:00"));
    pairs.push(("maeCPF", "000"));

    let errors = parse_form::<BirthForm>(&form(&pairs)).unwrap_err();

    assert_eq!(
        errors.messages_for("criancaUFNascimento"),
        vec!["UF de nascimento deve ter 2 caracteres"]
    );
    assert_eq!(
        errors.messages_for("criancaHoraNascimento"),
        vec!["Hora de nascimento inválida (HH:MM)"]
    );
    assert_eq!(errors.messages_for("maeCPF"), vec!["CPF da mãe inválido"]);
}

#[test]
fn death_treats_blank_optional_fields_as_absent() {
    let mut service = RegistrationService::<DeathForm, _>::new(InMemoryRepository::new());

    let result = submit_registration(&mut service, None, &form(&death_form()));

    assert!(result.is_success(), "{:?}", result.errors);
    let stored = result.data.unwrap();
    assert!(stored.id.as_str().starts_with("obito-"));
    assert_eq!(stored.status, RegistrationStatus::Registered);
    assert_eq!(stored.data.deceased.cpf, None);
    assert_eq!(stored.data.death_time, None);
    assert!(!stored.data.cremation);
    assert_eq!(stored.data.declarant.relationship, "Filha");
}

#[test]
fn death_requires_declarant_relationship() {
    let mut pairs = death_form();
    pairs.retain(|(key, _)| *key != "declarante.vinculoComFalecido");
    pairs.push(("seraCreimado", "on"));

    let errors = parse_form::<DeathForm>(&form(&pairs)).unwrap_err();

    assert_eq!(
        errors.messages_for("declarante.vinculoComFalecido"),
        vec!["Vínculo com o falecido é obrigatório"]
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn stillbirth_drops_non_numeric_measurements() {
    let parsed = parse_form::<StillbirthForm>(&form(&stillbirth_form())).unwrap();

    assert_eq!(parsed.stillbirth.sex, StillbirthSex::Indeterminate);
    assert_eq!(parsed.stillbirth.gestation_weeks, Some(32));
    assert_eq!(parsed.stillbirth.birth_weight_grams, None);
    assert_eq!(parsed.stillbirth.delivery_type, Some(DeliveryType::Cesarean));
    assert_eq!(parsed.stillbirth.full_name, None);
    assert_eq!(parsed.mother.age, None);
    assert!(parsed.father.is_none());
}

#[test]
fn stillbirth_rejects_non_positive_and_fractional_numbers() {
    let mut pairs = stillbirth_form();
    pairs.retain(|(key, _)| {
        *key != "natimorto.pesoAoNascerGramas" && *key != "natimorto.tempoGestacaoSemanas"
    });
    pairs.push(("natimorto.pesoAoNascerGramas", "-5"));
    pairs.push(("natimorto.tempoGestacaoSemanas", "32.5"));

    let errors = parse_form::<StillbirthForm>(&form(&pairs)).unwrap_err();

    assert_eq!(
        errors.messages_for("natimorto.pesoAoNascerGramas"),
        vec!["Peso deve ser positivo"]
    );
    assert_eq!(
        errors.messages_for("natimorto.tempoGestacaoSemanas"),
        vec!["Tempo de gestação deve ser um número"]
    );
}

#[test]
fn civil_union_drops_blank_children_witnesses_and_documents() {
    let submission: FormData = civil_union_form().into_iter().collect();
    let mut service = RegistrationService::<CivilUnionForm, _>::new(InMemoryRepository::new());

    let result = submit_registration(&mut service, None, &submission);

    assert!(result.is_success(), "{:?}", result.errors);
    let stored = result.data.unwrap();
    assert!(stored.id.as_str().starts_with("uniao-"));
    assert_eq!(stored.status, RegistrationStatus::Registered);

    let data = stored.data;
    assert_eq!(data.property_regime, Some(UnionPropertyRegime::TotalSeparation));
    let children = data.common_children.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].full_name, "Davi Gomes");
    assert!(data.witness1.is_none());
    assert_eq!(
        data.partner1_document_urls,
        Some(vec!["rg-rita.pdf".to_string()])
    );
    assert_eq!(data.partner2_document_urls, None);
    assert_eq!(data.partner1.father_name, None);
    assert_eq!(data.registration_date, None);
}

#[test]
fn civil_union_requires_joint_declaration() {
    let mut pairs = civil_union_form();
    pairs.retain(|(key, _)| key != "declaracaoVontadeConjunta");
    pairs.push(("filhosComuns[2].nomeCompleto".to_string(), "Eva".to_string()));
    let submission: FormData = pairs.into_iter().collect();

    let errors = parse_form::<CivilUnionForm>(&submission).unwrap_err();

    assert_eq!(
        errors.messages_for("declaracaoVontadeConjunta"),
        vec!["A declaração de vontade conjunta de constituir união estável é obrigatória."]
    );
    assert_eq!(
        errors.messages_for("filhosComuns.1.dataNascimento"),
        vec!["Data de nascimento do filho é obrigatória"]
    );
}
