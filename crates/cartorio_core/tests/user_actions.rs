use cartorio_core::action::{delete_user, save_user, VALIDATION_FAILED_MESSAGE};
use cartorio_core::model::user::{User, UserFilter, UserRole};
use cartorio_core::{ActionStatus, FormData, InMemoryRepository, RecordId, UserService};

fn seeded() -> UserService<InMemoryRepository<User>> {
    let mut service = UserService::new(InMemoryRepository::new());
    service.seed_demo_users().unwrap();
    service
}

fn new_user_form() -> FormData {
    FormData::new()
        .with("nomeCompleto", "Tabeliã Moraes")
        .with("email", "moraes@cartorio.dev")
        .with("perfil", "Oficial")
        .with("ativo", "on")
        .with("senha", "segredo123")
}

#[test]
fn create_stores_user_without_password() {
    let mut service = seeded();

    let result = save_user(&mut service, None, &new_user_form());

    assert_eq!(result.status, ActionStatus::Success);
    assert_eq!(result.message, "Usuário criado com sucesso!");
    let created = result.data.clone().unwrap();
    assert_eq!(created.id.prefix(), Some("user"));
    assert_eq!(created.role, UserRole::Registrar);
    assert!(created.active);
    assert!(created.last_login_at.is_none());

    let wire = serde_json::to_string(&result).unwrap();
    assert!(!wire.contains("segredo123"));
    assert_eq!(service.list_users(&UserFilter::default()).unwrap().len(), 5);
}

#[test]
fn empty_id_field_means_create() {
    let mut service = seeded();
    let form = new_user_form().with("id", "  ");

    let result = save_user(&mut service, None, &form);

    assert_eq!(result.message, "Usuário criado com sucesso!");
}

#[test]
fn id_field_updates_existing_user() {
    let mut service = seeded();
    let form = FormData::new()
        .with("id", "user-escrevente-02")
        .with("nomeCompleto", "Escrevente Pereira")
        .with("email", "pereira@cartorio.dev")
        .with("perfil", "Escrevente")
        .with("ativo", "true")
        .with("senha", "");

    let result = save_user(&mut service, None, &form);

    assert!(result.is_success(), "{:?}", result.errors);
    assert_eq!(result.message, "Usuário atualizado com sucesso!");
    let stored = service
        .get_user(&RecordId::new("user-escrevente-02"))
        .unwrap()
        .unwrap();
    assert_eq!(stored.full_name, "Escrevente Pereira");
    assert!(stored.active);
    assert_eq!(stored.role, UserRole::Clerk);
}

#[test]
fn update_of_unknown_id_fails_without_creating() {
    let mut service = seeded();
    let form = new_user_form().with("id", "user-fantasma");

    let result = save_user(&mut service, None, &form);

    assert_eq!(result.status, ActionStatus::Error);
    assert_eq!(result.message, "Falha ao atualizar usuário.");
    assert_eq!(service.list_users(&UserFilter::default()).unwrap().len(), 4);
}

#[test]
fn invalid_fields_are_reported_together() {
    let mut service = seeded();
    let form = FormData::new()
        .with("nomeCompleto", "Jo")
        .with("email", "jo@")
        .with("perfil", "Gerente")
        .with("senha", "curta");

    let result = save_user(&mut service, None, &form);

    assert_eq!(result.message, VALIDATION_FAILED_MESSAGE);
    let errors = result.errors.unwrap().by_field();
    assert_eq!(
        errors.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["email", "nomeCompleto", "perfil", "senha"]
    );
    assert_eq!(errors["senha"], vec!["Senha deve ter no mínimo 8 caracteres."]);
}

#[test]
fn delete_reports_missing_user() {
    let mut service = seeded();
    let id = RecordId::new("user-admin-01");

    let first = delete_user(&mut service, &id);
    assert!(first.is_success());
    assert_eq!(first.message, "Usuário user-admin-01 deletado com sucesso.");

    let second = delete_user(&mut service, &id);
    assert_eq!(second.status, ActionStatus::Error);
    assert_eq!(
        second.message,
        "Usuário user-admin-01 não encontrado ou já deletado."
    );
}
