use super::{note_resubmission, ActionResult};
use crate::form::FormData;
use crate::model::id::RecordId;
use crate::model::user::{User, UserForm, UserPatch};
use crate::repo::RecordRepository;
use crate::service::UserService;
use crate::validation::parse_form;
use log::{error, warn};

/// Creates a user, or updates one when the submission carries a non-empty `id`.
///
/// An empty `senha` on update leaves the password untouched.
pub fn save_user<R: RecordRepository<User>>(
    service: &mut UserService<R>,
    previous: Option<&ActionResult<User>>,
    form: &FormData,
) -> ActionResult<User> {
    note_resubmission("user_save", previous);

    let id = form
        .get("id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(RecordId::from);
    let mode = if id.is_some() { "update" } else { "create" };

    let parsed = match parse_form::<UserForm>(form) {
        Ok(parsed) => parsed,
        Err(errors) => {
            warn!(
                "event=user_save module=action status=invalid mode={mode} error_count={}",
                errors.len()
            );
            return ActionResult::invalid(errors);
        }
    };

    let outcome = match &id {
        Some(id) => service
            .update_user(id, UserPatch::from(parsed))
            .map(|user| user.map(|user| ("Usuário atualizado com sucesso!", user))),
        None => service
            .create_user(parsed)
            .map(|user| Some(("Usuário criado com sucesso!", user))),
    };

    match outcome {
        Ok(Some((message, user))) => ActionResult::success(message, user),
        Ok(None) => ActionResult::error(match id {
            Some(_) => "Falha ao atualizar usuário.",
            None => "Falha ao criar usuário.",
        }),
        Err(err) => {
            error!("event=user_save module=action status=error mode={mode} error={err}");
            ActionResult::error(match id {
                Some(_) => "Ocorreu um erro ao processar a atualização do usuário.",
                None => "Ocorreu um erro ao processar a criação do usuário.",
            })
        }
    }
}

pub fn delete_user<R: RecordRepository<User>>(
    service: &mut UserService<R>,
    id: &RecordId,
) -> ActionResult<()> {
    match service.delete_user(id) {
        Ok(true) => ActionResult::success(format!("Usuário {id} deletado com sucesso."), ()),
        Ok(false) => ActionResult::error(format!("Usuário {id} não encontrado ou já deletado.")),
        Err(err) => {
            error!("event=user_delete module=action status=error user_id={id} error={err}");
            ActionResult::error("Erro ao deletar usuário.")
        }
    }
}
