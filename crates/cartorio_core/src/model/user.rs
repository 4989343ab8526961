//! Back-office user accounts.
//!
//! # Invariants
//! - Passwords are validated on submission but never stored on `User`.
//! - `role` is one of the three fixed office roles.

use crate::model::id::RecordId;
use crate::model::Record;
use crate::validation::patterns::is_email;
use crate::validation::{FieldReader, FormSchema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub const USER_ID_PREFIX: &str = "user";

/// Office role, submitted and serialized with its Portuguese title.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum UserRole {
    #[serde(rename = "Escrevente")]
    #[strum(serialize = "Escrevente")]
    Clerk,
    #[serde(rename = "Oficial")]
    #[strum(serialize = "Oficial")]
    Registrar,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn from_form(id: RecordId, form: UserForm, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: form.full_name,
            email: form.email,
            role: form.role,
            active: form.active,
            created_at,
            last_login_at: None,
        }
    }

    /// Applies the provided fields; returns whether a password change was requested.
    pub fn apply(&mut self, patch: UserPatch) -> bool {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        patch.password.is_some()
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Validated user submission (`nomeCompleto`, `email`, `perfil`, `ativo`, `senha`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    pub password: Option<String>,
}

impl FormSchema for UserForm {
    fn read(r: &mut FieldReader<'_>) -> Option<Self> {
        let full_name = r.text(
            "nomeCompleto",
            3,
            "Nome completo é obrigatório (mínimo 3 caracteres).",
        );
        let email = r.pattern("email", is_email, "Email inválido.");
        let role = r.choice("perfil", "Perfil de usuário inválido.");
        let active = r.checkbox("ativo");
        let password = r.optional_text_min("senha", 8, "Senha deve ter no mínimo 8 caracteres.");

        Some(Self {
            full_name: full_name?,
            email: email?,
            role: role?,
            active,
            password,
        })
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
    pub password: Option<String>,
}

impl From<UserForm> for UserPatch {
    fn from(form: UserForm) -> Self {
        Self {
            full_name: Some(form.full_name),
            email: Some(form.email),
            role: Some(form.role),
            active: Some(form.active),
            password: form.password,
        }
    }
}

/// List filter; every set field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of the full name.
    pub name_contains: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|role| role != user.role) {
            return false;
        }
        if self.active.is_some_and(|active| active != user.active) {
            return false;
        }
        match self.name_contains.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => user
                .full_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}
