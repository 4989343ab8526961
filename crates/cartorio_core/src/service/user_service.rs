//! User administration service.
//!
//! # Invariants
//! - `list_users` is sorted by full name (case-insensitive), then id.
//! - Password values are never stored or logged.

use crate::model::id::RecordId;
use crate::model::user::{User, UserFilter, UserForm, UserPatch, UserRole, USER_ID_PREFIX};
use crate::repo::RecordRepository;
use crate::service::ServiceResult;
use chrono::{DateTime, Duration, Utc};
use log::info;

pub struct UserService<R: RecordRepository<User>> {
    repo: R,
}

impl<R: RecordRepository<User>> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn list_users(&self, filter: &UserFilter) -> ServiceResult<Vec<User>> {
        let mut users: Vec<User> = self
            .repo
            .list()?
            .into_iter()
            .filter(|user| filter.matches(user))
            .collect();
        users.sort_by_cached_key(|user| (user.full_name.to_lowercase(), user.id.clone()));
        Ok(users)
    }

    pub fn get_user(&self, id: &RecordId) -> ServiceResult<Option<User>> {
        Ok(self.repo.get(id)?)
    }

    pub fn create_user(&mut self, form: UserForm) -> ServiceResult<User> {
        let user = User::from_form(RecordId::generate(USER_ID_PREFIX), form, Utc::now());
        let user = self.repo.insert(user)?;
        info!(
            "event=user_create module=service status=ok user_id={} role={}",
            user.id, user.role
        );
        Ok(user)
    }

    /// Applies only the provided fields. Returns `None` for an unknown id.
    pub fn update_user(&mut self, id: &RecordId, patch: UserPatch) -> ServiceResult<Option<User>> {
        let Some(mut user) = self.repo.get(id)? else {
            return Ok(None);
        };

        if user.apply(patch) {
            info!("event=user_password_change module=service status=accepted user_id={id}");
        }
        let user = self.repo.replace(user)?;
        info!("event=user_update module=service status=ok user_id={id}");
        Ok(Some(user))
    }

    pub fn delete_user(&mut self, id: &RecordId) -> ServiceResult<bool> {
        let deleted = self.repo.delete(id)?;
        if deleted {
            info!("event=user_delete module=service status=ok user_id={id}");
        }
        Ok(deleted)
    }

    /// Stamps the last-login time. Returns `None` for an unknown id.
    pub fn record_login(&mut self, id: &RecordId, at: DateTime<Utc>) -> ServiceResult<Option<User>> {
        let Some(mut user) = self.repo.get(id)? else {
            return Ok(None);
        };
        user.last_login_at = Some(at);
        Ok(Some(self.repo.replace(user)?))
    }

    /// Inserts the demo accounts when the store is empty; returns how many were added.
    pub fn seed_demo_users(&mut self) -> ServiceResult<usize> {
        if !self.repo.list()?.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let demo = demo_users(now);
        let count = demo.len();
        for user in demo {
            self.repo.insert(user)?;
        }
        info!("event=seed_users module=service status=ok count={count}");
        Ok(count)
    }
}

fn demo_users(now: DateTime<Utc>) -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, role, active, age: Duration, login: Option<Duration>| User {
        id: RecordId::new(id),
        full_name: name.to_string(),
        email: email.to_string(),
        role,
        active,
        created_at: now - age,
        last_login_at: login.map(|ago| now - ago),
    };

    vec![
        user(
            "user-admin-01",
            "Administrador Master",
            "admin@cartorio.dev",
            UserRole::Admin,
            true,
            Duration::days(30),
            Some(Duration::hours(2)),
        ),
        user(
            "user-oficial-01",
            "Oficial Registrador Silva",
            "oficial.silva@cartorio.dev",
            UserRole::Registrar,
            true,
            Duration::days(15),
            Some(Duration::minutes(30)),
        ),
        user(
            "user-escrevente-01",
            "Escrevente Souza",
            "escrevente.souza@cartorio.dev",
            UserRole::Clerk,
            true,
            Duration::days(5),
            Some(Duration::zero()),
        ),
        user(
            "user-escrevente-02",
            "Escrevente Pereira Inativo",
            "escrevente.pereira@cartorio.dev",
            UserRole::Clerk,
            false,
            Duration::days(60),
            None,
        ),
    ]
}
