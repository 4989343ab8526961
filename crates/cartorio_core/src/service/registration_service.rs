//! Registration service, generic over the registration kind.

use crate::model::id::RecordId;
use crate::model::registration::{Registration, RegistrationKind, RegistrationStatus};
use crate::repo::RecordRepository;
use crate::service::ServiceResult;
use chrono::Utc;
use log::info;
use std::marker::PhantomData;

pub struct RegistrationService<T, R>
where
    T: RegistrationKind,
    R: RecordRepository<Registration<T>>,
{
    repo: R,
    _kind: PhantomData<fn() -> T>,
}

impl<T, R> RegistrationService<T, R>
where
    T: RegistrationKind,
    R: RecordRepository<Registration<T>>,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _kind: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Stores a validated form under a fresh id with the kind's initial status.
    pub fn register(&mut self, form: T) -> ServiceResult<Registration<T>> {
        let registration = self.repo.insert(Registration::new(form, Utc::now()))?;
        info!(
            "event=registration_create module=service status=ok kind={} registration_id={} registration_status={}",
            T::LABEL,
            registration.id,
            registration.status
        );
        Ok(registration)
    }

    pub fn get(&self, id: &RecordId) -> ServiceResult<Option<Registration<T>>> {
        Ok(self.repo.get(id)?)
    }

    /// All registrations of this kind, oldest first.
    pub fn list(&self) -> ServiceResult<Vec<Registration<T>>> {
        let mut registrations = self.repo.list()?;
        registrations.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(registrations)
    }

    pub fn delete(&mut self, id: &RecordId) -> ServiceResult<bool> {
        let deleted = self.repo.delete(id)?;
        if deleted {
            info!(
                "event=registration_delete module=service status=ok kind={} registration_id={id}",
                T::LABEL
            );
        }
        Ok(deleted)
    }

    /// Moves a registration to `status`. Returns `None` for an unknown id.
    pub fn update_status(
        &mut self,
        id: &RecordId,
        status: RegistrationStatus,
    ) -> ServiceResult<Option<Registration<T>>> {
        let Some(mut registration) = self.repo.get(id)? else {
            return Ok(None);
        };
        registration.status = status;
        let registration = self.repo.replace(registration)?;
        info!(
            "event=registration_status module=service status=ok kind={} registration_id={id} to={status}",
            T::LABEL
        );
        Ok(Some(registration))
    }
}
