//! Process-local repository backed by a `Vec`.

use super::{RecordRepository, RepoError, RepoResult, RepositoryProvider};
use crate::model::id::RecordId;
use crate::model::Record;

/// In-memory record store; contents live as long as the value.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing records, keeping their order.
    pub fn with_records(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }
}

impl<T: Record> RecordRepository<T> for InMemoryRepository<T> {
    fn insert(&mut self, record: T) -> RepoResult<T> {
        if self.position(record.id()).is_some() {
            return Err(RepoError::Conflict(record.id().clone()));
        }
        self.records.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: &RecordId) -> RepoResult<Option<T>> {
        Ok(self.records.iter().find(|record| record.id() == id).cloned())
    }

    fn list(&self) -> RepoResult<Vec<T>> {
        Ok(self.records.clone())
    }

    fn replace(&mut self, record: T) -> RepoResult<T> {
        let Some(index) = self.position(record.id()) else {
            return Err(RepoError::NotFound(record.id().clone()));
        };
        self.records[index] = record.clone();
        Ok(record)
    }

    fn delete(&mut self, id: &RecordId) -> RepoResult<bool> {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Provider handing out empty in-memory repositories.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryProvider;

impl RepositoryProvider for MemoryProvider {
    type Repo<T: Record> = InMemoryRepository<T>;

    fn repository<T: Record>(&self) -> RepoResult<Self::Repo<T>> {
        Ok(InMemoryRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryRepository;
    use crate::model::id::RecordId;
    use crate::model::Record;
    use crate::repo::{RecordRepository, RepoError};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: RecordId,
        body: String,
    }

    impl Record for Note {
        const COLLECTION: &'static str = "notes";

        fn id(&self) -> &RecordId {
            &self.id
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: RecordId::new(id),
            body: body.to_string(),
        }
    }

    #[test]
    fn keeps_insertion_order_and_rejects_duplicates() {
        let mut repo = InMemoryRepository::new();
        repo.insert(note("b", "first")).unwrap();
        repo.insert(note("a", "second")).unwrap();

        let err = repo.insert(note("a", "again")).unwrap_err();
        assert!(matches!(err, RepoError::Conflict(id) if id.as_str() == "a"));

        let ids: Vec<_> = repo.list().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![RecordId::new("b"), RecordId::new("a")]);
    }

    #[test]
    fn replace_requires_existing_record() {
        let mut repo = InMemoryRepository::with_records(vec![note("a", "old")]);

        repo.replace(note("a", "new")).unwrap();
        assert_eq!(repo.get(&RecordId::new("a")).unwrap().unwrap().body, "new");
        assert!(matches!(
            repo.replace(note("missing", "x")),
            Err(RepoError::NotFound(_))
        ));
    }

    #[test]
    fn delete_reports_whether_record_existed() {
        let mut repo = InMemoryRepository::with_records(vec![note("a", "x")]);

        assert!(repo.delete(&RecordId::new("a")).unwrap());
        assert!(!repo.delete(&RecordId::new("a")).unwrap());
        assert!(repo.is_empty());
    }
}
