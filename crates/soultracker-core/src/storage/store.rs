//! User store abstraction and the in-memory implementation.
//!
//! Callers never reach for a global: a store handle is passed to whatever
//! needs it. `update` is the only way to change an existing record and runs
//! as one atomic read-modify-write, so two check-ins racing for the same
//! user cannot lose either write.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::info;

use super::record::UserRecord;
use crate::error::{CoreError, Result, StoreError};

/// Mutation applied under the store's write lock.
pub type UpdateFn<'a> = dyn FnMut(&mut UserRecord) -> Result<()> + 'a;

pub trait UserStore: Send + Sync {
    fn get(&self, id: &str) -> Result<UserRecord, StoreError>;

    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Add a new record. Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    fn insert(&self, record: UserRecord) -> Result<(), StoreError>;

    /// Atomically load, mutate and write back one record.
    ///
    /// If `f` fails nothing is written and its error is returned.
    fn update(&self, id: &str, f: &mut UpdateFn<'_>) -> Result<UserRecord>;

    fn all(&self) -> Result<Vec<UserRecord>, StoreError>;
}

impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    fn get(&self, id: &str) -> Result<UserRecord, StoreError> {
        (**self).get(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        (**self).find_by_email(email)
    }

    fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        (**self).insert(record)
    }

    fn update(&self, id: &str, f: &mut UpdateFn<'_>) -> Result<UserRecord> {
        (**self).update(id, f)
    }

    fn all(&self) -> Result<Vec<UserRecord>, StoreError> {
        (**self).all()
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

impl UserStore for MemoryStore {
    fn get(&self, id: &str) -> Result<UserRecord, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        if users.values().any(|u| u.email == record.email) {
            return Err(StoreError::DuplicateEmail(record.email));
        }
        info!(user_id = %record.id, "user inserted");
        users.insert(record.id.clone(), record);
        Ok(())
    }

    fn update(&self, id: &str, f: &mut UpdateFn<'_>) -> Result<UserRecord> {
        let mut users = self
            .users
            .write()
            .map_err(|_| CoreError::from(StoreError::Poisoned))?;
        let current = users
            .get(id)
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))?;

        let mut draft = current.clone();
        f(&mut draft)?;
        users.insert(id.to_string(), draft.clone());
        info!(user_id = %id, points = draft.points, streak = draft.current_streak, "user updated");
        Ok(draft)
    }

    fn all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.values().cloned().collect())
    }
}
