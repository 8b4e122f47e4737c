use std::sync::{Arc, Mutex};
use std::collections::HashMap;

use crate::models::{BloodPressureReading, StoredProfile, StoredUser};
use super::errors::RepositoryError;

/// In-memory storage for user accounts, keyed by email
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    users: Arc<Mutex<HashMap<String, StoredUser>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Insert a new user, refusing to overwrite an existing email
    pub fn insert_user(&self, user: StoredUser) -> Result<StoredUser, RepositoryError> {
        let mut store = self.users.lock()?;
        if store.contains_key(&user.email) {
            return Err(RepositoryError::AlreadyExists(user.email));
        }
        store.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    /// Get a user by email
    pub fn get_user(&self, email: &str) -> Result<Option<StoredUser>, RepositoryError> {
        let store = self.users.lock()?;
        Ok(store.get(email).cloned())
    }

    /// Replace a user's profile
    pub fn set_profile(&self, email: &str, profile: StoredProfile) -> Result<StoredProfile, RepositoryError> {
        let mut store = self.users.lock()?;
        let user = store
            .get_mut(email)
            .ok_or_else(|| RepositoryError::NotFound(email.to_string()))?;
        user.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Insert a reading at the front of a user's list
    pub fn prepend_reading(&self, email: &str, reading: BloodPressureReading) -> Result<usize, RepositoryError> {
        let mut store = self.users.lock()?;
        let user = store
            .get_mut(email)
            .ok_or_else(|| RepositoryError::NotFound(email.to_string()))?;
        user.bp_records.insert(0, reading);
        Ok(user.bp_records.len())
    }

    /// Get all users, sorted by email so snapshots are stable
    pub fn get_all(&self) -> Result<Vec<StoredUser>, RepositoryError> {
        let store = self.users.lock()?;
        let mut users: Vec<StoredUser> = store.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    /// Replace the whole store
    pub fn replace_all(&self, users: Vec<StoredUser>) -> Result<usize, RepositoryError> {
        let mut store = self.users.lock()?;
        store.clear();
        for user in users {
            store.insert(user.email.clone(), user);
        }
        Ok(store.len())
    }
}
