use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::models::{BloodPressureReading, StoredProfile, StoredUser};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;

/// Repository trait for user accounts and the data they own
#[async_trait]
pub trait UserRepositoryTrait {
    /// Store a newly registered user
    async fn create_user(&self, user: StoredUser) -> Result<StoredUser, RepositoryError>;

    /// Get a user by email
    async fn get_user(&self, email: &str) -> Result<Option<StoredUser>, RepositoryError>;

    /// Replace the profile of an existing user
    async fn update_profile(&self, email: &str, profile: StoredProfile) -> Result<StoredProfile, RepositoryError>;

    /// Insert a reading at the front of a user's reading list, returning the new count
    async fn prepend_reading(&self, email: &str, reading: BloodPressureReading) -> Result<usize, RepositoryError>;

    /// Get a user's readings, most-recent-first
    async fn get_readings(&self, email: &str) -> Result<Vec<BloodPressureReading>, RepositoryError>;

    /// Serialize every stored user to a JSON document keyed by email
    async fn export_snapshot(&self) -> Result<String, RepositoryError>;

    /// Replace the stored users with the contents of a JSON snapshot
    async fn import_snapshot(&self, snapshot: &str) -> Result<usize, RepositoryError>;
}

/// Encode users as the snapshot document
fn encode_snapshot(users: Vec<StoredUser>) -> Result<String, RepositoryError> {
    let keyed: BTreeMap<String, StoredUser> = users
        .into_iter()
        .map(|user| (user.email.clone(), user))
        .collect();
    Ok(serde_json::to_string_pretty(&keyed)?)
}

/// Decode a snapshot document, checking every key matches its user's email
fn decode_snapshot(snapshot: &str) -> Result<Vec<StoredUser>, RepositoryError> {
    let keyed: BTreeMap<String, StoredUser> = serde_json::from_str(snapshot)?;
    keyed
        .into_iter()
        .map(|(key, user)| {
            if key != user.email {
                Err(RepositoryError::Validation(format!(
                    "snapshot key {} does not match user email {}",
                    key, user.email
                )))
            } else {
                Ok(user)
            }
        })
        .collect()
}

/// Repository for user accounts backed by in-memory storage.
///
/// The store lives for the session; `save_to_file` and `load_from_file` carry it
/// across restarts as a JSON snapshot.
#[derive(Debug, Clone, Default)]
pub struct UserRepository {
    storage: InMemoryStorage,
}

impl UserRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }

    /// Write the snapshot document to `path`
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), RepositoryError> {
        let snapshot = self.export_snapshot().await?;
        tokio::fs::write(path.as_ref(), snapshot).await?;
        info!("Saved user snapshot");
        Ok(())
    }

    /// Load the snapshot document at `path`, leaving the store empty if it does not exist
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn load_from_file(&self, path: impl AsRef<Path>) -> Result<usize, RepositoryError> {
        match tokio::fs::read_to_string(path.as_ref()).await {
            Ok(snapshot) => self.import_snapshot(&snapshot).await,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No user snapshot found, starting empty");
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, user: StoredUser) -> Result<StoredUser, RepositoryError> {
        debug!("Storing new user: {}", user.email);
        self.storage.insert_user(user)
    }

    async fn get_user(&self, email: &str) -> Result<Option<StoredUser>, RepositoryError> {
        self.storage.get_user(email)
    }

    async fn update_profile(&self, email: &str, profile: StoredProfile) -> Result<StoredProfile, RepositoryError> {
        debug!("Updating profile for user: {}", email);
        self.storage.set_profile(email, profile)
    }

    async fn prepend_reading(&self, email: &str, reading: BloodPressureReading) -> Result<usize, RepositoryError> {
        debug!("Adding reading for user: {}", email);
        self.storage.prepend_reading(email, reading)
    }

    async fn get_readings(&self, email: &str) -> Result<Vec<BloodPressureReading>, RepositoryError> {
        self.storage
            .get_user(email)?
            .map(|user| user.bp_records)
            .ok_or_else(|| RepositoryError::NotFound(email.to_string()))
    }

    async fn export_snapshot(&self) -> Result<String, RepositoryError> {
        encode_snapshot(self.storage.get_all()?)
    }

    async fn import_snapshot(&self, snapshot: &str) -> Result<usize, RepositoryError> {
        let users = decode_snapshot(snapshot)?;
        let count = self.storage.replace_all(users)?;
        info!("Imported {} users from snapshot", count);
        Ok(count)
    }
}

/// Mock user repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Mock implementation of UserRepositoryTrait for testing
    pub struct MockUserRepository {
        users: RwLock<HashMap<String, StoredUser>>,
        should_fail: bool,
    }

    impl Default for MockUserRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUserRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self {
                users: RwLock::new(HashMap::new()),
                should_fail: false,
            }
        }

        /// Create a mock repository holding a predefined user
        pub fn with_user(self, user: StoredUser) -> Self {
            {
                let mut users = self.users.write().unwrap();
                users.insert(user.email.clone(), user);
            }
            self
        }

        /// Configure the mock so every operation fails as a storage error
        pub fn failing(mut self) -> Self {
            self.should_fail = true;
            self
        }

        fn check(&self) -> Result<(), RepositoryError> {
            if self.should_fail {
                Err(RepositoryError::MutexLock("mock is configured to fail".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        async fn create_user(&self, user: StoredUser) -> Result<StoredUser, RepositoryError> {
            self.check()?;
            let mut users = self.users.write()?;
            if users.contains_key(&user.email) {
                return Err(RepositoryError::AlreadyExists(user.email));
            }
            users.insert(user.email.clone(), user.clone());
            Ok(user)
        }

        async fn get_user(&self, email: &str) -> Result<Option<StoredUser>, RepositoryError> {
            self.check()?;
            Ok(self.users.read()?.get(email).cloned())
        }

        async fn update_profile(&self, email: &str, profile: StoredProfile) -> Result<StoredProfile, RepositoryError> {
            self.check()?;
            let mut users = self.users.write()?;
            let user = users
                .get_mut(email)
                .ok_or_else(|| RepositoryError::NotFound(email.to_string()))?;
            user.profile = Some(profile.clone());
            Ok(profile)
        }

        async fn prepend_reading(&self, email: &str, reading: BloodPressureReading) -> Result<usize, RepositoryError> {
            self.check()?;
            let mut users = self.users.write()?;
            let user = users
                .get_mut(email)
                .ok_or_else(|| RepositoryError::NotFound(email.to_string()))?;
            user.bp_records.insert(0, reading);
            Ok(user.bp_records.len())
        }

        async fn get_readings(&self, email: &str) -> Result<Vec<BloodPressureReading>, RepositoryError> {
            self.check()?;
            self.users
                .read()?
                .get(email)
                .map(|user| user.bp_records.clone())
                .ok_or_else(|| RepositoryError::NotFound(email.to_string()))
        }

        async fn export_snapshot(&self) -> Result<String, RepositoryError> {
            self.check()?;
            let users: Vec<StoredUser> = self.users.read()?.values().cloned().collect();
            encode_snapshot(users)
        }

        async fn import_snapshot(&self, snapshot: &str) -> Result<usize, RepositoryError> {
            self.check()?;
            let decoded = decode_snapshot(snapshot)?;
            let mut users = self.users.write()?;
            users.clear();
            for user in decoded {
                users.insert(user.email.clone(), user);
            }
            Ok(users.len())
        }
    }
}

#[cfg(test)]
mod repository_tests {
    use super::*;
    use super::tests::MockUserRepository;

    fn reading(systolic: u16, diastolic: u16) -> BloodPressureReading {
        BloodPressureReading {
            systolic,
            diastolic,
            pulse: 70,
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            time: chrono::NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let repo = UserRepository::new();
        repo.create_user(StoredUser::new("a@example.com", "hash")).await.unwrap();

        let result = repo.create_user(StoredUser::new("a@example.com", "other")).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_prepend_reading_keeps_most_recent_first() {
        let repo = UserRepository::new();
        repo.create_user(StoredUser::new("a@example.com", "hash")).await.unwrap();

        repo.prepend_reading("a@example.com", reading(120, 80)).await.unwrap();
        let count = repo.prepend_reading("a@example.com", reading(130, 85)).await.unwrap();
        assert_eq!(count, 2);

        let readings = repo.get_readings("a@example.com").await.unwrap();
        assert_eq!(readings[0].systolic, 130);
        assert_eq!(readings[1].systolic, 120);
    }

    #[tokio::test]
    async fn test_operations_on_unknown_user_are_not_found() {
        let repo = UserRepository::new();

        let result = repo.prepend_reading("ghost@example.com", reading(120, 80)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));

        let result = repo.get_readings("ghost@example.com").await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));

        assert!(repo.get_user("ghost@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_restores_users_into_fresh_repository() {
        let repo = UserRepository::new();
        repo.create_user(StoredUser::new("a@example.com", "hash-a")).await.unwrap();
        repo.prepend_reading("a@example.com", reading(118, 76)).await.unwrap();
        repo.update_profile("a@example.com", StoredProfile {
            name: "Ada".to_string(),
            age: 41,
            gender: "Female".to_string(),
            height_cm: 165.0,
            weight_kg: 60.0,
        }).await.unwrap();

        let snapshot = repo.export_snapshot().await.unwrap();
        assert!(snapshot.contains("\"a@example.com\""));

        let restored = UserRepository::new();
        assert_eq!(restored.import_snapshot(&snapshot).await.unwrap(), 1);

        let user = restored.get_user("a@example.com").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "hash-a");
        assert_eq!(user.bp_records, vec![reading(118, 76)]);
        assert_eq!(user.profile.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_snapshot_with_mismatched_key_is_rejected() {
        let repo = UserRepository::new();
        repo.create_user(StoredUser::new("a@example.com", "hash")).await.unwrap();
        let snapshot = repo
            .export_snapshot()
            .await
            .unwrap()
            .replacen("\"a@example.com\":", "\"b@example.com\":", 1);

        let result = UserRepository::new().import_snapshot(&snapshot).await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_load_from_missing_file_starts_empty() {
        let repo = UserRepository::new();
        let path = std::env::temp_dir().join("health_flow_missing_snapshot_does_not_exist.json");
        assert_eq!(repo.load_from_file(&path).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_and_load_file_round_trip() {
        let path = std::env::temp_dir().join(format!("health_flow_snapshot_{}.json", std::process::id()));
        let repo = UserRepository::new();
        repo.create_user(StoredUser::new("a@example.com", "hash")).await.unwrap();
        repo.save_to_file(&path).await.unwrap();

        let restored = UserRepository::new();
        assert_eq!(restored.load_from_file(&path).await.unwrap(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_failing_mock_reports_storage_error() {
        let repo = MockUserRepository::new().failing();
        let result = repo.get_user("a@example.com").await;
        assert!(matches!(result, Err(RepositoryError::MutexLock(_))));
    }
}
