//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use labtrack_core::storage::{
    RepositoryError, Result, StatusRepository, StudyRepository, UserRepository,
};
use labtrack_core::study::{NewStudy, Status, Study};
use labtrack_core::user::User;

/// In-memory storage backend.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access. Status
/// and study ids come from per-table counters starting at 1.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    statuses: Arc<RwLock<HashMap<i64, Status>>>,
    studies: Arc<RwLock<HashMap<i64, Study>>>,
    next_status_id: Arc<AtomicI64>,
    next_study_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            statuses: Arc::new(RwLock::new(HashMap::new())),
            studies: Arc::new(RwLock::new(HashMap::new())),
            next_status_id: Arc::new(AtomicI64::new(1)),
            next_study_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Stores a study with the id it carries and moves the counter past it.
    #[cfg(test)]
    pub async fn insert_study(&self, study: Study) {
        self.next_study_id.fetch_max(study.id + 1, Ordering::SeqCst);
        self.studies.write().await.insert(study.id, study);
    }
}

/// Newest first: `created_at` descending, then id descending.
fn newest_first(mut studies: Vec<Study>) -> Vec<Study> {
    studies.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    studies
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_dni(&self, dni: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.dni == dni).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        let duplicate = users.contains_key(&user.id)
            || users
                .values()
                .any(|u| u.email == user.email || u.dni == user.dni);
        if duplicate {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.id.to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}

#[async_trait]
impl StatusRepository for InMemoryRepository {
    async fn get_status(&self, id: i64) -> Result<Option<Status>> {
        let statuses = self.statuses.read().await;
        Ok(statuses.get(&id).cloned())
    }

    async fn get_status_by_name(&self, name: &str) -> Result<Option<Status>> {
        let statuses = self.statuses.read().await;
        Ok(statuses.values().find(|s| s.name == name).cloned())
    }

    async fn list_statuses(&self) -> Result<Vec<Status>> {
        let statuses = self.statuses.read().await;
        let mut list: Vec<Status> = statuses.values().cloned().collect();
        list.sort_by_key(|s| s.id);
        Ok(list)
    }

    async fn create_status(&self, name: &str) -> Result<Status> {
        let mut statuses = self.statuses.write().await;
        if statuses.values().any(|s| s.name == name) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Status",
                id: name.to_string(),
            });
        }
        let status = Status::new(self.next_status_id.fetch_add(1, Ordering::SeqCst), name);
        statuses.insert(status.id, status.clone());
        Ok(status)
    }
}

#[async_trait]
impl StudyRepository for InMemoryRepository {
    async fn create_study(&self, study: NewStudy) -> Result<Study> {
        let mut studies = self.studies.write().await;
        let id = self.next_study_id.fetch_add(1, Ordering::SeqCst);
        let study = study.into_study(id, Utc::now());
        studies.insert(id, study.clone());
        Ok(study)
    }

    async fn get_study(&self, id: i64) -> Result<Option<Study>> {
        let studies = self.studies.read().await;
        Ok(studies.get(&id).cloned())
    }

    async fn list_by_biochemist(&self, biochemist_id: i64) -> Result<Vec<Study>> {
        let studies = self.studies.read().await;
        Ok(newest_first(
            studies
                .values()
                .filter(|s| s.biochemist_id == Some(biochemist_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Study>> {
        let studies = self.studies.read().await;
        Ok(newest_first(
            studies
                .values()
                .filter(|s| s.patient_id == patient_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Study>> {
        let studies = self.studies.read().await;
        Ok(newest_first(studies.values().cloned().collect()))
    }

    async fn update_study_status(&self, id: i64, status_id: i64) -> Result<Study> {
        let mut studies = self.studies.write().await;
        let study = studies
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Study", id))?;
        study.status_id = status_id;
        study.updated_at = Utc::now();
        Ok(study.clone())
    }

    async fn update_study_pdf(&self, id: i64, pdf_url: &str) -> Result<Study> {
        let mut studies = self.studies.write().await;
        let study = studies
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Study", id))?;
        study.pdf_url = Some(pdf_url.to_string());
        study.updated_at = Utc::now();
        Ok(study.clone())
    }

    async fn delete_study(&self, id: i64) -> Result<()> {
        let mut studies = self.studies.write().await;
        if studies.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Study", id));
        }
        Ok(())
    }
}
