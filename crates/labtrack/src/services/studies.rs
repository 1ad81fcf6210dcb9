use std::collections::HashMap;
use std::sync::Arc;

use labtrack_core::api::FieldError;
use labtrack_core::storage::{
    RepositoryError, StatusRepository, StudyRepository, UserRepository,
};
use labtrack_core::study::{
    can_manage_study, can_update_status, can_view_study, validate_create_study, CreateStudyForm,
    NewStudy, PatientLookup, Status, Study, StudyError, StudyView, UpdateStatusRequest,
};
use labtrack_core::user::{Role, User};

use crate::uploads::{PdfStore, StagedPdf, StoredPdf};

type Result<T> = std::result::Result<T, StudyError>;

/// Study use cases over the repositories and the PDF store.
#[derive(Clone)]
pub struct StudyService {
    users: Arc<dyn UserRepository>,
    statuses: Arc<dyn StatusRepository>,
    studies: Arc<dyn StudyRepository>,
    pdfs: PdfStore,
}

impl StudyService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        statuses: Arc<dyn StatusRepository>,
        studies: Arc<dyn StudyRepository>,
        pdfs: PdfStore,
    ) -> Self {
        Self {
            users,
            statuses,
            studies,
            pdfs,
        }
    }

    /// Creates a study for the patient named by `form.dni`.
    ///
    /// Every check runs before the PDF is written, so a rejected request
    /// leaves neither a row nor a file behind.
    pub async fn create_study(
        &self,
        caller: &User,
        form: &CreateStudyForm,
        pdf: Option<StagedPdf>,
    ) -> Result<StudyView> {
        let input = validate_create_study(form)?;

        let patient = self
            .users
            .get_user_by_dni(&input.dni)
            .await?
            .filter(|u| u.role == Role::Patient)
            .ok_or(StudyError::NotFound("Patient with the given dni"))?;

        let biochemist = match input.biochemist_id {
            Some(id) => {
                let user = self
                    .users
                    .get_user(id)
                    .await?
                    .ok_or(StudyError::NotFound("Biochemist"))?;
                if user.role != Role::Biochemist {
                    return Err(StudyError::NotABiochemist);
                }
                user
            }
            None => caller.clone(),
        };

        let status = self
            .statuses
            .get_status_by_name(Status::IN_PROGRESS)
            .await?
            .ok_or_else(|| {
                StudyError::Configuration(format!("status '{}' not found", Status::IN_PROGRESS))
            })?;

        let stored = match pdf {
            Some(pdf) => Some(self.store_pdf(&pdf).await?),
            None => None,
        };

        let new_study = NewStudy {
            patient_id: patient.id,
            biochemist_id: Some(biochemist.id),
            study_name: input.study_name,
            study_date: input.study_date,
            social_insurance: input.social_insurance,
            status_id: status.id,
            pdf_url: stored.as_ref().map(|s| s.url.clone()),
        };

        let study = match self.studies.create_study(new_study).await {
            Ok(study) => study,
            Err(e) => {
                if let Some(stored) = &stored {
                    self.pdfs.remove_url(&stored.url).await;
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            study_id = study.id,
            patient_id = patient.id,
            biochemist_id = biochemist.id,
            has_pdf = study.pdf_url.is_some(),
            "Study created"
        );
        Ok(StudyView::new(study, status, &patient, Some(&biochemist)))
    }

    /// Studies assigned to the calling biochemist.
    pub async fn list_for_biochemist(&self, caller: &User) -> Result<Vec<StudyView>> {
        let studies = self.studies.list_by_biochemist(caller.id).await?;
        self.hydrate_all(studies).await
    }

    /// Studies owned by the caller as a patient.
    pub async fn list_for_patient(&self, caller: &User) -> Result<Vec<StudyView>> {
        let studies = self.studies.list_by_patient(caller.id).await?;
        self.hydrate_all(studies).await
    }

    pub async fn list_all(&self) -> Result<Vec<StudyView>> {
        let studies = self.studies.list_all().await?;
        self.hydrate_all(studies).await
    }

    pub async fn get_study(&self, caller: &User, id: i64) -> Result<StudyView> {
        let study = self.find_study(id).await?;
        if !can_view_study(caller, &study) {
            return Err(StudyError::Forbidden(
                "You do not have permission to view this study",
            ));
        }
        self.hydrate(study).await
    }

    /// Moves a study to the named status.
    ///
    /// The status name is resolved first, so an unknown name leaves the
    /// study untouched whatever else is wrong with the request.
    pub async fn update_status(
        &self,
        caller: &User,
        id: i64,
        request: &UpdateStatusRequest,
    ) -> Result<StudyView> {
        let name = request
            .status_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                StudyError::Validation(vec![FieldError::new(
                    "statusName",
                    "statusName is required",
                )])
            })?;

        let status = self
            .statuses
            .get_status_by_name(name)
            .await?
            .ok_or(StudyError::NotFound("Status"))?;

        let study = self.find_study(id).await?;
        if !can_update_status(caller, &study) {
            return Err(StudyError::Forbidden(
                "Only the assigned biochemist can update this study",
            ));
        }

        let updated = self.studies.update_study_status(id, status.id).await?;
        tracing::info!(study_id = id, status = %status.name, user_id = caller.id, "Study status updated");
        self.hydrate(updated).await
    }

    /// Attaches a PDF to a study, replacing any previous one.
    pub async fn attach_pdf(
        &self,
        caller: &User,
        id: i64,
        pdf: Option<StagedPdf>,
    ) -> Result<StudyView> {
        let pdf = pdf.ok_or(StudyError::MissingFile)?;

        let study = self.find_study(id).await?;
        if !can_update_status(caller, &study) {
            return Err(StudyError::Forbidden(
                "Only the assigned biochemist can update this study",
            ));
        }

        let stored = self.store_pdf(&pdf).await?;

        let updated = match self.studies.update_study_pdf(id, &stored.url).await {
            Ok(updated) => updated,
            Err(e) => {
                self.pdfs.remove_url(&stored.url).await;
                return Err(e.into());
            }
        };

        if let Some(previous) = &study.pdf_url {
            self.pdfs.remove_url(previous).await;
        }

        tracing::info!(study_id = id, filename = %stored.filename, "Study PDF attached");
        self.hydrate(updated).await
    }

    /// Removes a study and, best-effort, its PDF.
    pub async fn delete_study(&self, caller: &User, id: i64) -> Result<()> {
        let study = self.find_study(id).await?;
        if !can_manage_study(caller, &study) {
            return Err(StudyError::Forbidden(
                "You do not have permission to delete this study",
            ));
        }

        self.studies.delete_study(id).await?;
        if let Some(url) = &study.pdf_url {
            self.pdfs.remove_url(url).await;
        }

        tracing::info!(study_id = id, user_id = caller.id, "Study deleted");
        Ok(())
    }

    /// Finds a patient by dni. The dni is trimmed first.
    pub async fn find_patient(&self, dni: &str) -> Result<PatientLookup> {
        let dni = dni.trim();
        if dni.is_empty() {
            return Err(StudyError::Validation(vec![FieldError::new(
                "dni",
                "dni is required",
            )]));
        }

        self.users
            .get_user_by_dni(dni)
            .await?
            .filter(|u| u.role == Role::Patient)
            .map(|u| PatientLookup::from(&u))
            .ok_or(StudyError::NotFound("Patient"))
    }

    async fn store_pdf(&self, pdf: &StagedPdf) -> Result<StoredPdf> {
        let stored = self
            .pdfs
            .save(&pdf.bytes)
            .await
            .map_err(|e| StudyError::FileStorage(e.to_string()))?;
        tracing::debug!(
            original = pdf.file_name.as_deref().unwrap_or("<unnamed>"),
            filename = %stored.filename,
            "PDF staged to disk"
        );
        Ok(stored)
    }

    async fn find_study(&self, id: i64) -> Result<Study> {
        self.studies
            .get_study(id)
            .await?
            .ok_or(StudyError::NotFound("Study"))
    }

    async fn hydrate(&self, study: Study) -> Result<StudyView> {
        let mut users = HashMap::new();
        let mut statuses = HashMap::new();
        self.hydrate_with(study, &mut users, &mut statuses).await
    }

    /// Resolves a batch of studies, looking each user and status up once.
    async fn hydrate_all(&self, studies: Vec<Study>) -> Result<Vec<StudyView>> {
        let mut users = HashMap::new();
        let mut statuses = HashMap::new();
        let mut views = Vec::with_capacity(studies.len());

        for study in studies {
            views.push(self.hydrate_with(study, &mut users, &mut statuses).await?);
        }
        Ok(views)
    }

    async fn hydrate_with(
        &self,
        study: Study,
        users: &mut HashMap<i64, Option<User>>,
        statuses: &mut HashMap<i64, Status>,
    ) -> Result<StudyView> {
        let status = match statuses.get(&study.status_id) {
            Some(status) => status.clone(),
            None => {
                let status = self.statuses.get_status(study.status_id).await?.ok_or_else(|| {
                    RepositoryError::InvalidData(format!(
                        "study {} references missing status {}",
                        study.id, study.status_id
                    ))
                })?;
                statuses.insert(status.id, status.clone());
                status
            }
        };

        let patient = self.cached_user(study.patient_id, users).await?.ok_or_else(|| {
            RepositoryError::InvalidData(format!(
                "study {} references missing patient {}",
                study.id, study.patient_id
            ))
        })?;

        let biochemist = match study.biochemist_id {
            Some(id) => {
                let user = self.cached_user(id, users).await?;
                if user.is_none() {
                    tracing::warn!(
                        study_id = study.id,
                        biochemist_id = id,
                        "Assigned biochemist not found"
                    );
                }
                user
            }
            None => None,
        };

        Ok(StudyView::new(study, status, &patient, biochemist.as_ref()))
    }

    async fn cached_user(
        &self,
        id: i64,
        users: &mut HashMap<i64, Option<User>>,
    ) -> Result<Option<User>> {
        if let Some(user) = users.get(&id) {
            return Ok(user.clone());
        }
        let user = self.users.get_user(id).await?;
        users.insert(id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Bytes;

    use super::*;
    use crate::storage::{inmemory::InMemoryRepository, seed_statuses};

    /// Study store whose inserts always fail.
    struct FailingInserts(InMemoryRepository);

    #[async_trait]
    impl StudyRepository for FailingInserts {
        async fn create_study(&self, _study: NewStudy) -> labtrack_core::storage::Result<Study> {
            Err(RepositoryError::QueryFailed("disk I/O error".to_string()))
        }
        async fn get_study(&self, id: i64) -> labtrack_core::storage::Result<Option<Study>> {
            self.0.get_study(id).await
        }
        async fn list_by_biochemist(&self, id: i64) -> labtrack_core::storage::Result<Vec<Study>> {
            self.0.list_by_biochemist(id).await
        }
        async fn list_by_patient(&self, id: i64) -> labtrack_core::storage::Result<Vec<Study>> {
            self.0.list_by_patient(id).await
        }
        async fn list_all(&self) -> labtrack_core::storage::Result<Vec<Study>> {
            self.0.list_all().await
        }
        async fn update_study_status(
            &self,
            id: i64,
            status_id: i64,
        ) -> labtrack_core::storage::Result<Study> {
            self.0.update_study_status(id, status_id).await
        }
        async fn update_study_pdf(&self, id: i64, url: &str) -> labtrack_core::storage::Result<Study> {
            self.0.update_study_pdf(id, url).await
        }
        async fn delete_study(&self, id: i64) -> labtrack_core::storage::Result<()> {
            self.0.delete_study(id).await
        }
    }

    fn biochemist() -> User {
        User::new(7, "bio@example.com", "20111222", Role::Biochemist)
    }

    fn form() -> CreateStudyForm {
        CreateStudyForm {
            dni: Some(" 38374909 ".to_string()),
            study_name: Some("Hemograma".to_string()),
            study_date: Some("2025-03-14T10:00:00-03:00".to_string()),
            ..CreateStudyForm::default()
        }
    }

    fn pdf() -> StagedPdf {
        StagedPdf {
            file_name: Some("resultado.pdf".to_string()),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    async fn people(repo: &InMemoryRepository) {
        repo.create_user(&User::new(3, "ana@example.com", "38374909", Role::Patient))
            .await
            .unwrap();
        repo.create_user(&biochemist()).await.unwrap();
    }

    fn pdf_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_failed_insert_removes_written_pdf() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = InMemoryRepository::new();
        seed_statuses(&repo).await.unwrap();
        people(&repo).await;

        let service = StudyService::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(FailingInserts(repo)),
            PdfStore::new(tmp.path()),
        );

        let result = service.create_study(&biochemist(), &form(), Some(pdf())).await;

        assert!(matches!(result, Err(StudyError::Storage(_))));
        assert_eq!(pdf_files(tmp.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_in_progress_status_is_configuration_error() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = InMemoryRepository::new();
        people(&repo).await;

        let service = StudyService::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            PdfStore::new(tmp.path()),
        );

        let result = service.create_study(&biochemist(), &form(), Some(pdf())).await;

        assert!(matches!(result, Err(StudyError::Configuration(_))));
        assert!(repo.list_all().await.unwrap().is_empty());
        assert_eq!(pdf_files(tmp.path()), 0);
    }

    #[tokio::test]
    async fn test_create_trims_dni_and_keeps_timestamp_date() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = InMemoryRepository::new();
        seed_statuses(&repo).await.unwrap();
        people(&repo).await;

        let service = StudyService::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            PdfStore::new(tmp.path()),
        );

        let view = service
            .create_study(&biochemist(), &form(), None)
            .await
            .unwrap();

        assert_eq!(view.patient_id, 3);
        assert_eq!(view.study_date.to_string(), "2025-03-14");
        assert_eq!(view.biochemist.map(|b| b.id), Some(7));
    }
}
