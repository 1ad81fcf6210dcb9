//! Demo accounts and studies for local development (`DEMO_DATA=1`).

use labtrack_core::study::CreateStudyForm;
use labtrack_core::user::{Role, User};

use crate::state::AppState;

/// Demo accounts: one administrator, two biochemists, three patients.
pub fn demo_users() -> Vec<User> {
    vec![
        User::new(1, "admin@labtrack.test", "20000001", Role::Admin).with_name("Carla", "Ibáñez"),
        User::new(2, "bioquimico@labtrack.test", "27111222", Role::Biochemist)
            .with_name("Luis", "Gómez"),
        User::new(3, "bioquimica@labtrack.test", "29333444", Role::Biochemist)
            .with_name("Marta", "Ruiz"),
        User::new(4, "ana.paz@labtrack.test", "38374909", Role::Patient).with_name("Ana", "Paz"),
        User::new(5, "juan.perez@labtrack.test", "40111222", Role::Patient)
            .with_name("Juan", "Pérez"),
        User::new(6, "sofia.diaz@labtrack.test", "42555666", Role::Patient)
            .with_name("Sofía", "Díaz"),
    ]
}

/// `(patient dni, study name, study date, social insurance)`
const DEMO_STUDIES: [(&str, &str, &str, Option<&str>); 4] = [
    ("38374909", "Hemograma completo", "2025-03-14", Some("OSDE")),
    ("38374909", "Perfil lipídico", "2025-04-02", Some("OSDE")),
    ("40111222", "Glucemia en ayunas", "2025-04-10", None),
    ("42555666", "Hepatograma", "2025-05-21", Some("Swiss Medical")),
];

fn demo_form(dni: &str, name: &str, date: &str, insurance: Option<&str>) -> CreateStudyForm {
    CreateStudyForm {
        dni: Some(dni.to_string()),
        study_name: Some(name.to_string()),
        study_date: Some(date.to_string()),
        social_insurance: insurance.map(String::from),
        biochemist_id: None,
    }
}

/// Inserts the demo accounts and, when they are new, a few studies assigned
/// to the first biochemist. Logs a session token for every demo account.
pub async fn seed_demo_data(state: &AppState) -> anyhow::Result<()> {
    let mut created = 0;
    for user in demo_users() {
        if state.users.get_user_by_email(&user.email).await?.is_none() {
            state.users.create_user(&user).await?;
            created += 1;
        }
    }

    if created > 0 {
        let biochemist = demo_users()
            .into_iter()
            .find(|u| u.role == Role::Biochemist)
            .ok_or_else(|| anyhow::anyhow!("demo data has no biochemist"))?;

        for (dni, name, date, insurance) in DEMO_STUDIES {
            state
                .studies
                .create_study(&biochemist, &demo_form(dni, name, date, insurance), None)
                .await?;
        }
    }

    tracing::info!(users = created, "Demo data ready");

    for user in demo_users() {
        let session = state.auth.issue_session(user.id).await?;
        tracing::info!(
            email = %user.email,
            role = %user.role,
            token = %session.id,
            "Demo session"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use labtrack_core::storage::UserRepository;

    use super::*;
    use crate::test_support::TestApp;

    #[test]
    fn test_demo_users_are_unique() {
        let users = demo_users();
        for (i, a) in users.iter().enumerate() {
            for b in &users[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.email, b.email);
                assert_ne!(a.dni, b.dni);
            }
        }
    }

    #[test]
    fn test_demo_studies_reference_demo_patients() {
        let users = demo_users();
        for (dni, ..) in DEMO_STUDIES {
            assert!(
                users.iter().any(|u| u.dni == dni && u.role == Role::Patient),
                "{dni}"
            );
        }
    }

    #[tokio::test]
    async fn test_seed_demo_data_is_idempotent() {
        let app = TestApp::empty().await;

        seed_demo_data(&app.state).await.unwrap();
        seed_demo_data(&app.state).await.unwrap();

        assert!(app.repo.get_user_by_dni("38374909").await.unwrap().is_some());
        let studies = app.state.studies.list_all().await.unwrap();
        assert_eq!(studies.len(), DEMO_STUDIES.len());
        assert!(studies.iter().all(|s| s.status.name == "IN_PROGRESS"));
    }
}
