//! Authorization rules for studies. Callers pass the authenticated user
//! explicitly; nothing here reads request state.

use super::Study;
use crate::user::{Role, User};

/// The assigned biochemist or an administrator may view a study.
pub fn can_view_study(user: &User, study: &Study) -> bool {
    study.is_assigned_to(user.id) || user.role == Role::Admin
}

/// Only the assigned biochemist may change a study's status or its PDF.
/// Administrators get no override here.
pub fn can_update_status(user: &User, study: &Study) -> bool {
    study.is_assigned_to(user.id)
}

/// The assigned biochemist or an administrator may delete a study.
pub fn can_manage_study(user: &User, study: &Study) -> bool {
    can_view_study(user, study)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::study::NewStudy;

    fn study(biochemist_id: Option<i64>) -> Study {
        NewStudy {
            patient_id: 3,
            biochemist_id,
            study_name: "Glucemia".to_string(),
            study_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            social_insurance: None,
            status_id: 1,
            pdf_url: None,
        }
        .into_study(42, Utc::now())
    }

    fn user(id: i64, role: Role) -> User {
        User::new(id, format!("u{id}@example.com"), format!("{id}"), role)
    }

    #[test]
    fn test_assigned_biochemist_has_full_access() {
        let bio = user(7, Role::Biochemist);
        let s = study(Some(7));
        assert!(can_view_study(&bio, &s));
        assert!(can_update_status(&bio, &s));
        assert!(can_manage_study(&bio, &s));
    }

    #[test]
    fn test_other_biochemist_has_no_access() {
        let other = user(8, Role::Biochemist);
        let s = study(Some(7));
        assert!(!can_view_study(&other, &s));
        assert!(!can_update_status(&other, &s));
        assert!(!can_manage_study(&other, &s));
    }

    #[test]
    fn test_admin_can_view_but_not_update_status() {
        let admin = user(1, Role::Admin);
        let s = study(Some(7));
        assert!(can_view_study(&admin, &s));
        assert!(can_manage_study(&admin, &s));
        assert!(!can_update_status(&admin, &s));
    }

    #[test]
    fn test_unassigned_study_is_admin_only() {
        let s = study(None);
        assert!(!can_view_study(&user(7, Role::Biochemist), &s));
        assert!(can_view_study(&user(1, Role::Admin), &s));
    }

    #[test]
    fn test_patient_cannot_view_by_id() {
        let s = study(Some(7));
        assert!(!can_view_study(&user(3, Role::Patient), &s));
    }
}
