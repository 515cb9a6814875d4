//! Submission entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{
    CommitmentInfo, DomainInfo, Gender, PersonalInfo, Submission, SubmissionStatus,
};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for gender that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
pub enum GenderDb {
    Male,
    Female,
    Other,
}

impl From<GenderDb> for Gender {
    fn from(db: GenderDb) -> Self {
        match db {
            GenderDb::Male => Gender::Male,
            GenderDb::Female => Gender::Female,
            GenderDb::Other => Gender::Other,
        }
    }
}

impl From<Gender> for GenderDb {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => GenderDb::Male,
            Gender::Female => GenderDb::Female,
            Gender::Other => GenderDb::Other,
        }
    }
}

/// Database enum for submission_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "submission_status", rename_all = "snake_case")]
pub enum SubmissionStatusDb {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

impl From<SubmissionStatusDb> for SubmissionStatus {
    fn from(db: SubmissionStatusDb) -> Self {
        match db {
            SubmissionStatusDb::Submitted => SubmissionStatus::Submitted,
            SubmissionStatusDb::UnderReview => SubmissionStatus::UnderReview,
            SubmissionStatusDb::Approved => SubmissionStatus::Approved,
            SubmissionStatusDb::Rejected => SubmissionStatus::Rejected,
        }
    }
}

impl From<SubmissionStatus> for SubmissionStatusDb {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Submitted => SubmissionStatusDb::Submitted,
            SubmissionStatus::UnderReview => SubmissionStatusDb::UnderReview,
            SubmissionStatus::Approved => SubmissionStatusDb::Approved,
            SubmissionStatus::Rejected => SubmissionStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the submissions table.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionEntity {
    pub id: Uuid,
    pub name: String,
    pub reg_number: String,
    pub phone_number: String,
    pub branch_specialization: String,
    pub gender: GenderDb,
    pub dob: NaiveDate,
    pub vit_email: String,
    pub personal_email: String,
    pub other_organizations: String,
    pub cgpa: String,
    pub domain: String,
    pub sub_domain: Option<String>,
    pub projects: String,
    pub liked_senior: String,
    pub commitment_rating: i32,
    pub commitment_justification: String,
    pub status: SubmissionStatusDb,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<SubmissionEntity> for Submission {
    fn from(entity: SubmissionEntity) -> Self {
        Self {
            id: entity.id,
            personal_info: PersonalInfo {
                name: entity.name,
                reg_number: entity.reg_number,
                phone_number: entity.phone_number,
                branch_specialization: entity.branch_specialization,
                gender: entity.gender.into(),
                dob: entity.dob,
                vit_email: entity.vit_email,
                personal_email: entity.personal_email,
                other_organizations: entity.other_organizations,
                cgpa: entity.cgpa,
            },
            domain_info: DomainInfo {
                domain: entity.domain,
                sub_domain: entity.sub_domain,
                projects: entity.projects,
            },
            commitment: CommitmentInfo {
                liked_senior: entity.liked_senior,
                commitment_rating: entity.commitment_rating,
                commitment_justification: entity.commitment_justification,
            },
            status: entity.status.into(),
            reviewed_by: entity.reviewed_by,
            reviewed_at: entity.reviewed_at,
            notes: entity.notes,
            submitted_at: entity.submitted_at,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> SubmissionEntity {
        SubmissionEntity {
            id: Uuid::new_v4(),
            name: "Rahul Kumar".to_string(),
            reg_number: "25BCE0001".to_string(),
            phone_number: "9876543210".to_string(),
            branch_specialization: "CSE Core".to_string(),
            gender: GenderDb::Male,
            dob: NaiveDate::from_ymd_opt(2006, 4, 12).unwrap(),
            vit_email: "rahul.kumar2025@vitstudent.ac.in".to_string(),
            personal_email: "rahul@gmail.com".to_string(),
            other_organizations: "None".to_string(),
            cgpa: "9.50".to_string(),
            domain: "Tech".to_string(),
            sub_domain: Some("Web Development".to_string()),
            projects: "github.com/rahul".to_string(),
            liked_senior: "The web lead".to_string(),
            commitment_rating: 8,
            commitment_justification: "Free evenings".to_string(),
            status: SubmissionStatusDb::Submitted,
            reviewed_by: None,
            reviewed_at: None,
            notes: None,
            submitted_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_model_sections() {
        let e = entity();
        let id = e.id;
        let model: Submission = e.into();
        assert_eq!(model.id, id);
        assert_eq!(model.personal_info.reg_number, "25BCE0001");
        assert_eq!(model.personal_info.gender, Gender::Male);
        assert_eq!(model.domain_info.sub_domain.as_deref(), Some("Web Development"));
        assert_eq!(model.commitment.commitment_rating, 8);
        assert_eq!(model.status, SubmissionStatus::Submitted);
        assert!(model.reviewed_at.is_none());
    }

    #[test]
    fn test_status_conversions_round_trip() {
        for status in [
            SubmissionStatus::Submitted,
            SubmissionStatus::UnderReview,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
        ] {
            let db: SubmissionStatusDb = status.into();
            let back: SubmissionStatus = db.into();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_gender_conversions_round_trip() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            let db: GenderDb = gender.into();
            let back: Gender = db.into();
            assert_eq!(back, gender);
        }
    }
}
