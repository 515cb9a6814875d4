//! Submission domain models and the explicit validation pass.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::taxonomy::find_domain;
use shared::validation::{
    non_empty, validate_cgpa, validate_dob, validate_email, validate_phone_number, validate_rating,
    validate_reg_number, validate_vit_email,
};

/// Review lifecycle of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::UnderReview => "under_review",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    /// Whether this is the state a submission is created in.
    pub fn is_initial(&self) -> bool {
        matches!(self, SubmissionStatus::Submitted)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Please select a valid status")]
pub struct ParseStatusError;

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "under_review" => Ok(SubmissionStatus::UnderReview),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            _ => Err(ParseStatusError),
        }
    }
}

/// Member gender as collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Personal identity section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub reg_number: String,
    pub phone_number: String,
    pub branch_specialization: String,
    pub gender: Gender,
    pub dob: NaiveDate,
    pub vit_email: String,
    pub personal_email: String,
    pub other_organizations: String,
    pub cgpa: String,
}

/// Domain/work section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_domain: Option<String>,
    pub projects: String,
}

/// Commitment section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentInfo {
    pub liked_senior: String,
    pub commitment_rating: i32,
    pub commitment_justification: String,
}

/// One persisted member record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub personal_info: PersonalInfo,
    pub domain_info: DomainInfo,
    pub commitment: CommitmentInfo,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub personal_info: PersonalInfo,
    pub domain_info: DomainInfo,
    pub commitment: CommitmentInfo,
}

impl CreateSubmissionRequest {
    /// Returns a copy with canonical casing and whitespace: every free-text
    /// field trimmed, the registration number uppercased, both emails
    /// lowercased, and the subdomain dropped when the chosen domain has none.
    pub fn normalized(&self) -> Self {
        let p = &self.personal_info;
        let d = &self.domain_info;
        let c = &self.commitment;

        let domain = d.domain.trim().to_string();
        let sub_domain = match find_domain(&domain) {
            Some(option) if option.requires_subdomain() => d
                .sub_domain
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            _ => None,
        };

        Self {
            personal_info: PersonalInfo {
                name: p.name.trim().to_string(),
                reg_number: p.reg_number.trim().to_uppercase(),
                phone_number: p.phone_number.trim().to_string(),
                branch_specialization: p.branch_specialization.trim().to_string(),
                gender: p.gender,
                dob: p.dob,
                vit_email: p.vit_email.trim().to_lowercase(),
                personal_email: p.personal_email.trim().to_lowercase(),
                other_organizations: p.other_organizations.trim().to_string(),
                cgpa: p.cgpa.trim().to_string(),
            },
            domain_info: DomainInfo {
                domain,
                sub_domain,
                projects: d.projects.trim().to_string(),
            },
            commitment: CommitmentInfo {
                liked_senior: c.liked_senior.trim().to_string(),
                commitment_rating: c.commitment_rating,
                commitment_justification: c.commitment_justification.trim().to_string(),
            },
        }
    }
}

fn message_of(err: validator::ValidationError) -> String {
    err.message
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

/// The explicit validation pass run by the create handler before insertion
/// (and mirrored client-side before submission).
///
/// Returns a map from flat field name to error message; absence of a key
/// means the field is valid. Never fails.
pub fn validate_request(req: &CreateSubmissionRequest) -> BTreeMap<&'static str, String> {
    let mut errors = BTreeMap::new();
    let p = &req.personal_info;
    let d = &req.domain_info;
    let c = &req.commitment;

    match non_empty(&p.name) {
        None => {
            errors.insert("name", "Full Name is required".to_string());
        }
        Some(name) if name.chars().count() > 100 => {
            errors.insert("name", "Name cannot be more than 100 characters".to_string());
        }
        Some(_) => {}
    }

    match non_empty(&p.reg_number) {
        None => {
            errors.insert("regNumber", "Registration Number is required".to_string());
        }
        Some(reg) => {
            if let Err(err) = validate_reg_number(reg) {
                errors.insert("regNumber", message_of(err));
            }
        }
    }

    match non_empty(&p.phone_number) {
        None => {
            errors.insert("phoneNumber", "Phone Number is required".to_string());
        }
        Some(phone) => {
            if let Err(err) = validate_phone_number(phone) {
                errors.insert("phoneNumber", message_of(err));
            }
        }
    }

    match non_empty(&p.vit_email) {
        None => {
            errors.insert("vitEmail", "VIT Email is required".to_string());
        }
        Some(email) => {
            if let Err(err) = validate_vit_email(email) {
                errors.insert("vitEmail", message_of(err));
            }
        }
    }

    match non_empty(&p.personal_email) {
        None => {
            errors.insert("personalEmail", "Personal Email is required".to_string());
        }
        Some(email) => {
            if let Err(err) = validate_email(email) {
                errors.insert("personalEmail", message_of(err));
            }
        }
    }

    if let Err(err) = validate_dob(p.dob) {
        errors.insert("dob", message_of(err));
    }

    match non_empty(&p.branch_specialization) {
        None => {
            errors.insert("branchSpecialization", "Branch is required".to_string());
        }
        Some(branch) if branch.chars().count() > 150 => {
            errors.insert(
                "branchSpecialization",
                "Branch cannot be more than 150 characters".to_string(),
            );
        }
        Some(_) => {}
    }

    match non_empty(&p.other_organizations) {
        None => {
            errors.insert(
                "otherOrganizations",
                "Required (type 'None' if applicable)".to_string(),
            );
        }
        Some(orgs) if orgs.chars().count() > 500 => {
            errors.insert(
                "otherOrganizations",
                "Other organizations cannot be more than 500 characters".to_string(),
            );
        }
        Some(_) => {}
    }

    match non_empty(&p.cgpa) {
        None => {
            errors.insert("cgpa", "CGPA is required".to_string());
        }
        Some(cgpa) => {
            if let Err(err) = validate_cgpa(cgpa) {
                errors.insert("cgpa", message_of(err));
            }
        }
    }

    match non_empty(&d.domain) {
        None => {
            errors.insert("domain", "Domain is required".to_string());
        }
        Some(domain) => match find_domain(domain) {
            None => {
                errors.insert("domain", "Please select a valid domain".to_string());
            }
            Some(option) if option.requires_subdomain() => {
                match d.sub_domain.as_deref().and_then(non_empty) {
                    None => {
                        errors.insert("subDomain", "Subdomain is required".to_string());
                    }
                    Some(sub) if !option.has_subdomain(sub) => {
                        errors.insert("subDomain", "Please select a valid subdomain".to_string());
                    }
                    Some(_) => {}
                }
            }
            Some(_) => {}
        },
    }

    if non_empty(&d.projects).is_none() {
        errors.insert("projects", "Projects/Portfolio is required".to_string());
    }

    if non_empty(&c.liked_senior).is_none() {
        errors.insert("likedSenior", "This field is required".to_string());
    }

    if let Err(err) = validate_rating(c.commitment_rating) {
        errors.insert("commitment", message_of(err));
    }

    match non_empty(&c.commitment_justification) {
        None => {
            errors.insert("commitmentJustification", "Justification is required".to_string());
        }
        Some(justification) if justification.chars().count() > 1000 => {
            errors.insert(
                "commitmentJustification",
                "Justification cannot be more than 1000 characters".to_string(),
            );
        }
        Some(_) => {}
    }

    errors
}

/// Request body for `PUT /api/members`.
///
/// `id` and `status` stay loosely typed so the handler can answer with the
/// per-field 400s the admin UI expects instead of a body-rejection error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubmissionRequest {
    pub id: Option<Uuid>,

    pub status: Option<String>,

    #[validate(length(max = 100, message = "Reviewer name cannot be more than 100 characters"))]
    pub reviewed_by: Option<String>,

    #[validate(length(max = 1000, message = "Notes cannot be more than 1000 characters"))]
    pub notes: Option<String>,
}

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionQuery {
    pub status: Option<String>,

    pub domain: Option<String>,

    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,

    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
}

/// Equality filter applied by the repository's list/count queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub status: Option<SubmissionStatus>,
    pub domain: Option<String>,
}

/// The concrete column updates a review action applies.
#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub status: Option<SubmissionStatus>,
    pub reviewed_by: Option<String>,
    pub notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn valid_request() -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            personal_info: PersonalInfo {
                name: "Rahul Kumar".to_string(),
                reg_number: "25BCE0001".to_string(),
                phone_number: "9876543210".to_string(),
                branch_specialization: "CSE Core".to_string(),
                gender: Gender::Male,
                dob: NaiveDate::from_ymd_opt(2006, 4, 12).unwrap(),
                vit_email: "rahul.kumar2025@vitstudent.ac.in".to_string(),
                personal_email: "rahul@gmail.com".to_string(),
                other_organizations: "None".to_string(),
                cgpa: "9.50".to_string(),
            },
            domain_info: DomainInfo {
                domain: "Tech".to_string(),
                sub_domain: Some("Web Development".to_string()),
                projects: "github.com/rahul/portfolio".to_string(),
            },
            commitment: CommitmentInfo {
                liked_senior: "The web lead, for always unblocking juniors".to_string(),
                commitment_rating: 8,
                commitment_justification: "Evenings and weekends are free this year".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_request_has_no_errors() {
        assert!(validate_request(&valid_request()).is_empty());
    }

    #[test]
    fn test_reg_number_wrong_year_prefix() {
        let mut req = valid_request();
        req.personal_info.reg_number = "23BCE0001".to_string();
        let errors = validate_request(&req);
        assert!(errors.contains_key("regNumber"));
    }

    #[test]
    fn test_reg_number_wrong_digit_count() {
        let mut req = valid_request();
        req.personal_info.reg_number = "25BCE001".to_string();
        assert!(validate_request(&req).contains_key("regNumber"));
    }

    #[test]
    fn test_cgpa_one_decimal_rejected() {
        let mut req = valid_request();
        req.personal_info.cgpa = "9.5".to_string();
        assert!(validate_request(&req).contains_key("cgpa"));

        req.personal_info.cgpa = "11.00".to_string();
        assert!(validate_request(&req).contains_key("cgpa"));
    }

    #[test]
    fn test_phone_nine_digits_rejected() {
        let mut req = valid_request();
        req.personal_info.phone_number = "987654321".to_string();
        let errors = validate_request(&req);
        assert_eq!(errors.get("phoneNumber").unwrap(), "Must be exactly 10 digits");
    }

    #[test]
    fn test_tech_requires_subdomain() {
        let mut req = valid_request();
        req.domain_info.sub_domain = None;
        let errors = validate_request(&req);
        assert_eq!(errors.get("subDomain").unwrap(), "Subdomain is required");
    }

    #[test]
    fn test_management_subdomain_optional() {
        let mut req = valid_request();
        req.domain_info.domain = "Management".to_string();
        req.domain_info.sub_domain = None;
        assert!(validate_request(&req).is_empty());
    }

    #[test]
    fn test_subdomain_must_belong_to_domain() {
        let mut req = valid_request();
        req.domain_info.domain = "Design".to_string();
        req.domain_info.sub_domain = Some("Web Development".to_string());
        let errors = validate_request(&req);
        assert_eq!(errors.get("subDomain").unwrap(), "Please select a valid subdomain");
    }

    #[test]
    fn test_unknown_domain_rejected() {
        let mut req = valid_request();
        req.domain_info.domain = "Sports".to_string();
        assert!(validate_request(&req).contains_key("domain"));
    }

    #[test]
    fn test_required_fields_reported_after_trimming() {
        let mut req = valid_request();
        req.personal_info.name = "   ".to_string();
        req.domain_info.projects = "".to_string();
        req.commitment.liked_senior = " \t".to_string();
        let errors = validate_request(&req);
        assert_eq!(errors.get("name").unwrap(), "Full Name is required");
        assert!(errors.contains_key("projects"));
        assert!(errors.contains_key("likedSenior"));
    }

    #[test]
    fn test_commitment_rating_bounds() {
        let mut req = valid_request();
        req.commitment.commitment_rating = 0;
        assert!(validate_request(&req).contains_key("commitment"));
        req.commitment.commitment_rating = 11;
        assert!(validate_request(&req).contains_key("commitment"));
        req.commitment.commitment_rating = 10;
        assert!(!validate_request(&req).contains_key("commitment"));
    }

    #[test]
    fn test_normalized_casing_and_trim() {
        let mut req = valid_request();
        req.personal_info.reg_number = " 25bce0001 ".to_string();
        req.personal_info.vit_email = "Rahul.Kumar2025@VITstudent.ac.in".to_string();
        req.personal_info.name = "  Rahul Kumar  ".to_string();
        let normalized = req.normalized();
        assert_eq!(normalized.personal_info.reg_number, "25BCE0001");
        assert_eq!(
            normalized.personal_info.vit_email,
            "rahul.kumar2025@vitstudent.ac.in"
        );
        assert_eq!(normalized.personal_info.name, "Rahul Kumar");
    }

    #[test]
    fn test_normalized_drops_stale_subdomain() {
        let mut req = valid_request();
        req.domain_info.domain = "Management".to_string();
        req.domain_info.sub_domain = Some("Web Development".to_string());
        assert_eq!(req.normalized().domain_info.sub_domain, None);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            SubmissionStatus::Submitted,
            SubmissionStatus::UnderReview,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<SubmissionStatus>().unwrap(), status);
        }
        assert!("archived".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&SubmissionStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
    }

    #[test]
    fn test_only_submitted_is_initial() {
        assert!(SubmissionStatus::Submitted.is_initial());
        assert!(!SubmissionStatus::Approved.is_initial());
        assert!(!SubmissionStatus::UnderReview.is_initial());
    }

    #[test]
    fn test_request_wire_shape_is_camel_case() {
        let req = valid_request();
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json.get("domainInfo").is_some());
        assert!(json["personalInfo"].get("regNumber").is_some());
        assert!(json["personalInfo"].get("vitEmail").is_some());
        assert_eq!(json["personalInfo"]["gender"], "Male");
        assert!(json["domainInfo"].get("subDomain").is_some());
    }

    #[test]
    fn test_update_request_length_limits() {
        let req = UpdateSubmissionRequest {
            id: Some(Uuid::new_v4()),
            status: Some("approved".to_string()),
            reviewed_by: Some("a".repeat(101)),
            notes: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateSubmissionRequest {
            id: Some(Uuid::new_v4()),
            status: None,
            reviewed_by: Some("Board Secretary".to_string()),
            notes: Some("b".repeat(1000)),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_query_limit_bounds() {
        let query = SubmissionQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = SubmissionQuery {
            limit: Some(20),
            page: Some(2),
            ..Default::default()
        };
        assert!(query.validate().is_ok());
    }
}
