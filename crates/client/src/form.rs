//! The in-progress form state container.
//!
//! Holds the submission being edited as a flat record, mirrors edits from
//! the field widgets, and runs the whole-form validation pass on demand.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use domain::models::{
    validate_request, CommitmentInfo, CreateSubmissionRequest, DomainInfo, Gender, PersonalInfo,
};

/// Flat record of the in-progress submission.
///
/// Field names in the serialized draft match the wire names used by the
/// form widgets, so a restored draft lines up key-for-key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub name: String,
    pub reg_number: String,
    pub phone_number: String,
    pub branch_specialization: String,
    pub gender: String,
    pub dob: String,
    pub vit_email: String,
    pub personal_email: String,
    pub other_organizations: String,
    pub cgpa: String,
    pub domain: String,
    pub sub_domain: String,
    pub projects: String,
    pub liked_senior: String,
    pub commitment: i32,
    pub commitment_justification: String,

    #[serde(skip)]
    errors: BTreeMap<String, String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            reg_number: String::new(),
            phone_number: String::new(),
            branch_specialization: String::new(),
            gender: String::new(),
            dob: String::new(),
            vit_email: String::new(),
            personal_email: String::new(),
            other_organizations: "None".to_string(),
            cgpa: String::new(),
            domain: String::new(),
            sub_domain: String::new(),
            projects: String::new(),
            liked_senior: String::new(),
            commitment: 5,
            commitment_justification: String::new(),
            errors: BTreeMap::new(),
        }
    }
}

impl FormState {
    /// Apply a text edit to the named field and clear its error.
    /// Unknown field names are ignored.
    pub fn set_field(&mut self, field: &str, value: &str) {
        match field {
            "name" => self.name = value.to_string(),
            "regNumber" => self.reg_number = value.to_string(),
            "phoneNumber" => self.phone_number = value.to_string(),
            "branchSpecialization" => self.branch_specialization = value.to_string(),
            "gender" => self.gender = value.to_string(),
            "dob" => self.dob = value.to_string(),
            "vitEmail" => self.vit_email = value.to_string(),
            "personalEmail" => self.personal_email = value.to_string(),
            "otherOrganizations" => self.other_organizations = value.to_string(),
            "cgpa" => self.cgpa = value.to_string(),
            "domain" => {
                self.set_domain(value);
                return;
            }
            "subDomain" => self.sub_domain = value.to_string(),
            "projects" => self.projects = value.to_string(),
            "likedSenior" => self.liked_senior = value.to_string(),
            "commitmentJustification" => self.commitment_justification = value.to_string(),
            _ => return,
        }
        self.errors.remove(field);
    }

    /// Apply a rating edit and clear its error.
    pub fn set_rating(&mut self, rating: i32) {
        self.commitment = rating;
        self.errors.remove("commitment");
    }

    /// Changing the domain resets the subdomain and clears both errors.
    pub fn set_domain(&mut self, value: &str) {
        self.domain = value.to_string();
        self.sub_domain = String::new();
        self.errors.remove("domain");
        self.errors.remove("subDomain");
    }

    /// Merge a restored draft record into current state; keys absent from
    /// the draft keep their current values.
    pub fn merge_draft(&mut self, record: &serde_json::Value) {
        let Some(map) = record.as_object() else {
            return;
        };
        for (key, value) in map {
            match value {
                serde_json::Value::String(s) => {
                    // Plain assignment here: restoring a draft must not
                    // trigger the subdomain reset.
                    if key == "domain" {
                        self.domain = s.clone();
                    } else {
                        self.set_field(key, s);
                    }
                }
                serde_json::Value::Number(n) if key == "commitment" => {
                    if let Some(v) = n.as_i64() {
                        self.commitment = v as i32;
                    }
                }
                _ => {}
            }
        }
    }

    /// Run the whole-form validation pass, store the error map, and return
    /// whether the form is clean.
    pub fn validate(&mut self) -> bool {
        let mut errors: BTreeMap<String, String> = validate_request(&self.assemble())
            .into_iter()
            .map(|(field, message)| (field.to_string(), message))
            .collect();

        // The typed request carries placeholders for the selection fields;
        // report their presence/shape from the raw strings instead.
        errors.remove("gender");
        if self.gender.trim().is_empty() {
            errors.insert("gender".to_string(), "Gender is required".to_string());
        } else if parse_gender(&self.gender).is_none() {
            errors.insert("gender".to_string(), "Please select a valid gender".to_string());
        }

        if self.dob.trim().is_empty() {
            errors.insert("dob".to_string(), "Date of Birth is required".to_string());
        } else if parse_dob(&self.dob).is_none() {
            errors.insert("dob".to_string(), "Invalid date".to_string());
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Per-field errors from the last `validate()` run.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// The wire payload for submission, normalized (registration number
    /// uppercased, emails lowercased). `None` until the form validates.
    pub fn to_request(&self) -> Option<CreateSubmissionRequest> {
        let gender = parse_gender(&self.gender)?;
        let dob = parse_dob(&self.dob)?;
        let req = self.assemble_with(gender, dob);
        if validate_request(&req).is_empty() {
            Some(req.normalized())
        } else {
            None
        }
    }

    fn assemble(&self) -> CreateSubmissionRequest {
        // Placeholder values keep the typed request constructible while the
        // selection fields are still empty; validate() reports those
        // separately from the raw strings.
        let gender = parse_gender(&self.gender).unwrap_or(Gender::Other);
        let dob = parse_dob(&self.dob).unwrap_or_else(|| {
            NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid placeholder date")
        });
        self.assemble_with(gender, dob)
    }

    fn assemble_with(&self, gender: Gender, dob: NaiveDate) -> CreateSubmissionRequest {
        let sub_domain = if self.sub_domain.trim().is_empty() {
            None
        } else {
            Some(self.sub_domain.clone())
        };
        CreateSubmissionRequest {
            personal_info: PersonalInfo {
                name: self.name.clone(),
                reg_number: self.reg_number.clone(),
                phone_number: self.phone_number.clone(),
                branch_specialization: self.branch_specialization.clone(),
                gender,
                dob,
                vit_email: self.vit_email.clone(),
                personal_email: self.personal_email.clone(),
                other_organizations: self.other_organizations.clone(),
                cgpa: self.cgpa.clone(),
            },
            domain_info: DomainInfo {
                domain: self.domain.clone(),
                sub_domain,
                projects: self.projects.clone(),
            },
            commitment: CommitmentInfo {
                liked_senior: self.liked_senior.clone(),
                commitment_rating: self.commitment,
                commitment_justification: self.commitment_justification.clone(),
            },
        }
    }
}

fn parse_gender(raw: &str) -> Option<Gender> {
    match raw.trim() {
        "Male" => Some(Gender::Male),
        "Female" => Some(Gender::Female),
        "Other" => Some(Gender::Other),
        _ => None,
    }
}

fn parse_dob(raw: &str) -> Option<NaiveDate> {
    NaiveDate::from_str(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> FormState {
        let mut form = FormState::default();
        form.set_field("name", "Rahul Kumar");
        form.set_field("regNumber", "25BCE0001");
        form.set_field("phoneNumber", "9876543210");
        form.set_field("branchSpecialization", "CSE Core");
        form.set_field("gender", "Male");
        form.set_field("dob", "2006-04-12");
        form.set_field("vitEmail", "rahul.kumar2025@vitstudent.ac.in");
        form.set_field("personalEmail", "rahul@gmail.com");
        form.set_field("cgpa", "9.50");
        form.set_field("domain", "Tech");
        form.set_field("subDomain", "Web Development");
        form.set_field("projects", "github.com/rahul");
        form.set_field("likedSenior", "The web lead");
        form.set_rating(8);
        form.set_field("commitmentJustification", "Free evenings this year");
        form
    }

    #[test]
    fn test_defaults() {
        let form = FormState::default();
        assert_eq!(form.other_organizations, "None");
        assert_eq!(form.commitment, 5);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_filled_form_validates() {
        let mut form = filled_form();
        assert!(form.validate());
        assert!(form.errors().is_empty());
        assert!(form.to_request().is_some());
    }

    #[test]
    fn test_empty_form_reports_required_fields() {
        let mut form = FormState::default();
        assert!(!form.validate());
        let errors = form.errors();
        assert_eq!(errors.get("name").unwrap(), "Full Name is required");
        assert_eq!(errors.get("gender").unwrap(), "Gender is required");
        assert_eq!(errors.get("dob").unwrap(), "Date of Birth is required");
        assert!(errors.contains_key("domain"));
        // otherOrganizations defaults to "None", so it is not reported.
        assert!(!errors.contains_key("otherOrganizations"));
    }

    #[test]
    fn test_edit_clears_field_error() {
        let mut form = filled_form();
        form.set_field("phoneNumber", "12345");
        assert!(!form.validate());
        assert!(form.errors().contains_key("phoneNumber"));

        form.set_field("phoneNumber", "9876543210");
        assert!(!form.errors().contains_key("phoneNumber"));
    }

    #[test]
    fn test_domain_change_resets_subdomain() {
        let mut form = filled_form();
        assert_eq!(form.sub_domain, "Web Development");
        form.set_domain("Design");
        assert_eq!(form.sub_domain, "");

        let mut form2 = filled_form();
        form2.set_domain("Management");
        assert!(form2.validate(), "Management needs no subdomain: {:?}", form2.errors());
    }

    #[test]
    fn test_tech_without_subdomain_fails() {
        let mut form = filled_form();
        form.set_domain("Tech");
        assert!(!form.validate());
        assert_eq!(form.errors().get("subDomain").unwrap(), "Subdomain is required");
    }

    #[test]
    fn test_invalid_date_reported() {
        let mut form = filled_form();
        form.set_field("dob", "12/04/2006");
        assert!(!form.validate());
        assert_eq!(form.errors().get("dob").unwrap(), "Invalid date");
    }

    #[test]
    fn test_to_request_normalizes() {
        let mut form = filled_form();
        form.set_field("regNumber", "25bce0001");
        form.set_field("vitEmail", "Rahul.Kumar2025@VITStudent.ac.in");
        assert!(form.validate());
        let req = form.to_request().unwrap();
        assert_eq!(req.personal_info.reg_number, "25BCE0001");
        assert_eq!(req.personal_info.vit_email, "rahul.kumar2025@vitstudent.ac.in");
    }

    #[test]
    fn test_to_request_none_while_invalid() {
        let mut form = filled_form();
        form.set_field("cgpa", "9.5");
        assert!(form.to_request().is_none());
    }

    #[test]
    fn test_merge_draft_round_trip() {
        let form = filled_form();
        let draft = serde_json::to_value(&form).unwrap();

        let mut restored = FormState::default();
        restored.merge_draft(&draft);
        assert_eq!(restored.name, form.name);
        assert_eq!(restored.reg_number, form.reg_number);
        assert_eq!(restored.sub_domain, "Web Development");
        assert_eq!(restored.commitment, 8);
    }

    #[test]
    fn test_merge_draft_keeps_unlisted_fields() {
        let mut form = filled_form();
        form.merge_draft(&serde_json::json!({ "name": "Priya S" }));
        assert_eq!(form.name, "Priya S");
        assert_eq!(form.reg_number, "25BCE0001");
    }

    #[test]
    fn test_merge_draft_ignores_non_object() {
        let mut form = filled_form();
        let before = form.clone();
        form.merge_draft(&serde_json::json!("not an object"));
        assert_eq!(form, before);
    }

    #[test]
    fn test_draft_serializes_with_wire_field_names() {
        let form = filled_form();
        let value = serde_json::to_value(&form).unwrap();
        assert!(value.get("regNumber").is_some());
        assert!(value.get("subDomain").is_some());
        assert!(value.get("commitmentJustification").is_some());
        assert!(value.get("errors").is_none());
    }
}
