//! Admin dashboard helpers: client-side search and CSV export.
//!
//! Both operate only on the currently loaded page of rows; neither affects
//! server-side pagination counts.

use domain::models::Submission;

/// Column order of the CSV export.
const CSV_HEADERS: [&str; 18] = [
    "Name",
    "Reg Number",
    "Phone",
    "Branch",
    "Gender",
    "Date of Birth",
    "VIT Email",
    "Personal Email",
    "Other Orgs",
    "CGPA",
    "Domain",
    "Subdomain",
    "Projects",
    "Liked Senior",
    "Commitment Rating",
    "Commitment Justification",
    "Status",
    "Submitted At",
];

/// Narrows the loaded rows by case-insensitive substring match over name,
/// registration number, and VIT email. An empty term selects everything.
pub fn search_rows<'a>(rows: &'a [Submission], term: &str) -> Vec<&'a Submission> {
    let needle = term.trim().to_lowercase();
    rows.iter()
        .filter(|row| {
            needle.is_empty()
                || row.personal_info.name.to_lowercase().contains(&needle)
                || row.personal_info.reg_number.to_lowercase().contains(&needle)
                || row.personal_info.vit_email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Serializes the given (already filtered, already loaded) rows as CSV with
/// a fixed column order. Every value is quoted; embedded quotes are doubled.
pub fn export_csv<'a>(rows: impl IntoIterator<Item = &'a Submission>) -> String {
    let mut lines = Vec::new();
    lines.push(csv_line(CSV_HEADERS.iter().map(|h| h.to_string())));

    for row in rows {
        let p = &row.personal_info;
        let d = &row.domain_info;
        let c = &row.commitment;
        lines.push(csv_line(
            [
                p.name.clone(),
                p.reg_number.clone(),
                p.phone_number.clone(),
                p.branch_specialization.clone(),
                p.gender.to_string(),
                p.dob.to_string(),
                p.vit_email.clone(),
                p.personal_email.clone(),
                p.other_organizations.clone(),
                p.cgpa.clone(),
                d.domain.clone(),
                d.sub_domain.clone().unwrap_or_default(),
                d.projects.clone(),
                c.liked_senior.clone(),
                c.commitment_rating.to_string(),
                c.commitment_justification.clone(),
                row.status.to_string(),
                row.submitted_at.to_rfc3339(),
            ]
            .into_iter(),
        ));
    }

    lines.join("\n")
}

fn csv_line(fields: impl Iterator<Item = String>) -> String {
    fields
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use domain::models::{
        CommitmentInfo, DomainInfo, Gender, PersonalInfo, SubmissionStatus,
    };
    use uuid::Uuid;

    fn row(name: &str, reg: &str, email: &str) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            personal_info: PersonalInfo {
                name: name.to_string(),
                reg_number: reg.to_string(),
                phone_number: "9876543210".to_string(),
                branch_specialization: "CSE Core".to_string(),
                gender: Gender::Female,
                dob: NaiveDate::from_ymd_opt(2006, 4, 12).unwrap(),
                vit_email: email.to_string(),
                personal_email: "personal@gmail.com".to_string(),
                other_organizations: "None".to_string(),
                cgpa: "9.50".to_string(),
            },
            domain_info: DomainInfo {
                domain: "Tech".to_string(),
                sub_domain: Some("Web Development".to_string()),
                projects: "github.com/x".to_string(),
            },
            commitment: CommitmentInfo {
                liked_senior: "The design lead".to_string(),
                commitment_rating: 7,
                commitment_justification: "Weekends free".to_string(),
            },
            status: SubmissionStatus::Submitted,
            reviewed_by: None,
            reviewed_at: None,
            notes: None,
            submitted_at: Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_search_matches_name_reg_and_email() {
        let rows = vec![
            row("Rahul Kumar", "25BCE0001", "rahul@vitstudent.ac.in"),
            row("Priya S", "25BEC0042", "priya@vitstudent.ac.in"),
        ];
        assert_eq!(search_rows(&rows, "rahul").len(), 1);
        assert_eq!(search_rows(&rows, "25bec").len(), 1);
        assert_eq!(search_rows(&rows, "priya@").len(), 1);
        assert_eq!(search_rows(&rows, "vitstudent").len(), 2);
        assert_eq!(search_rows(&rows, "nobody").len(), 0);
    }

    #[test]
    fn test_search_empty_term_selects_everything() {
        let rows = vec![
            row("Rahul Kumar", "25BCE0001", "rahul@vitstudent.ac.in"),
            row("Priya S", "25BEC0042", "priya@vitstudent.ac.in"),
        ];
        assert_eq!(search_rows(&rows, "").len(), 2);
        assert_eq!(search_rows(&rows, "   ").len(), 2);
    }

    #[test]
    fn test_export_csv_header_and_row_count() {
        let rows = vec![row("Rahul Kumar", "25BCE0001", "rahul@vitstudent.ac.in")];
        let csv = export_csv(search_rows(&rows, ""));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\"Name\",\"Reg Number\""));
        assert_eq!(lines[0].matches(',').count(), CSV_HEADERS.len() - 1);
        assert!(lines[1].contains("\"25BCE0001\""));
        assert!(lines[1].contains("\"submitted\""));
    }

    #[test]
    fn test_export_csv_escapes_embedded_quotes() {
        let mut r = row("Rahul Kumar", "25BCE0001", "rahul@vitstudent.ac.in");
        r.commitment.liked_senior = "The \"web\" lead".to_string();
        let csv = export_csv([&r]);
        assert!(csv.contains("\"The \"\"web\"\" lead\""));
    }

    #[test]
    fn test_export_csv_exports_only_given_rows() {
        let rows = vec![
            row("Rahul Kumar", "25BCE0001", "rahul@vitstudent.ac.in"),
            row("Priya S", "25BEC0042", "priya@vitstudent.ac.in"),
        ];
        let filtered = search_rows(&rows, "priya");
        let csv = export_csv(filtered);
        assert!(!csv.contains("25BCE0001"));
        assert!(csv.contains("25BEC0042"));
    }

    #[test]
    fn test_export_csv_empty_subdomain_is_blank_column() {
        let mut r = row("Rahul Kumar", "25BCE0001", "rahul@vitstudent.ac.in");
        r.domain_info.domain = "Management".to_string();
        r.domain_info.sub_domain = None;
        let csv = export_csv([&r]);
        assert!(csv.contains("\"Management\",\"\",\"github.com/x\""));
    }
}
