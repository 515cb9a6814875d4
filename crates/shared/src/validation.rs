//! Field-level validation rules for member submissions.
//!
//! Each rule mirrors the constraints enforced by the onboarding form and is
//! reused both by the client-side validation pass and by the API handlers.

use chrono::{Datelike, NaiveDate, Utc};
use validator::ValidationError;

/// Minimum age (in years) implied by the date of birth.
const MIN_AGE_YEARS: u32 = 16;

lazy_static::lazy_static! {
    static ref REG_NUMBER_REGEX: regex::Regex =
        regex::Regex::new(r"^(?i)(24|25)[A-Z]{3}[0-9]{4}$").unwrap();
    static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^[0-9]{10}$").unwrap();
    static ref VIT_EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@vitstudent\.ac\.in$").unwrap();
    static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref CGPA_REGEX: regex::Regex =
        regex::Regex::new(r"^[0-9]{1,2}\.[0-9]{2}$").unwrap();
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates a registration number (year-prefixed, e.g. 25BCE0001).
pub fn validate_reg_number(reg_number: &str) -> Result<(), ValidationError> {
    if REG_NUMBER_REGEX.is_match(reg_number) {
        Ok(())
    } else {
        Err(error(
            "reg_number_format",
            "Must start with '24' or '25' (e.g., 24BCE0001)",
        ))
    }
}

/// Validates a phone number (exactly 10 digits).
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err(error("phone_format", "Must be exactly 10 digits"))
    }
}

/// Validates an institutional email address.
pub fn validate_vit_email(email: &str) -> Result<(), ValidationError> {
    if VIT_EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(error("vit_email_format", "Must end with @vitstudent.ac.in"))
    }
}

/// Validates a generic email address shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(error("email_format", "Invalid email format"))
    }
}

/// Validates a CGPA string: fixed two-decimal format, within [0, 10].
pub fn validate_cgpa(cgpa: &str) -> Result<(), ValidationError> {
    if !CGPA_REGEX.is_match(cgpa) {
        return Err(error(
            "cgpa_format",
            "CGPA must use two decimal places (e.g., 9.50)",
        ));
    }
    // The format check guarantees this parses.
    let value: f64 = cgpa.parse().map_err(|_| {
        error("cgpa_format", "CGPA must use two decimal places (e.g., 9.50)")
    })?;
    if (0.0..=10.0).contains(&value) {
        Ok(())
    } else {
        Err(error("cgpa_range", "CGPA must be between 0 and 10"))
    }
}

/// Validates a 1-10 rating.
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (1..=10).contains(&rating) {
        Ok(())
    } else {
        Err(error("rating_range", "Rating must be between 1 and 10"))
    }
}

/// Validates a date of birth against the minimum age.
pub fn validate_dob(dob: NaiveDate) -> Result<(), ValidationError> {
    validate_dob_at(dob, Utc::now().date_naive())
}

/// Validates a date of birth against the minimum age as of `today`.
pub fn validate_dob_at(dob: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if dob >= today {
        return Err(error("dob_future", "Date of birth must be in the past"));
    }
    let cutoff = dob
        .checked_add_months(chrono::Months::new(MIN_AGE_YEARS * 12))
        .unwrap_or(NaiveDate::MAX);
    if cutoff <= today {
        Ok(())
    } else {
        Err(error("dob_min_age", "Must be at least 16 years old"))
    }
}

/// Returns the trimmed value, or `None` when empty after trimming.
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
