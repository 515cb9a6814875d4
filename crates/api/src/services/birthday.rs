//! Birthday check: match stored birthdates against today's date in IST and
//! dispatch member and board notifications.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::Serialize;
use tracing::info;

use domain::models::Submission;
use persistence::repositories::SubmissionRepository;

use crate::services::email::EmailService;

/// IST is UTC+5:30.
const IST_OFFSET_MINUTES: i64 = 330;

/// Per-member outcome of a birthday check run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayEmailResult {
    pub name: String,
    pub member_email_sent: bool,
    pub board_email_sent: bool,
}

/// The (month, day) of `now` shifted into IST.
pub fn ist_month_day(now: DateTime<Utc>) -> (u32, u32) {
    let ist = now + Duration::minutes(IST_OFFSET_MINUTES);
    (ist.month(), ist.day())
}

/// Find today's birthdays and send both notifications per member.
///
/// Send failures are recorded per member rather than aborting the run.
pub async fn run_birthday_check(
    repo: &SubmissionRepository,
    email: &EmailService,
) -> Result<Vec<BirthdayEmailResult>, sqlx::Error> {
    let (month, day) = ist_month_day(Utc::now());
    let members = repo.find_by_birthday(month, day).await?;
    info!(count = members.len(), month, day, "Found birthdays today");

    let mut results = Vec::with_capacity(members.len());
    for entity in members {
        let member: Submission = entity.into();
        let member_email_sent = email.send_birthday_email(&member).await.is_ok();
        let board_email_sent = email.send_board_notification(&member).await.is_ok();
        results.push(BirthdayEmailResult {
            name: member.personal_info.name,
            member_email_sent,
            board_email_sent,
        });
    }

    Ok(results)
}
