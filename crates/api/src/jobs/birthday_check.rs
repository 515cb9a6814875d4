//! Daily in-process birthday check.
//!
//! Runs the same logic as POST /api/cron/check-birthday for deployments
//! without an external scheduler.

use persistence::repositories::SubmissionRepository;
use tracing::info;

use crate::jobs::scheduler::{Job, JobFrequency};
use crate::services::{run_birthday_check, EmailService};

pub struct BirthdayCheckJob {
    repo: SubmissionRepository,
    email: EmailService,
}

impl BirthdayCheckJob {
    pub fn new(repo: SubmissionRepository, email: EmailService) -> Self {
        Self { repo, email }
    }
}

#[async_trait::async_trait]
impl Job for BirthdayCheckJob {
    fn name(&self) -> &'static str {
        "birthday_check"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        let results = run_birthday_check(&self.repo, &self.email)
            .await
            .map_err(|err| err.to_string())?;
        info!(birthdays = results.len(), "Birthday check completed");
        Ok(())
    }
}
