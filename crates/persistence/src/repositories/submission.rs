//! Submission repository for database operations.

use domain::models::{CreateSubmissionRequest, ListFilter, ReviewUpdate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GenderDb, SubmissionEntity, SubmissionStatusDb};
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, reg_number, phone_number, branch_specialization, gender, dob, \
     vit_email, personal_email, other_organizations, cgpa, domain, sub_domain, projects, \
     liked_senior, commitment_rating, commitment_justification, status, reviewed_by, \
     reviewed_at, notes, submitted_at, created_at";

/// Which unique field an incoming submission collides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    RegNumber,
    VitEmail,
    PersonalEmail,
}

/// Repository for submission-related database operations.
#[derive(Clone)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    /// Creates a new SubmissionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new submission.
    ///
    /// The caller is expected to have run the validation pass and the
    /// duplicate pre-check first; a concurrent duplicate still surfaces here
    /// as a unique-violation error from the database.
    pub async fn create(
        &self,
        req: &CreateSubmissionRequest,
    ) -> Result<SubmissionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_submission");
        let sql = format!(
            r#"
            INSERT INTO submissions (
                name, reg_number, phone_number, branch_specialization, gender, dob,
                vit_email, personal_email, other_organizations, cgpa,
                domain, sub_domain, projects,
                liked_senior, commitment_rating, commitment_justification
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {COLUMNS}
            "#
        );
        let p = &req.personal_info;
        let d = &req.domain_info;
        let c = &req.commitment;
        let result = sqlx::query_as::<_, SubmissionEntity>(&sql)
            .bind(&p.name)
            .bind(&p.reg_number)
            .bind(&p.phone_number)
            .bind(&p.branch_specialization)
            .bind(GenderDb::from(p.gender))
            .bind(p.dob)
            .bind(&p.vit_email)
            .bind(&p.personal_email)
            .bind(&p.other_organizations)
            .bind(&p.cgpa)
            .bind(&d.domain)
            .bind(&d.sub_domain)
            .bind(&d.projects)
            .bind(&c.liked_senior)
            .bind(c.commitment_rating)
            .bind(&c.commitment_justification)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Pre-check which unique field (if any) an incoming submission collides
    /// on, so the handler can answer with a specific conflict message.
    pub async fn find_duplicate(
        &self,
        reg_number: &str,
        vit_email: &str,
        personal_email: &str,
    ) -> Result<Option<DuplicateField>, sqlx::Error> {
        let timer = QueryTimer::new("find_duplicate_submission");
        let row = sqlx::query_as::<_, (String, String, String)>(
            r#"
            SELECT reg_number, vit_email, personal_email
            FROM submissions
            WHERE reg_number = $1 OR vit_email = $2 OR personal_email = $3
            LIMIT 1
            "#,
        )
        .bind(reg_number)
        .bind(vit_email)
        .bind(personal_email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(row?.map(|(existing_reg, existing_vit, _)| {
            if existing_reg == reg_number {
                DuplicateField::RegNumber
            } else if existing_vit == vit_email {
                DuplicateField::VitEmail
            } else {
                DuplicateField::PersonalEmail
            }
        }))
    }

    /// Find a submission by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_submission_by_id");
        let sql = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        let result = sqlx::query_as::<_, SubmissionEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List submissions matching the filter, newest first.
    pub async fn list(
        &self,
        filter: &ListFilter,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_submissions");
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM submissions
            WHERE ($1::submission_status IS NULL OR status = $1)
              AND ($2::varchar IS NULL OR domain = $2)
            ORDER BY submitted_at DESC
            LIMIT $3 OFFSET $4
            "#
        );
        let result = sqlx::query_as::<_, SubmissionEntity>(&sql)
            .bind(filter.status.map(SubmissionStatusDb::from))
            .bind(filter.domain.as_deref())
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Count submissions matching the filter.
    pub async fn count(&self, filter: &ListFilter) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("count_submissions");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM submissions
            WHERE ($1::submission_status IS NULL OR status = $1)
              AND ($2::varchar IS NULL OR domain = $2)
            "#,
        )
        .bind(filter.status.map(SubmissionStatusDb::from))
        .bind(filter.domain.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(|count| count.max(0) as u64)
    }

    /// Apply a review update. Returns the updated row, or `None` when the
    /// ID does not resolve.
    pub async fn update_review(
        &self,
        id: Uuid,
        update: &ReviewUpdate,
    ) -> Result<Option<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_submission_review");
        let sql = format!(
            r#"
            UPDATE submissions
            SET status = COALESCE($2, status),
                reviewed_by = COALESCE($3, reviewed_by),
                notes = COALESCE($4, notes),
                reviewed_at = COALESCE($5, reviewed_at)
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, SubmissionEntity>(&sql)
            .bind(id)
            .bind(update.status.map(SubmissionStatusDb::from))
            .bind(update.reviewed_by.as_deref())
            .bind(update.notes.as_deref())
            .bind(update.reviewed_at)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete a submission by ID. Returns the number of rows removed.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_submission");
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        result.map(|r| r.rows_affected())
    }

    /// Members whose date of birth falls on the given month/day.
    pub async fn find_by_birthday(
        &self,
        month: u32,
        day: u32,
    ) -> Result<Vec<SubmissionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_submissions_by_birthday");
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM submissions
            WHERE date_part('month', dob)::int = $1
              AND date_part('day', dob)::int = $2
            "#
        );
        let result = sqlx::query_as::<_, SubmissionEntity>(&sql)
            .bind(month as i32)
            .bind(day as i32)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }
}
