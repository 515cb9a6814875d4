//! Entity definitions (database row mappings).

pub mod submission;

pub use submission::{GenderDb, SubmissionEntity, SubmissionStatusDb};
