//! Repository implementations for database operations.

pub mod submission;

pub use submission::{DuplicateField, SubmissionRepository};
