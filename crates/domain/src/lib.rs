//! Domain layer for the onboarding backend.
//!
//! This crate contains:
//! - Domain models (Submission and its nested sections)
//! - The club's domain/subdomain taxonomy
//! - The explicit validation pass run before persistence

pub mod models;
