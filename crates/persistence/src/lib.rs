//! Persistence layer for the onboarding backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - The submission repository

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
