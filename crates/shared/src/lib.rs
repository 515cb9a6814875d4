//! Shared utilities and common types for the onboarding backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Field-level validation rules for member submissions
//! - Offset-based pagination math
//! - Secret comparison helpers

pub mod crypto;
pub mod pagination;
pub mod validation;
