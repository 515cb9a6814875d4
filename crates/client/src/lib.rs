//! Client-side pieces of the onboarding flow.
//!
//! This crate contains:
//! - The in-progress form state container and its validation pass
//! - The debounced autosave bridge and draft stores
//! - The HTTP clients for submission and the admin dashboard
//! - Dashboard helpers: client-side search and CSV export

pub mod api_client;
pub mod autosave;
pub mod dashboard;
pub mod form;
