//! Domain models for member onboarding.

pub mod submission;
pub mod taxonomy;

pub use submission::{
    validate_request, CommitmentInfo, CreateSubmissionRequest, DomainInfo, Gender, ListFilter,
    PersonalInfo, ReviewUpdate, Submission, SubmissionQuery, SubmissionStatus,
    UpdateSubmissionRequest,
};
pub use taxonomy::{domain_options, find_domain, DomainOption};
