//! Application services.

pub mod birthday;
pub mod email;

pub use birthday::{ist_month_day, run_birthday_check, BirthdayEmailResult};
pub use email::{EmailError, EmailMessage, EmailService};
