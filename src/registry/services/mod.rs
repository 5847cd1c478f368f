//! Application services for registry records.

mod registration;

pub use registration::RegistrationService;
