//! Notification services.

mod reminder;

pub use reminder::{DIGEST_SUBJECT, NotificationError, NotificationService};
