//! Selection lists and label resolution.
//!
//! Every registry record and pending task renders a deterministic label.
//! [`LookupResolver::options`] hands out labels together with identifiers so
//! callers can keep the id; [`LookupResolver::resolve`] maps a label back to
//! an id and refuses to guess when the label is shared.

mod label;
mod resolver;

pub use label::{MISSING_REFERENCE, SelectionLabel, TaskLabelView};
pub use resolver::{
    LookupError, LookupKind, LookupResolver, LookupResult, RecordId, SelectionOption,
    resolve_label,
};

#[cfg(test)]
mod tests;
