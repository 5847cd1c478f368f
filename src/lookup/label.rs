//! Deterministic display labels for selection lists.

use crate::registry::domain::{Branch, Category, Company, Subcategory, User};
use crate::task::domain::Task;

/// Placeholder rendered for a reference the task does not have.
pub const MISSING_REFERENCE: &str = "-";

/// A record that can be shown as one line in a selection list.
pub trait SelectionLabel {
    /// Renders the label; equal records render equal labels.
    fn selection_label(&self) -> String;
}

impl SelectionLabel for Company {
    fn selection_label(&self) -> String {
        format!("{} ({})", self.legal_name, self.tax_id)
    }
}

impl SelectionLabel for Branch {
    fn selection_label(&self) -> String {
        format!("{} - {}/{}", self.tax_id, self.municipality, self.state)
    }
}

impl SelectionLabel for Category {
    fn selection_label(&self) -> String {
        self.name.clone()
    }
}

impl SelectionLabel for Subcategory {
    fn selection_label(&self) -> String {
        self.name.clone()
    }
}

impl SelectionLabel for User {
    fn selection_label(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

/// A pending task joined with the display fields of its references.
#[derive(Debug, Clone, Copy)]
pub struct TaskLabelView<'a> {
    /// The task being labelled.
    pub task: &'a Task,
    /// Tax id of the task's branch, when it has one.
    pub branch_tax_id: Option<&'a str>,
    /// Name of the task's subcategory, when it has one.
    pub subcategory_name: Option<&'a str>,
}

impl SelectionLabel for TaskLabelView<'_> {
    fn selection_label(&self) -> String {
        format!(
            "{} - {} ({}, {})",
            self.task.title(),
            self.task.due_date().format("%Y-%m-%d"),
            self.branch_tax_id.unwrap_or(MISSING_REFERENCE),
            self.subcategory_name.unwrap_or(MISSING_REFERENCE),
        )
    }
}
