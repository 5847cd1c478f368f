//! Field projections for the calendar, timeline and spreadsheet views.

use crate::task::domain::Task;
use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A column that a view can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Task identifier.
    Id,
    /// Task title.
    Title,
    /// Subtask text.
    Subtask,
    /// Hierarchy level.
    Level,
    /// Assigned people.
    Assignees,
    /// Competence month.
    Competence,
    /// Lifecycle status.
    Status,
    /// Owning branch identifier.
    Branch,
    /// Subcategory identifier.
    Subcategory,
    /// Creation timestamp.
    CreatedAt,
    /// Due date.
    DueDate,
    /// Completion timestamp.
    CompletedAt,
}

impl TaskField {
    /// Returns the column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Subtask => "subtask",
            Self::Level => "level",
            Self::Assignees => "assignees",
            Self::Competence => "competence",
            Self::Status => "status",
            Self::Branch => "branch",
            Self::Subcategory => "subcategory",
            Self::CreatedAt => "created_at",
            Self::DueDate => "due_date",
            Self::CompletedAt => "completed_at",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of one projected column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The record has no value for this column.
    Empty,
    /// An identifier.
    Integer(i64),
    /// Free text.
    Text(String),
    /// An ordered list of names.
    List(Vec<String>),
    /// A calendar date.
    Date(NaiveDate),
    /// A point in time.
    Timestamp(DateTime<Utc>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::List(values) => f.write_str(&values.join(", ")),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Timestamp(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M")),
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Timestamp(at)
    }
}

/// A record that views can project column by column.
pub trait Projectable {
    /// Every column the record carries, in spreadsheet order.
    const FIELDS: &'static [TaskField];

    /// Returns the value of `field`, or [`FieldValue::Empty`] when the
    /// record has no such column.
    fn field_value(&self, field: TaskField) -> FieldValue;
}

impl Projectable for Task {
    const FIELDS: &'static [TaskField] = &[
        TaskField::Id,
        TaskField::Title,
        TaskField::DueDate,
        TaskField::Branch,
        TaskField::Subcategory,
        TaskField::Status,
        TaskField::CreatedAt,
        TaskField::CompletedAt,
    ];

    fn field_value(&self, field: TaskField) -> FieldValue {
        match field {
            TaskField::Id => FieldValue::Integer(self.id().value()),
            TaskField::Title => FieldValue::Text(self.title().to_owned()),
            TaskField::Status => FieldValue::Text(self.status().as_str().to_owned()),
            TaskField::Branch => self.branch_id().map(|id| FieldValue::Integer(id.value())).into(),
            TaskField::Subcategory => self
                .subcategory_id()
                .map(|id| FieldValue::Integer(id.value()))
                .into(),
            TaskField::CreatedAt => self.created_at().into(),
            TaskField::DueDate => self.due_date().into(),
            TaskField::CompletedAt => self.completed_at().into(),
            TaskField::Subtask
            | TaskField::Level
            | TaskField::Assignees
            | TaskField::Competence => FieldValue::Empty,
        }
    }
}

/// One projected row, holding the requested columns in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRecord {
    fields: Vec<(TaskField, FieldValue)>,
}

impl ProjectedRecord {
    /// Returns the value projected for `field`, if it was requested.
    #[must_use]
    pub fn get(&self, field: TaskField) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value)
    }

    /// Returns the projected columns in request order.
    #[must_use]
    pub fn fields(&self) -> &[(TaskField, FieldValue)] {
        &self.fields
    }

    /// Returns the number of projected columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no column was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ProjectedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

/// Projects every task onto `fields`.
///
/// Rows keep the task order and no task is filtered out. A field listed
/// twice is projected once.
#[must_use]
pub fn project<T: Projectable>(tasks: &[T], fields: &[TaskField]) -> Vec<ProjectedRecord> {
    let mut columns: Vec<TaskField> = Vec::with_capacity(fields.len());
    for field in fields {
        if !columns.contains(field) {
            columns.push(*field);
        }
    }

    tasks
        .iter()
        .map(|task| ProjectedRecord {
            fields: columns
                .iter()
                .map(|field| (*field, task.field_value(*field)))
                .collect(),
        })
        .collect()
}

/// Column presets of the tabular views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    /// Title, competence month and due date.
    Calendar,
    /// Title, creation time and due date.
    Timeline,
    /// Every column of the record.
    Spreadsheet,
}

impl ViewPreset {
    const CALENDAR: &'static [TaskField] =
        &[TaskField::Title, TaskField::Competence, TaskField::DueDate];
    const TIMELINE: &'static [TaskField] =
        &[TaskField::Title, TaskField::CreatedAt, TaskField::DueDate];

    /// Returns the preset's columns for records of type `T`.
    #[must_use]
    pub const fn fields<T: Projectable>(self) -> &'static [TaskField] {
        match self {
            Self::Calendar => Self::CALENDAR,
            Self::Timeline => Self::TIMELINE,
            Self::Spreadsheet => T::FIELDS,
        }
    }

    /// Projects `tasks` onto the preset's columns.
    #[must_use]
    pub fn project<T: Projectable>(self, tasks: &[T]) -> Vec<ProjectedRecord> {
        project(tasks, self.fields::<T>())
    }
}
