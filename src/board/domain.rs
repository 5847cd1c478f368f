//! Board card types.

use crate::task::domain::TaskStatus;
use crate::views::{BoardCard, FieldValue, Projectable, TaskField};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position of a card on its board, counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SimpleTaskId(u32);

impl SimpleTaskId {
    /// Wraps a board position.
    #[must_use]
    pub const fn new(position: u32) -> Self {
        Self(position)
    }

    /// Returns the board position.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<SimpleTaskId> for i64 {
    fn from(id: SimpleTaskId) -> Self {
        Self::from(id.0)
    }
}

impl fmt::Display for SimpleTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned while parsing a task level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task level: {0}")]
pub struct ParseTaskLevelError(pub String);

/// Where a card sits in the task hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskLevel {
    /// Top-level task.
    #[default]
    Main,
    /// First-level subtask.
    Level1,
    /// Second-level subtask.
    Level2,
}

impl TaskLevel {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Level1 => "level1",
            Self::Level2 => "level2",
        }
    }
}

impl FromStr for TaskLevel {
    type Err = ParseTaskLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace(['_', ' '], "").as_str() {
            "main" => Ok(Self::Main),
            "level1" => Ok(Self::Level1),
            "level2" => Ok(Self::Level2),
            _ => Err(ParseTaskLevelError(value.to_owned())),
        }
    }
}

/// Error returned for an invalid competence month.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid competence month: {0}")]
pub struct ParseCompetenceError(pub String);

/// Accounting month a card belongs to, shown as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompetenceMonth {
    year: i32,
    month: u32,
}

impl CompetenceMonth {
    /// Builds a competence month.
    ///
    /// # Errors
    ///
    /// Returns [`ParseCompetenceError`] when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, ParseCompetenceError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(ParseCompetenceError(format!("{year}-{month}")))
        }
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Returns the month, from 1.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for CompetenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for CompetenceMonth {
    type Err = ParseCompetenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCompetenceError(value.to_owned());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let parsed_year = year.parse::<i32>().map_err(|_| invalid())?;
        let parsed_month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(parsed_year, parsed_month).map_err(|_| invalid())
    }
}

impl Serialize for CompetenceMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Draft of a board card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSimpleTask {
    /// Card title.
    pub title: String,
    /// Optional subtask text.
    pub subtask: Option<String>,
    /// Hierarchy level.
    pub level: TaskLevel,
    /// People responsible for the card.
    pub assignees: BTreeSet<String>,
    /// Competence month.
    pub competence: CompetenceMonth,
    /// Initial column.
    pub status: TaskStatus,
    /// Due date.
    pub due_date: NaiveDate,
}

impl NewSimpleTask {
    /// Creates a pending, top-level draft with no assignees.
    #[must_use]
    pub fn new(title: impl Into<String>, competence: CompetenceMonth, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            subtask: None,
            level: TaskLevel::Main,
            assignees: BTreeSet::new(),
            competence,
            status: TaskStatus::Pending,
            due_date,
        }
    }

    /// Sets the subtask text; blank text clears it.
    #[must_use]
    pub fn with_subtask(mut self, subtask: &str) -> Self {
        let trimmed = subtask.trim();
        self.subtask = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Sets the hierarchy level.
    #[must_use]
    pub const fn with_level(mut self, level: TaskLevel) -> Self {
        self.level = level;
        self
    }

    /// Adds an assignee; blank names are ignored.
    #[must_use]
    pub fn with_assignee(mut self, name: &str) -> Self {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.assignees.insert(trimmed.to_owned());
        }
        self
    }

    /// Sets the initial column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// A card on a session board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleTask {
    id: SimpleTaskId,
    title: String,
    subtask: Option<String>,
    level: TaskLevel,
    assignees: BTreeSet<String>,
    competence: CompetenceMonth,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    due_date: NaiveDate,
}

impl SimpleTask {
    pub(super) fn from_draft(
        id: SimpleTaskId,
        draft: NewSimpleTask,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            subtask: draft.subtask,
            level: draft.level,
            assignees: draft.assignees,
            competence: draft.competence,
            status: draft.status,
            created_at,
            due_date: draft.due_date,
        }
    }

    pub(super) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Returns the board position.
    #[must_use]
    pub const fn id(&self) -> SimpleTaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the subtask text, if any.
    #[must_use]
    pub fn subtask(&self) -> Option<&str> {
        self.subtask.as_deref()
    }

    /// Returns the hierarchy level.
    #[must_use]
    pub const fn level(&self) -> TaskLevel {
        self.level
    }

    /// Returns the assignees in name order.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<String> {
        &self.assignees
    }

    /// Returns the competence month.
    #[must_use]
    pub const fn competence(&self) -> CompetenceMonth {
        self.competence
    }

    /// Returns the current column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns when the card was added.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }
}

impl BoardCard for SimpleTask {
    type Id = SimpleTaskId;

    fn card_id(&self) -> SimpleTaskId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> TaskStatus {
        self.status
    }

    fn due_date(&self) -> NaiveDate {
        self.due_date
    }
}

impl Projectable for SimpleTask {
    const FIELDS: &'static [TaskField] = &[
        TaskField::Id,
        TaskField::Title,
        TaskField::Subtask,
        TaskField::Level,
        TaskField::Assignees,
        TaskField::Competence,
        TaskField::Status,
        TaskField::CreatedAt,
        TaskField::DueDate,
    ];

    fn field_value(&self, field: TaskField) -> FieldValue {
        match field {
            TaskField::Id => FieldValue::Integer(self.id.into()),
            TaskField::Title => FieldValue::Text(self.title.clone()),
            TaskField::Subtask => self.subtask.clone().map(FieldValue::Text).into(),
            TaskField::Level => FieldValue::Text(self.level.as_str().to_owned()),
            TaskField::Assignees => FieldValue::List(self.assignees.iter().cloned().collect()),
            TaskField::Competence => FieldValue::Text(self.competence.to_string()),
            TaskField::Status => FieldValue::Text(self.status.as_str().to_owned()),
            TaskField::CreatedAt => self.created_at.into(),
            TaskField::DueDate => self.due_date.into(),
            TaskField::Branch | TaskField::Subcategory | TaskField::CompletedAt => {
                FieldValue::Empty
            }
        }
    }
}
