//! Diesel row models for the `SQLite` store.

use super::schema::{branches, categories, companies, subcategories, tasks, users};
use crate::registry::domain::{
    Branch, BranchId, Category, CategoryId, Company, CompanyId, ParsePeriodicityError,
    Periodicity, Subcategory, SubcategoryId, User, UserId,
};
use crate::task::domain::{ParseTaskStatusError, PersistedTaskData, Task, TaskId, TaskStatus};
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

/// Query result row for companies.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompanyRow {
    /// Row identifier.
    pub id: i64,
    /// Registered legal name.
    pub legal_name: String,
    /// Tax registration number.
    pub tax_id: String,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: CompanyId::new(row.id),
            legal_name: row.legal_name,
            tax_id: row.tax_id,
        }
    }
}

/// Insert model for companies.
#[derive(Debug, Insertable)]
#[diesel(table_name = companies)]
pub struct NewCompanyRow<'a> {
    /// Registered legal name.
    pub legal_name: &'a str,
    /// Tax registration number.
    pub tax_id: &'a str,
}

/// Query result row for branches.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = branches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BranchRow {
    /// Row identifier.
    pub id: i64,
    /// Owning company.
    pub company_id: i64,
    /// Tax registration number.
    pub tax_id: String,
    /// Municipality.
    pub municipality: String,
    /// State abbreviation.
    pub state: String,
}

impl From<BranchRow> for Branch {
    fn from(row: BranchRow) -> Self {
        Self {
            id: BranchId::new(row.id),
            company_id: CompanyId::new(row.company_id),
            tax_id: row.tax_id,
            municipality: row.municipality,
            state: row.state,
        }
    }
}

/// Insert model for branches.
#[derive(Debug, Insertable)]
#[diesel(table_name = branches)]
pub struct NewBranchRow<'a> {
    /// Owning company.
    pub company_id: i64,
    /// Tax registration number.
    pub tax_id: &'a str,
    /// Municipality.
    pub municipality: &'a str,
    /// State abbreviation.
    pub state: &'a str,
}

/// Query result row for categories.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryRow {
    /// Row identifier.
    pub id: i64,
    /// Category name.
    pub name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
        }
    }
}

/// Insert model for categories.
#[derive(Debug, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow<'a> {
    /// Category name.
    pub name: &'a str,
}

/// Query result row for subcategories.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subcategories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubcategoryRow {
    /// Row identifier.
    pub id: i64,
    /// Parent category.
    pub category_id: i64,
    /// Subcategory name.
    pub name: String,
    /// Recurrence keyword.
    pub periodicity: String,
}

impl TryFrom<SubcategoryRow> for Subcategory {
    type Error = ParsePeriodicityError;

    fn try_from(row: SubcategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SubcategoryId::new(row.id),
            category_id: CategoryId::new(row.category_id),
            periodicity: Periodicity::try_from(row.periodicity.as_str())?,
            name: row.name,
        })
    }
}

/// Insert model for subcategories.
#[derive(Debug, Insertable)]
#[diesel(table_name = subcategories)]
pub struct NewSubcategoryRow<'a> {
    /// Parent category.
    pub category_id: i64,
    /// Subcategory name.
    pub name: &'a str,
    /// Recurrence keyword.
    pub periodicity: &'a str,
}

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    /// Row identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

/// Insert model for users.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    /// Display name.
    pub name: &'a str,
    /// Email address.
    pub email: &'a str,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Row identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Optional branch reference.
    pub branch_id: Option<i64>,
    /// Optional subcategory reference.
    pub subcategory_id: Option<i64>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp (UTC, naive).
    pub created_at: NaiveDateTime,
    /// Completion timestamp (UTC, naive).
    pub completed_at: Option<NaiveDateTime>,
}

impl TryFrom<TaskRow> for Task {
    type Error = ParseTaskStatusError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::try_from(row.status.as_str())?;
        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::new(row.id),
            title: row.title,
            due_date: row.due_date,
            branch_id: row.branch_id.map(BranchId::new),
            subcategory_id: row.subcategory_id.map(SubcategoryId::new),
            status,
            created_at: row.created_at.and_utc(),
            completed_at: row.completed_at.map(|at| at.and_utc()),
        }))
    }
}

/// Insert model for tasks.
#[derive(Debug, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow<'a> {
    /// Task title.
    pub title: &'a str,
    /// Due date.
    pub due_date: NaiveDate,
    /// Optional branch reference.
    pub branch_id: Option<i64>,
    /// Optional subcategory reference.
    pub subcategory_id: Option<i64>,
    /// Lifecycle status.
    pub status: &'a str,
    /// Creation timestamp (UTC, naive).
    pub created_at: NaiveDateTime,
}
