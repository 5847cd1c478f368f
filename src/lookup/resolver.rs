//! Resolution of selection labels back to record identifiers.

use super::label::{SelectionLabel, TaskLabelView};
use crate::registry::{
    domain::{BranchId, CategoryId, CompanyId, SubcategoryId, UserId},
    ports::{RegistryRepository, RegistryRepositoryError},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Selection lists offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    /// Companies, labelled `legal_name (tax_id)`.
    Company,
    /// Branches, labelled `tax_id - municipality/state`.
    Branch,
    /// Categories, labelled by name.
    Category,
    /// Subcategories, labelled by name.
    Subcategory,
    /// Users, labelled `name <email>`.
    User,
    /// Pending tasks, labelled `title - due_date (branch, subcategory)`.
    PendingTask,
}

impl LookupKind {
    /// Returns the lowercase kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Branch => "branch",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::User => "user",
            Self::PendingTask => "pending_task",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of any record that can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RecordId {
    /// A company.
    Company(CompanyId),
    /// A branch.
    Branch(BranchId),
    /// A category.
    Category(CategoryId),
    /// A subcategory.
    Subcategory(SubcategoryId),
    /// A user.
    User(UserId),
    /// A task.
    Task(TaskId),
}

impl RecordId {
    /// Returns the raw row identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Self::Company(id) => id.value(),
            Self::Branch(id) => id.value(),
            Self::Category(id) => id.value(),
            Self::Subcategory(id) => id.value(),
            Self::User(id) => id.value(),
            Self::Task(id) => id.value(),
        }
    }
}

/// One entry of a selection list, carrying its identifier with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOption<I> {
    /// Identifier of the record.
    pub id: I,
    /// Rendered label.
    pub label: String,
}

impl<I> SelectionOption<I> {
    /// Builds an option from a labelled record.
    pub fn new(id: I, record: &impl SelectionLabel) -> Self {
        Self {
            id,
            label: record.selection_label(),
        }
    }
}

/// Errors returned by label resolution.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No record renders the label.
    #[error("no {kind} matches '{label}'")]
    NotFound {
        /// Selection list searched.
        kind: LookupKind,
        /// Label submitted.
        label: String,
    },
    /// Several records render the same label.
    #[error("{matches} {kind} records match '{label}'")]
    Ambiguous {
        /// Selection list searched.
        kind: LookupKind,
        /// Label submitted.
        label: String,
        /// Number of records rendering the label.
        matches: usize,
    },
    /// Registry query failed.
    #[error(transparent)]
    Registry(#[from] RegistryRepositoryError),
    /// Task query failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Returns the identifier of the single option labelled `label`.
///
/// # Errors
///
/// Returns [`LookupError::NotFound`] when no option matches and
/// [`LookupError::Ambiguous`] when more than one does.
pub fn resolve_label<I: Copy>(
    kind: LookupKind,
    options: &[SelectionOption<I>],
    label: &str,
) -> LookupResult<I> {
    let mut matches = options.iter().filter(|option| option.label == label);
    let Some(first) = matches.next() else {
        return Err(LookupError::NotFound {
            kind,
            label: label.to_owned(),
        });
    };
    let extra = matches.count();
    if extra > 0 {
        return Err(LookupError::Ambiguous {
            kind,
            label: label.to_owned(),
            matches: extra + 1,
        });
    }
    Ok(first.id)
}

/// Builds selection lists and resolves labels against the stores.
#[derive(Clone)]
pub struct LookupResolver<R, T>
where
    R: RegistryRepository,
    T: TaskRepository,
{
    registry: Arc<R>,
    tasks: Arc<T>,
}

impl<R, T> LookupResolver<R, T>
where
    R: RegistryRepository,
    T: TaskRepository,
{
    /// Creates a resolver over the given repositories.
    #[must_use]
    pub const fn new(registry: Arc<R>, tasks: Arc<T>) -> Self {
        Self { registry, tasks }
    }

    /// Returns the selection list for `kind` in identifier order
    /// (due date order for pending tasks).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Registry`] or [`LookupError::Task`] when a
    /// query fails.
    pub async fn options(&self, kind: LookupKind) -> LookupResult<Vec<SelectionOption<RecordId>>> {
        let options = match kind {
            LookupKind::Company => erase(self.company_options().await?, RecordId::Company),
            LookupKind::Branch => erase(self.branch_options().await?, RecordId::Branch),
            LookupKind::Category => erase(self.category_options().await?, RecordId::Category),
            LookupKind::Subcategory => {
                erase(self.subcategory_options().await?, RecordId::Subcategory)
            }
            LookupKind::User => erase(self.user_options().await?, RecordId::User),
            LookupKind::PendingTask => erase(self.pending_task_options().await?, RecordId::Task),
        };
        Ok(options)
    }

    /// Resolves `label` within the selection list for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] on zero matches,
    /// [`LookupError::Ambiguous`] on several.
    pub async fn resolve(&self, kind: LookupKind, label: &str) -> LookupResult<RecordId> {
        let options = self.options(kind).await?;
        traced(kind, label, resolve_label(kind, &options, label))
    }

    /// Resolves a company label.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_company(&self, label: &str) -> LookupResult<CompanyId> {
        let kind = LookupKind::Company;
        traced(kind, label, resolve_label(kind, &self.company_options().await?, label))
    }

    /// Resolves a branch label.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_branch(&self, label: &str) -> LookupResult<BranchId> {
        let kind = LookupKind::Branch;
        traced(kind, label, resolve_label(kind, &self.branch_options().await?, label))
    }

    /// Resolves a category label.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_category(&self, label: &str) -> LookupResult<CategoryId> {
        let kind = LookupKind::Category;
        traced(kind, label, resolve_label(kind, &self.category_options().await?, label))
    }

    /// Resolves a subcategory label.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_subcategory(&self, label: &str) -> LookupResult<SubcategoryId> {
        let kind = LookupKind::Subcategory;
        traced(kind, label, resolve_label(kind, &self.subcategory_options().await?, label))
    }

    /// Resolves a user label.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_user(&self, label: &str) -> LookupResult<UserId> {
        let kind = LookupKind::User;
        traced(kind, label, resolve_label(kind, &self.user_options().await?, label))
    }

    /// Resolves a pending-task label.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_pending_task(&self, label: &str) -> LookupResult<TaskId> {
        let kind = LookupKind::PendingTask;
        traced(kind, label, resolve_label(kind, &self.pending_task_options().await?, label))
    }

    async fn company_options(&self) -> LookupResult<Vec<SelectionOption<CompanyId>>> {
        let companies = self.registry.list_companies().await?;
        Ok(companies.iter().map(|c| SelectionOption::new(c.id, c)).collect())
    }

    async fn branch_options(&self) -> LookupResult<Vec<SelectionOption<BranchId>>> {
        let branches = self.registry.list_branches().await?;
        Ok(branches.iter().map(|b| SelectionOption::new(b.id, b)).collect())
    }

    async fn category_options(&self) -> LookupResult<Vec<SelectionOption<CategoryId>>> {
        let categories = self.registry.list_categories().await?;
        Ok(categories.iter().map(|c| SelectionOption::new(c.id, c)).collect())
    }

    async fn subcategory_options(&self) -> LookupResult<Vec<SelectionOption<SubcategoryId>>> {
        let subcategories = self.registry.list_subcategories().await?;
        Ok(subcategories.iter().map(|s| SelectionOption::new(s.id, s)).collect())
    }

    async fn user_options(&self) -> LookupResult<Vec<SelectionOption<UserId>>> {
        let users = self.registry.list_users().await?;
        Ok(users.iter().map(|u| SelectionOption::new(u.id, u)).collect())
    }

    async fn pending_task_options(&self) -> LookupResult<Vec<SelectionOption<TaskId>>> {
        let pending = self.tasks.list_pending().await?;
        let branch_tax_ids: HashMap<_, _> = self
            .registry
            .list_branches()
            .await?
            .into_iter()
            .map(|b| (b.id, b.tax_id))
            .collect();
        let subcategory_names: HashMap<_, _> = self
            .registry
            .list_subcategories()
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        Ok(pending
            .iter()
            .map(|task| {
                let view = TaskLabelView {
                    task,
                    branch_tax_id: task
                        .branch_id()
                        .and_then(|id| branch_tax_ids.get(&id))
                        .map(String::as_str),
                    subcategory_name: task
                        .subcategory_id()
                        .and_then(|id| subcategory_names.get(&id))
                        .map(String::as_str),
                };
                SelectionOption::new(task.id(), &view)
            })
            .collect())
    }
}

fn erase<I>(
    options: Vec<SelectionOption<I>>,
    wrap: impl Fn(I) -> RecordId,
) -> Vec<SelectionOption<RecordId>> {
    options
        .into_iter()
        .map(|option| SelectionOption {
            id: wrap(option.id),
            label: option.label,
        })
        .collect()
}

fn traced<I: fmt::Debug>(
    kind: LookupKind,
    label: &str,
    result: LookupResult<I>,
) -> LookupResult<I> {
    match &result {
        Ok(id) => debug!(%kind, label, ?id, "label resolved"),
        Err(err) => debug!(%kind, label, error = %err, "label not resolved"),
    }
    result
}
