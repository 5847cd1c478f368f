//! In-memory store for the registry and task ports.
//!
//! One lock guards every table, so uniqueness and reference checks run in
//! the same critical section as the insert they protect.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::{
    domain::{
        Branch, BranchId, Category, CategoryId, Company, CompanyId, EntityKind, NewBranch,
        NewCategory, NewCompany, NewSubcategory, NewUser, Subcategory, SubcategoryId, User,
        UserId,
    },
    ports::{RegistryRepository, RegistryRepositoryError, RegistryRepositoryResult},
};
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskReference, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory store.
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    companies: BTreeMap<CompanyId, Company>,
    branches: BTreeMap<BranchId, Branch>,
    categories: BTreeMap<CategoryId, Category>,
    subcategories: BTreeMap<SubcategoryId, Subcategory>,
    users: BTreeMap<UserId, User>,
    tasks: BTreeMap<TaskId, Task>,
    sequences: Sequences,
}

/// Last identifier handed out per table; identifiers are never reused.
#[derive(Debug, Default)]
struct Sequences {
    company: i64,
    branch: i64,
    category: i64,
    subcategory: i64,
    user: i64,
    task: i64,
}

fn next(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

fn poisoned(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, InMemoryState>, std::io::Error> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InMemoryState>, std::io::Error> {
        self.state.write().map_err(poisoned)
    }

    fn read_registry(&self) -> RegistryRepositoryResult<RwLockReadGuard<'_, InMemoryState>> {
        self.read().map_err(RegistryRepositoryError::persistence)
    }

    fn write_registry(&self) -> RegistryRepositoryResult<RwLockWriteGuard<'_, InMemoryState>> {
        self.write().map_err(RegistryRepositoryError::persistence)
    }
}

fn duplicate(entity: EntityKind, field: &'static str, value: &str) -> RegistryRepositoryError {
    RegistryRepositoryError::DuplicateKey {
        entity,
        field,
        value: value.to_owned(),
    }
}

#[async_trait]
impl RegistryRepository for InMemoryStore {
    async fn insert_company(&self, draft: &NewCompany) -> RegistryRepositoryResult<Company> {
        let mut state = self.write_registry()?;
        if state.companies.values().any(|c| c.tax_id == draft.tax_id) {
            return Err(duplicate(EntityKind::Company, "tax_id", &draft.tax_id));
        }

        let company = Company {
            id: CompanyId::new(next(&mut state.sequences.company)),
            legal_name: draft.legal_name.clone(),
            tax_id: draft.tax_id.clone(),
        };
        state.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn insert_branch(&self, draft: &NewBranch) -> RegistryRepositoryResult<Branch> {
        let mut state = self.write_registry()?;
        if !state.companies.contains_key(&draft.company_id) {
            return Err(RegistryRepositoryError::DanglingReference {
                entity: EntityKind::Branch,
                field: "company_id",
                id: draft.company_id.value(),
            });
        }
        if state.branches.values().any(|b| b.tax_id == draft.tax_id) {
            return Err(duplicate(EntityKind::Branch, "tax_id", &draft.tax_id));
        }

        let branch = Branch {
            id: BranchId::new(next(&mut state.sequences.branch)),
            company_id: draft.company_id,
            tax_id: draft.tax_id.clone(),
            municipality: draft.municipality.clone(),
            state: draft.state.clone(),
        };
        state.branches.insert(branch.id, branch.clone());
        Ok(branch)
    }

    async fn insert_category(&self, draft: &NewCategory) -> RegistryRepositoryResult<Category> {
        let mut state = self.write_registry()?;
        if state.categories.values().any(|c| c.name == draft.name) {
            return Err(duplicate(EntityKind::Category, "name", &draft.name));
        }

        let category = Category {
            id: CategoryId::new(next(&mut state.sequences.category)),
            name: draft.name.clone(),
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn insert_subcategory(
        &self,
        draft: &NewSubcategory,
    ) -> RegistryRepositoryResult<Subcategory> {
        let mut state = self.write_registry()?;
        if !state.categories.contains_key(&draft.category_id) {
            return Err(RegistryRepositoryError::DanglingReference {
                entity: EntityKind::Subcategory,
                field: "category_id",
                id: draft.category_id.value(),
            });
        }

        let subcategory = Subcategory {
            id: SubcategoryId::new(next(&mut state.sequences.subcategory)),
            category_id: draft.category_id,
            name: draft.name.clone(),
            periodicity: draft.periodicity,
        };
        state.subcategories.insert(subcategory.id, subcategory.clone());
        Ok(subcategory)
    }

    async fn insert_user(&self, draft: &NewUser) -> RegistryRepositoryResult<User> {
        let mut state = self.write_registry()?;
        if state.users.values().any(|u| u.email == draft.email) {
            return Err(duplicate(EntityKind::User, "email", &draft.email));
        }

        let user = User {
            id: UserId::new(next(&mut state.sequences.user)),
            name: draft.name.clone(),
            email: draft.email.clone(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_company(&self, id: CompanyId) -> RegistryRepositoryResult<Option<Company>> {
        Ok(self.read_registry()?.companies.get(&id).cloned())
    }

    async fn find_branch(&self, id: BranchId) -> RegistryRepositoryResult<Option<Branch>> {
        Ok(self.read_registry()?.branches.get(&id).cloned())
    }

    async fn find_category(&self, id: CategoryId) -> RegistryRepositoryResult<Option<Category>> {
        Ok(self.read_registry()?.categories.get(&id).cloned())
    }

    async fn find_subcategory(
        &self,
        id: SubcategoryId,
    ) -> RegistryRepositoryResult<Option<Subcategory>> {
        Ok(self.read_registry()?.subcategories.get(&id).cloned())
    }

    async fn find_user(&self, id: UserId) -> RegistryRepositoryResult<Option<User>> {
        Ok(self.read_registry()?.users.get(&id).cloned())
    }

    async fn list_companies(&self) -> RegistryRepositoryResult<Vec<Company>> {
        Ok(self.read_registry()?.companies.values().cloned().collect())
    }

    async fn list_branches(&self) -> RegistryRepositoryResult<Vec<Branch>> {
        Ok(self.read_registry()?.branches.values().cloned().collect())
    }

    async fn list_categories(&self) -> RegistryRepositoryResult<Vec<Category>> {
        Ok(self.read_registry()?.categories.values().cloned().collect())
    }

    async fn list_subcategories(&self) -> RegistryRepositoryResult<Vec<Subcategory>> {
        Ok(self.read_registry()?.subcategories.values().cloned().collect())
    }

    async fn list_users(&self) -> RegistryRepositoryResult<Vec<User>> {
        Ok(self.read_registry()?.users.values().cloned().collect())
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn insert(&self, draft: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if let Some(branch_id) = draft.branch_id
            && !state.branches.contains_key(&branch_id)
        {
            return Err(TaskRepositoryError::DanglingReference {
                field: TaskReference::Branch,
                id: branch_id.value(),
            });
        }
        if let Some(subcategory_id) = draft.subcategory_id
            && !state.subcategories.contains_key(&subcategory_id)
        {
            return Err(TaskRepositoryError::DanglingReference {
                field: TaskReference::Subcategory,
                id: subcategory_id.value(),
            });
        }

        let id = TaskId::new(next(&mut state.sequences.task));
        let task = Task::from_new(id, draft.clone());
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_status(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if stored.status() != expected {
            return Err(TaskRepositoryError::StatusConflict {
                task_id: task.id(),
                expected,
            });
        }
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn list_pending(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let mut pending: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.status() == TaskStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|task| (task.due_date(), task.id()));
        Ok(pending)
    }
}
