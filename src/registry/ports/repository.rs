//! Repository port for registry persistence and queries.

use crate::registry::domain::{
    Branch, BranchId, Category, CategoryId, Company, CompanyId, EntityKind, NewBranch,
    NewCategory, NewCompany, NewSubcategory, NewUser, Subcategory, SubcategoryId, User, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for registry repository operations.
pub type RegistryRepositoryResult<T> = Result<T, RegistryRepositoryError>;

/// Registry persistence contract.
///
/// Inserts either store the whole record or nothing. Listings are in
/// identifier order.
#[async_trait]
pub trait RegistryRepository: Send + Sync {
    /// Stores a company.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::DuplicateKey`] when the tax id is
    /// already registered to a company.
    async fn insert_company(&self, draft: &NewCompany) -> RegistryRepositoryResult<Company>;

    /// Stores a branch.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::DanglingReference`] when the
    /// company does not exist and [`RegistryRepositoryError::DuplicateKey`]
    /// when the tax id is already registered to a branch.
    async fn insert_branch(&self, draft: &NewBranch) -> RegistryRepositoryResult<Branch>;

    /// Stores a category.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::DuplicateKey`] when the name is
    /// taken.
    async fn insert_category(&self, draft: &NewCategory) -> RegistryRepositoryResult<Category>;

    /// Stores a subcategory.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::DanglingReference`] when the
    /// category does not exist.
    async fn insert_subcategory(
        &self,
        draft: &NewSubcategory,
    ) -> RegistryRepositoryResult<Subcategory>;

    /// Stores a user.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryRepositoryError::DuplicateKey`] when the email is
    /// taken.
    async fn insert_user(&self, draft: &NewUser) -> RegistryRepositoryResult<User>;

    /// Finds a company by identifier.
    async fn find_company(&self, id: CompanyId) -> RegistryRepositoryResult<Option<Company>>;

    /// Finds a branch by identifier.
    async fn find_branch(&self, id: BranchId) -> RegistryRepositoryResult<Option<Branch>>;

    /// Finds a category by identifier.
    async fn find_category(&self, id: CategoryId) -> RegistryRepositoryResult<Option<Category>>;

    /// Finds a subcategory by identifier.
    async fn find_subcategory(
        &self,
        id: SubcategoryId,
    ) -> RegistryRepositoryResult<Option<Subcategory>>;

    /// Finds a user by identifier.
    async fn find_user(&self, id: UserId) -> RegistryRepositoryResult<Option<User>>;

    /// Returns every company.
    async fn list_companies(&self) -> RegistryRepositoryResult<Vec<Company>>;

    /// Returns every branch.
    async fn list_branches(&self) -> RegistryRepositoryResult<Vec<Branch>>;

    /// Returns every category.
    async fn list_categories(&self) -> RegistryRepositoryResult<Vec<Category>>;

    /// Returns every subcategory.
    async fn list_subcategories(&self) -> RegistryRepositoryResult<Vec<Subcategory>>;

    /// Returns every user.
    async fn list_users(&self) -> RegistryRepositoryResult<Vec<User>>;
}

/// Errors returned by registry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RegistryRepositoryError {
    /// A unique field already holds the submitted value.
    #[error("{entity} with {field} '{value}' already exists")]
    DuplicateKey {
        /// Kind of record being inserted.
        entity: EntityKind,
        /// Unique field that collided.
        field: &'static str,
        /// Submitted value.
        value: String,
    },

    /// A foreign key does not resolve to an existing row.
    #[error("{entity} {field} {id} does not exist")]
    DanglingReference {
        /// Kind of record being inserted.
        entity: EntityKind,
        /// Foreign-key field that failed to resolve.
        field: &'static str,
        /// Identifier that failed to resolve.
        id: i64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
