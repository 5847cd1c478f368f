//! Registration service for registry records.

use crate::registry::{
    domain::{
        Branch, BranchId, Category, CategoryId, Company, CompanyId, NewBranch, NewCategory,
        NewCompany, NewSubcategory, NewUser, Periodicity, Subcategory, SubcategoryId, User, UserId,
    },
    ports::{RegistryRepository, RegistryRepositoryResult},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Registers and lists companies, branches, categories, subcategories and
/// users.
///
/// Text fields are trimmed before they reach the repository so that
/// uniqueness is judged on the visible value.
#[derive(Clone)]
pub struct RegistrationService<R>
where
    R: RegistryRepository,
{
    repository: Arc<R>,
}

impl<R> RegistrationService<R>
where
    R: RegistryRepository,
{
    /// Creates a new registration service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a company.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKey`](crate::registry::ports::RegistryRepositoryError::DuplicateKey)
    /// when the tax id is already registered.
    pub async fn register_company(
        &self,
        legal_name: &str,
        tax_id: &str,
    ) -> RegistryRepositoryResult<Company> {
        let draft = NewCompany {
            legal_name: legal_name.trim().to_owned(),
            tax_id: tax_id.trim().to_owned(),
        };
        let company = self
            .repository
            .insert_company(&draft)
            .await
            .inspect_err(|err| warn!(error = %err, "company registration rejected"))?;
        info!(company_id = %company.id, tax_id = %company.tax_id, "company registered");
        Ok(company)
    }

    /// Registers a branch of an existing company.
    ///
    /// # Errors
    ///
    /// Returns `DanglingReference` for an unknown company and `DuplicateKey`
    /// for a branch tax id that is already registered.
    pub async fn register_branch(
        &self,
        company_id: CompanyId,
        tax_id: &str,
        municipality: &str,
        state: &str,
    ) -> RegistryRepositoryResult<Branch> {
        let draft = NewBranch {
            company_id,
            tax_id: tax_id.trim().to_owned(),
            municipality: municipality.trim().to_owned(),
            state: state.trim().to_owned(),
        };
        let branch = self
            .repository
            .insert_branch(&draft)
            .await
            .inspect_err(|err| warn!(error = %err, "branch registration rejected"))?;
        info!(branch_id = %branch.id, %company_id, "branch registered");
        Ok(branch)
    }

    /// Registers a category.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` when the name is already registered.
    pub async fn register_category(&self, name: &str) -> RegistryRepositoryResult<Category> {
        let draft = NewCategory {
            name: name.trim().to_owned(),
        };
        let category = self
            .repository
            .insert_category(&draft)
            .await
            .inspect_err(|err| warn!(error = %err, "category registration rejected"))?;
        info!(category_id = %category.id, "category registered");
        Ok(category)
    }

    /// Registers a subcategory under an existing category.
    ///
    /// # Errors
    ///
    /// Returns `DanglingReference` for an unknown category.
    pub async fn register_subcategory(
        &self,
        category_id: CategoryId,
        name: &str,
        periodicity: Periodicity,
    ) -> RegistryRepositoryResult<Subcategory> {
        let draft = NewSubcategory {
            category_id,
            name: name.trim().to_owned(),
            periodicity,
        };
        let subcategory = self
            .repository
            .insert_subcategory(&draft)
            .await
            .inspect_err(|err| warn!(error = %err, "subcategory registration rejected"))?;
        info!(subcategory_id = %subcategory.id, %category_id, "subcategory registered");
        Ok(subcategory)
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` when the email is already registered.
    pub async fn register_user(&self, name: &str, email: &str) -> RegistryRepositoryResult<User> {
        let draft = NewUser {
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
        };
        let user = self
            .repository
            .insert_user(&draft)
            .await
            .inspect_err(|err| warn!(error = %err, "user registration rejected"))?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Lists registered companies.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn companies(&self) -> RegistryRepositoryResult<Vec<Company>> {
        self.repository.list_companies().await
    }

    /// Lists registered branches.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn branches(&self) -> RegistryRepositoryResult<Vec<Branch>> {
        self.repository.list_branches().await
    }

    /// Lists registered categories.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn categories(&self) -> RegistryRepositoryResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    /// Lists registered subcategories.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn subcategories(&self) -> RegistryRepositoryResult<Vec<Subcategory>> {
        self.repository.list_subcategories().await
    }

    /// Lists registered users.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn users(&self) -> RegistryRepositoryResult<Vec<User>> {
        self.repository.list_users().await
    }

    /// Looks up a company by identifier.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn company(&self, id: CompanyId) -> RegistryRepositoryResult<Option<Company>> {
        self.repository.find_company(id).await
    }

    /// Looks up a branch by identifier.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn branch(&self, id: BranchId) -> RegistryRepositoryResult<Option<Branch>> {
        self.repository.find_branch(id).await
    }

    /// Looks up a category by identifier.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn category(&self, id: CategoryId) -> RegistryRepositoryResult<Option<Category>> {
        self.repository.find_category(id).await
    }

    /// Looks up a subcategory by identifier.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails or the stored
    /// periodicity does not decode.
    pub async fn subcategory(
        &self,
        id: SubcategoryId,
    ) -> RegistryRepositoryResult<Option<Subcategory>> {
        self.repository.find_subcategory(id).await
    }

    /// Looks up a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the query fails.
    pub async fn user(&self, id: UserId) -> RegistryRepositoryResult<Option<User>> {
        self.repository.find_user(id).await
    }
}
