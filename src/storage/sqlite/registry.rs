//! Registry repository over `SQLite`.

use super::{
    SqliteStore,
    models::{
        BranchRow, CategoryRow, CompanyRow, NewBranchRow, NewCategoryRow, NewCompanyRow,
        NewSubcategoryRow, NewUserRow, SubcategoryRow, UserRow,
    },
    schema::{branches, categories, companies, subcategories, users},
};
use crate::registry::{
    domain::{
        Branch, BranchId, Category, CategoryId, Company, CompanyId, EntityKind, NewBranch,
        NewCategory, NewCompany, NewSubcategory, NewUser, Subcategory, SubcategoryId, User,
        UserId,
    },
    ports::{RegistryRepository, RegistryRepositoryError, RegistryRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Constraint context used to translate a failed insert.
struct InsertGuards<'a> {
    entity: EntityKind,
    unique: Option<(&'static str, &'a str)>,
    reference: Option<(&'static str, i64)>,
}

impl InsertGuards<'_> {
    fn violation(&self, kind: &DatabaseErrorKind) -> Option<RegistryRepositoryError> {
        match kind {
            DatabaseErrorKind::UniqueViolation => {
                self.unique
                    .map(|(field, value)| RegistryRepositoryError::DuplicateKey {
                        entity: self.entity,
                        field,
                        value: value.to_owned(),
                    })
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                self.reference
                    .map(|(field, id)| RegistryRepositoryError::DanglingReference {
                        entity: self.entity,
                        field,
                        id,
                    })
            }
            _ => None,
        }
    }

    /// Builds the error for a violation detected by a pre-check.
    fn rejected(&self, kind: DatabaseErrorKind) -> RegistryRepositoryError {
        self.violation(&kind).unwrap_or_else(|| {
            RegistryRepositoryError::persistence(std::io::Error::other(format!(
                "{} insert declares no guard for {kind:?}",
                self.entity
            )))
        })
    }

    /// Maps a constraint violation that slipped past the pre-checks.
    fn translate(&self, err: DieselError) -> RegistryRepositoryError {
        let mapped = match &err {
            DieselError::DatabaseError(kind, _) => self.violation(kind),
            _ => None,
        };
        mapped.unwrap_or_else(|| RegistryRepositoryError::persistence(err))
    }
}

#[async_trait]
impl RegistryRepository for SqliteStore {
    async fn insert_company(&self, draft: &NewCompany) -> RegistryRepositoryResult<Company> {
        let company = draft.clone();
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|conn| {
                let guards = InsertGuards {
                    entity: EntityKind::Company,
                    unique: Some(("tax_id", company.tax_id.as_str())),
                    reference: None,
                };
                let taken = companies::table
                    .filter(companies::tax_id.eq(&company.tax_id))
                    .select(companies::id)
                    .first::<i64>(conn)
                    .optional()?;
                if taken.is_some() {
                    return Err(guards.rejected(DatabaseErrorKind::UniqueViolation));
                }

                let id = diesel::insert_into(companies::table)
                    .values(NewCompanyRow {
                        legal_name: &company.legal_name,
                        tax_id: &company.tax_id,
                    })
                    .returning(companies::id)
                    .get_result::<i64>(conn)
                    .map_err(|err| guards.translate(err))?;

                Ok(Company {
                    id: CompanyId::new(id),
                    legal_name: company.legal_name.clone(),
                    tax_id: company.tax_id.clone(),
                })
            })
        })
        .await
    }

    async fn insert_branch(&self, draft: &NewBranch) -> RegistryRepositoryResult<Branch> {
        let branch = draft.clone();
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|conn| {
                let guards = InsertGuards {
                    entity: EntityKind::Branch,
                    unique: Some(("tax_id", branch.tax_id.as_str())),
                    reference: Some(("company_id", branch.company_id.value())),
                };
                let company_exists = companies::table
                    .find(branch.company_id.value())
                    .select(companies::id)
                    .first::<i64>(conn)
                    .optional()?
                    .is_some();
                if !company_exists {
                    return Err(guards.rejected(DatabaseErrorKind::ForeignKeyViolation));
                }
                let taken = branches::table
                    .filter(branches::tax_id.eq(&branch.tax_id))
                    .select(branches::id)
                    .first::<i64>(conn)
                    .optional()?;
                if taken.is_some() {
                    return Err(guards.rejected(DatabaseErrorKind::UniqueViolation));
                }

                let id = diesel::insert_into(branches::table)
                    .values(NewBranchRow {
                        company_id: branch.company_id.value(),
                        tax_id: &branch.tax_id,
                        municipality: &branch.municipality,
                        state: &branch.state,
                    })
                    .returning(branches::id)
                    .get_result::<i64>(conn)
                    .map_err(|err| guards.translate(err))?;

                Ok(Branch {
                    id: BranchId::new(id),
                    company_id: branch.company_id,
                    tax_id: branch.tax_id.clone(),
                    municipality: branch.municipality.clone(),
                    state: branch.state.clone(),
                })
            })
        })
        .await
    }

    async fn insert_category(&self, draft: &NewCategory) -> RegistryRepositoryResult<Category> {
        let category = draft.clone();
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|conn| {
                let guards = InsertGuards {
                    entity: EntityKind::Category,
                    unique: Some(("name", category.name.as_str())),
                    reference: None,
                };
                let taken = categories::table
                    .filter(categories::name.eq(&category.name))
                    .select(categories::id)
                    .first::<i64>(conn)
                    .optional()?;
                if taken.is_some() {
                    return Err(guards.rejected(DatabaseErrorKind::UniqueViolation));
                }

                let id = diesel::insert_into(categories::table)
                    .values(NewCategoryRow {
                        name: &category.name,
                    })
                    .returning(categories::id)
                    .get_result::<i64>(conn)
                    .map_err(|err| guards.translate(err))?;

                Ok(Category {
                    id: CategoryId::new(id),
                    name: category.name.clone(),
                })
            })
        })
        .await
    }

    async fn insert_subcategory(
        &self,
        draft: &NewSubcategory,
    ) -> RegistryRepositoryResult<Subcategory> {
        let subcategory = draft.clone();
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|conn| {
                let guards = InsertGuards {
                    entity: EntityKind::Subcategory,
                    unique: None,
                    reference: Some(("category_id", subcategory.category_id.value())),
                };
                let category_exists = categories::table
                    .find(subcategory.category_id.value())
                    .select(categories::id)
                    .first::<i64>(conn)
                    .optional()?
                    .is_some();
                if !category_exists {
                    return Err(guards.rejected(DatabaseErrorKind::ForeignKeyViolation));
                }

                let id = diesel::insert_into(subcategories::table)
                    .values(NewSubcategoryRow {
                        category_id: subcategory.category_id.value(),
                        name: &subcategory.name,
                        periodicity: subcategory.periodicity.as_str(),
                    })
                    .returning(subcategories::id)
                    .get_result::<i64>(conn)
                    .map_err(|err| guards.translate(err))?;

                Ok(Subcategory {
                    id: SubcategoryId::new(id),
                    category_id: subcategory.category_id,
                    name: subcategory.name.clone(),
                    periodicity: subcategory.periodicity,
                })
            })
        })
        .await
    }

    async fn insert_user(&self, draft: &NewUser) -> RegistryRepositoryResult<User> {
        let user = draft.clone();
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|conn| {
                let guards = InsertGuards {
                    entity: EntityKind::User,
                    unique: Some(("email", user.email.as_str())),
                    reference: None,
                };
                let taken = users::table
                    .filter(users::email.eq(&user.email))
                    .select(users::id)
                    .first::<i64>(conn)
                    .optional()?;
                if taken.is_some() {
                    return Err(guards.rejected(DatabaseErrorKind::UniqueViolation));
                }

                let id = diesel::insert_into(users::table)
                    .values(NewUserRow {
                        name: &user.name,
                        email: &user.email,
                    })
                    .returning(users::id)
                    .get_result::<i64>(conn)
                    .map_err(|err| guards.translate(err))?;

                Ok(User {
                    id: UserId::new(id),
                    name: user.name.clone(),
                    email: user.email.clone(),
                })
            })
        })
        .await
    }

    async fn find_company(&self, id: CompanyId) -> RegistryRepositoryResult<Option<Company>> {
        self.run_blocking(move |conn| {
            let row = companies::table
                .find(id.value())
                .select(CompanyRow::as_select())
                .first::<CompanyRow>(conn)
                .optional()?;
            Ok(row.map(Company::from))
        })
        .await
    }

    async fn find_branch(&self, id: BranchId) -> RegistryRepositoryResult<Option<Branch>> {
        self.run_blocking(move |conn| {
            let row = branches::table
                .find(id.value())
                .select(BranchRow::as_select())
                .first::<BranchRow>(conn)
                .optional()?;
            Ok(row.map(Branch::from))
        })
        .await
    }

    async fn find_category(&self, id: CategoryId) -> RegistryRepositoryResult<Option<Category>> {
        self.run_blocking(move |conn| {
            let row = categories::table
                .find(id.value())
                .select(CategoryRow::as_select())
                .first::<CategoryRow>(conn)
                .optional()?;
            Ok(row.map(Category::from))
        })
        .await
    }

    async fn find_subcategory(
        &self,
        id: SubcategoryId,
    ) -> RegistryRepositoryResult<Option<Subcategory>> {
        self.run_blocking(move |conn| {
            let row = subcategories::table
                .find(id.value())
                .select(SubcategoryRow::as_select())
                .first::<SubcategoryRow>(conn)
                .optional()?;
            row.map(|found| {
                Subcategory::try_from(found).map_err(RegistryRepositoryError::persistence)
            })
            .transpose()
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> RegistryRepositoryResult<Option<User>> {
        self.run_blocking(move |conn| {
            let row = users::table
                .find(id.value())
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()?;
            Ok(row.map(User::from))
        })
        .await
    }

    async fn list_companies(&self) -> RegistryRepositoryResult<Vec<Company>> {
        self.run_blocking(|conn| {
            let rows = companies::table
                .order(companies::id.asc())
                .select(CompanyRow::as_select())
                .load::<CompanyRow>(conn)?;
            Ok(rows.into_iter().map(Company::from).collect())
        })
        .await
    }

    async fn list_branches(&self) -> RegistryRepositoryResult<Vec<Branch>> {
        self.run_blocking(|conn| {
            let rows = branches::table
                .order(branches::id.asc())
                .select(BranchRow::as_select())
                .load::<BranchRow>(conn)?;
            Ok(rows.into_iter().map(Branch::from).collect())
        })
        .await
    }

    async fn list_categories(&self) -> RegistryRepositoryResult<Vec<Category>> {
        self.run_blocking(|conn| {
            let rows = categories::table
                .order(categories::id.asc())
                .select(CategoryRow::as_select())
                .load::<CategoryRow>(conn)?;
            Ok(rows.into_iter().map(Category::from).collect())
        })
        .await
    }

    async fn list_subcategories(&self) -> RegistryRepositoryResult<Vec<Subcategory>> {
        self.run_blocking(|conn| {
            let rows = subcategories::table
                .order(subcategories::id.asc())
                .select(SubcategoryRow::as_select())
                .load::<SubcategoryRow>(conn)?;
            rows.into_iter()
                .map(|row| Subcategory::try_from(row).map_err(RegistryRepositoryError::persistence))
                .collect()
        })
        .await
    }

    async fn list_users(&self) -> RegistryRepositoryResult<Vec<User>> {
        self.run_blocking(|conn| {
            let rows = users::table
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(conn)?;
            Ok(rows.into_iter().map(User::from).collect())
        })
        .await
    }
}
