//! Domain model for the registry of companies, branches, categories,
//! subcategories and users.
//!
//! Registry records are created once and never updated or deleted.

mod error;
mod ids;
mod records;

pub use error::ParsePeriodicityError;
pub use ids::{BranchId, CategoryId, CompanyId, SubcategoryId, UserId};
pub use records::{
    Branch, Category, Company, EntityKind, NewBranch, NewCategory, NewCompany, NewSubcategory,
    NewUser, Periodicity, Subcategory, User,
};
