//! Registry records and their unsaved drafts.

use super::{BranchId, CategoryId, CompanyId, ParsePeriodicityError, SubcategoryId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of record held by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// [`Company`] records.
    Company,
    /// [`Branch`] records.
    Branch,
    /// [`Category`] records.
    Category,
    /// [`Subcategory`] records.
    Subcategory,
    /// [`User`] records.
    User,
}

impl EntityKind {
    /// Returns the lowercase entity name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Branch => "branch",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a subcategory's obligation recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    /// Once a month.
    Monthly,
    /// Once a quarter.
    Quarterly,
    /// Once a year.
    Annual,
    /// A single occurrence.
    OneOff,
}

impl Periodicity {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
            Self::OneOff => "one_off",
        }
    }
}

impl TryFrom<&str> for Periodicity {
    type Error = ParsePeriodicityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" => Ok(Self::Annual),
            "one_off" => Ok(Self::OneOff),
            _ => Err(ParsePeriodicityError(value.to_owned())),
        }
    }
}

impl std::str::FromStr for Periodicity {
    type Err = ParsePeriodicityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

/// Registered company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Record identifier.
    pub id: CompanyId,
    /// Registered legal name.
    pub legal_name: String,
    /// Tax registration number, unique among companies.
    pub tax_id: String,
}

/// Company awaiting registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    /// Registered legal name.
    pub legal_name: String,
    /// Tax registration number.
    pub tax_id: String,
}

/// Company branch, identified by its own tax number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Record identifier.
    pub id: BranchId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Tax registration number, unique among branches.
    pub tax_id: String,
    /// Municipality the branch operates in.
    pub municipality: String,
    /// State abbreviation.
    pub state: String,
}

/// Branch awaiting registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBranch {
    /// Owning company.
    pub company_id: CompanyId,
    /// Tax registration number.
    pub tax_id: String,
    /// Municipality the branch operates in.
    pub municipality: String,
    /// State abbreviation.
    pub state: String,
}

/// Task category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Record identifier.
    pub id: CategoryId,
    /// Category name, unique.
    pub name: String,
}

/// Category awaiting registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Category name.
    pub name: String,
}

/// Subcategory within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Record identifier.
    pub id: SubcategoryId,
    /// Parent category.
    pub category_id: CategoryId,
    /// Subcategory name.
    pub name: String,
    /// Recurrence of the obligation.
    pub periodicity: Periodicity,
}

/// Subcategory awaiting registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubcategory {
    /// Parent category.
    pub category_id: CategoryId,
    /// Subcategory name.
    pub name: String,
    /// Recurrence of the obligation.
    pub periodicity: Periodicity,
}

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Record identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique.
    pub email: String,
}

/// User awaiting registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}
