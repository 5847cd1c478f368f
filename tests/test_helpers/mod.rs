//! Shared harness for integration tests run against every store adapter.

pub mod properties;

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use taskdesk::lookup::LookupResolver;
use taskdesk::registry::{
    domain::{Branch, Category, Company, Periodicity, Subcategory, User},
    ports::RegistryRepository,
    services::RegistrationService,
};
use taskdesk::task::{ports::TaskRepository, services::TaskLifecycleService};

/// Services wired over one shared store.
pub struct Desk<S>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    pub registry: RegistrationService<S>,
    pub tasks: TaskLifecycleService<S, DefaultClock>,
    pub lookup: LookupResolver<S, S>,
}

impl<S> Desk<S>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    /// Wires the registry, task and lookup services over `store`.
    pub fn new(store: S) -> Self {
        let shared = Arc::new(store);
        Self {
            registry: RegistrationService::new(Arc::clone(&shared)),
            tasks: TaskLifecycleService::new(Arc::clone(&shared), Arc::new(DefaultClock)),
            lookup: LookupResolver::new(Arc::clone(&shared), shared),
        }
    }
}

/// Registry records of the Acme scenario.
pub struct Acme {
    pub company: Company,
    pub branch: Branch,
    pub category: Category,
    pub subcategory: Subcategory,
    pub user: User,
}

/// Label under which the Acme branch is listed.
pub const ACME_BRANCH_LABEL: &str = "22.222.222/0001-22 - São Paulo/SP";

/// Builds a date, failing the test on an impossible one.
///
/// # Errors
///
/// Returns an error when the components do not form a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> eyre::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| eyre::eyre!("invalid date {year}-{month}-{day}"))
}

/// Registers Acme Ltd with its São Paulo branch, the Tax category, its
/// monthly filing subcategory and one user.
///
/// # Errors
///
/// Returns an error if any registration fails.
pub async fn seed_acme<S>(desk: &Desk<S>) -> eyre::Result<Acme>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let company = desk
        .registry
        .register_company("Acme Ltd", "11.111.111/0001-11")
        .await?;
    let branch = desk
        .registry
        .register_branch(company.id, "22.222.222/0001-22", "São Paulo", "SP")
        .await?;
    let category = desk.registry.register_category("Tax").await?;
    let subcategory = desk
        .registry
        .register_subcategory(category.id, "Monthly filing", Periodicity::Monthly)
        .await?;
    let user = desk
        .registry
        .register_user("Ana Souza", "ana@acme.example")
        .await?;
    Ok(Acme {
        company,
        branch,
        category,
        subcategory,
        user,
    })
}
