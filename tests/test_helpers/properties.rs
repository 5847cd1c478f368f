//! Store-independent checks, run once per adapter.

use super::{ACME_BRANCH_LABEL, Desk, date, seed_acme};
use taskdesk::lookup::{LookupError, LookupKind, RecordId};
use taskdesk::registry::{
    domain::{BranchId, CategoryId, CompanyId, EntityKind, Periodicity, SubcategoryId, UserId},
    ports::{RegistryRepository, RegistryRepositoryError},
};
use taskdesk::task::{
    domain::{TaskDomainError, TaskStatus},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleError},
};

/// Companies with distinct tax ids receive distinct identifiers.
///
/// # Errors
///
/// Returns an error when a registration fails or identifiers collide.
pub async fn distinct_tax_ids_get_distinct_ids<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let first = desk
        .registry
        .register_company("Acme Ltd", "11.111.111/0001-11")
        .await?;
    let second = desk
        .registry
        .register_company("Beta SA", "33.333.333/0001-33")
        .await?;

    eyre::ensure!(first.id != second.id, "company ids collided");
    eyre::ensure!(first.id < second.id, "company ids are not increasing");
    Ok(())
}

/// A second company with a registered tax id is rejected and not stored.
///
/// # Errors
///
/// Returns an error when the duplicate is accepted or the count changes.
pub async fn duplicate_company_changes_nothing<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    desk.registry
        .register_company("Acme Ltd", "11.111.111/0001-11")
        .await?;

    let result = desk
        .registry
        .register_company("Acme Copy", "11.111.111/0001-11")
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(RegistryRepositoryError::DuplicateKey {
                entity: EntityKind::Company,
                field: "tax_id",
                ..
            })
        ),
        "expected DuplicateKey, got {result:?}"
    );
    let companies = desk.registry.companies().await?;
    eyre::ensure!(companies.len() == 1, "found {} companies", companies.len());
    Ok(())
}

/// A branch naming an unknown company is rejected.
///
/// # Errors
///
/// Returns an error when the branch is accepted.
pub async fn branch_of_unknown_company_is_dangling<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let result = desk
        .registry
        .register_branch(CompanyId::new(404), "22.222.222/0001-22", "Recife", "PE")
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(RegistryRepositoryError::DanglingReference {
                entity: EntityKind::Branch,
                id: 404,
                ..
            })
        ),
        "expected DanglingReference, got {result:?}"
    );
    eyre::ensure!(desk.registry.branches().await?.is_empty(), "branch stored");
    Ok(())
}

/// Registered records are found by identifier and unknown ids are absent.
///
/// # Errors
///
/// Returns an error when a lookup fails or returns the wrong record.
pub async fn records_are_found_by_id<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let acme = seed_acme(desk).await?;
    let annual = desk
        .registry
        .register_subcategory(acme.category.id, "Annual return", Periodicity::Annual)
        .await?;

    eyre::ensure!(
        desk.registry.company(acme.company.id).await? == Some(acme.company),
        "company lookup mismatch"
    );
    eyre::ensure!(
        desk.registry.branch(acme.branch.id).await? == Some(acme.branch),
        "branch lookup mismatch"
    );
    eyre::ensure!(
        desk.registry.category(acme.category.id).await? == Some(acme.category),
        "category lookup mismatch"
    );
    eyre::ensure!(
        desk.registry.subcategory(acme.subcategory.id).await? == Some(acme.subcategory),
        "monthly subcategory lookup mismatch"
    );
    let found_annual = desk.registry.subcategory(annual.id).await?;
    eyre::ensure!(
        found_annual.as_ref().map(|sub| sub.periodicity) == Some(Periodicity::Annual),
        "annual periodicity not read back: {found_annual:?}"
    );
    eyre::ensure!(
        desk.registry.user(acme.user.id).await? == Some(acme.user),
        "user lookup mismatch"
    );

    let ghost = 9_999;
    eyre::ensure!(
        desk.registry.company(CompanyId::new(ghost)).await?.is_none(),
        "unknown company found"
    );
    eyre::ensure!(
        desk.registry.branch(BranchId::new(ghost)).await?.is_none(),
        "unknown branch found"
    );
    eyre::ensure!(
        desk.registry.category(CategoryId::new(ghost)).await?.is_none(),
        "unknown category found"
    );
    eyre::ensure!(
        desk.registry.subcategory(SubcategoryId::new(ghost)).await?.is_none(),
        "unknown subcategory found"
    );
    eyre::ensure!(
        desk.registry.user(UserId::new(ghost)).await?.is_none(),
        "unknown user found"
    );
    Ok(())
}

/// Closing succeeds once, then reports an invalid transition.
///
/// # Errors
///
/// Returns an error when either close behaves otherwise.
pub async fn close_succeeds_once<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let task = desk
        .tasks
        .create_task(CreateTaskRequest::new("File ICMS", date(2024, 5, 10)?))
        .await?;

    let closed = desk.tasks.close_task(task.id()).await?;
    eyre::ensure!(closed.status() == TaskStatus::Done, "task not done");
    eyre::ensure!(closed.completed_at().is_some(), "completion not recorded");

    let again = desk.tasks.close_task(task.id()).await;
    eyre::ensure!(
        matches!(
            again,
            Err(TaskLifecycleError::Domain(TaskDomainError::InvalidTransition {
                from: TaskStatus::Done,
                to: TaskStatus::Done,
                ..
            }))
        ),
        "expected InvalidTransition, got {again:?}"
    );

    let stored = desk
        .tasks
        .find_task(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("closed task disappeared"))?;
    eyre::ensure!(
        stored.completed_at() == closed.completed_at(),
        "completion time changed on the rejected close"
    );
    Ok(())
}

/// Two simultaneous closes: one succeeds, the other sees a done task.
///
/// # Errors
///
/// Returns an error unless exactly one close wins and the other is an
/// invalid transition.
pub async fn concurrent_closes_complete_once<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let task = desk
        .tasks
        .create_task(CreateTaskRequest::new("File ICMS", date(2024, 5, 10)?))
        .await?;

    let (first, second) = tokio::join!(
        desk.tasks.close_task(task.id()),
        desk.tasks.close_task(task.id())
    );

    let (winner, loser) = match (first, second) {
        (Ok(closed), Err(err)) | (Err(err), Ok(closed)) => (closed, err),
        (Ok(_), Ok(_)) => eyre::bail!("both closes succeeded"),
        (Err(a), Err(b)) => eyre::bail!("both closes failed: {a}; {b}"),
    };
    eyre::ensure!(winner.status() == TaskStatus::Done, "winner not done");
    eyre::ensure!(
        matches!(
            loser,
            TaskLifecycleError::Domain(TaskDomainError::InvalidTransition {
                from: TaskStatus::Done,
                to: TaskStatus::Done,
                ..
            })
        ),
        "expected InvalidTransition, got {loser:?}"
    );
    Ok(())
}

/// Pending tasks exclude done ones and sort by due date, then id.
///
/// # Errors
///
/// Returns an error when the listing is filtered or ordered wrongly.
pub async fn pending_excludes_done_and_sorts_by_due<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let later = desk
        .tasks
        .create_task(CreateTaskRequest::new("Annual report", date(2024, 12, 31)?))
        .await?;
    let tie_first = desk
        .tasks
        .create_task(CreateTaskRequest::new("File ICMS", date(2024, 5, 10)?))
        .await?;
    let done = desk
        .tasks
        .create_task(CreateTaskRequest::new("Payroll", date(2024, 5, 5)?))
        .await?;
    let tie_second = desk
        .tasks
        .create_task(CreateTaskRequest::new("File ISS", date(2024, 5, 10)?))
        .await?;
    desk.tasks.close_task(done.id()).await?;

    let ids: Vec<_> = desk
        .tasks
        .list_pending()
        .await?
        .iter()
        .map(|task| task.id())
        .collect();

    eyre::ensure!(
        ids == vec![tie_first.id(), tie_second.id(), later.id()],
        "unexpected pending order {ids:?}"
    );
    Ok(())
}

/// Labels matching nothing are not found.
///
/// # Errors
///
/// Returns an error when the label resolves.
pub async fn unmatched_label_is_not_found<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    seed_acme(desk).await?;

    let result = desk.lookup.resolve_company("Acme Ltd (99.999.999/0001-99)").await;

    eyre::ensure!(
        matches!(
            result,
            Err(LookupError::NotFound {
                kind: LookupKind::Company,
                ..
            })
        ),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

/// Labels rendered by two records are ambiguous.
///
/// # Errors
///
/// Returns an error when the label resolves to a single record.
pub async fn shared_label_is_ambiguous<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let acme = seed_acme(desk).await?;
    let payroll = desk.registry.register_category("Payroll").await?;
    eyre::ensure!(payroll.id != acme.category.id, "category ids collided");
    desk.registry
        .register_subcategory(payroll.id, "Monthly filing", Periodicity::Monthly)
        .await?;

    let result = desk.lookup.resolve(LookupKind::Subcategory, "Monthly filing").await;
    eyre::ensure!(
        matches!(
            result,
            Err(LookupError::Ambiguous {
                kind: LookupKind::Subcategory,
                matches: 2,
                ..
            })
        ),
        "expected Ambiguous, got {result:?}"
    );

    let options = desk.lookup.options(LookupKind::Subcategory).await?;
    eyre::ensure!(
        options.first().map(|option| option.id)
            == Some(RecordId::Subcategory(acme.subcategory.id)),
        "options should keep identifiers alongside labels"
    );
    Ok(())
}

/// Registers Acme, files and closes its ICMS task through labels.
///
/// # Errors
///
/// Returns an error when any step of the flow misbehaves.
pub async fn acme_end_to_end<S>(desk: &Desk<S>) -> eyre::Result<()>
where
    S: RegistryRepository + TaskRepository + 'static,
{
    let acme = seed_acme(desk).await?;
    eyre::ensure!(
        acme.branch.company_id == acme.company.id,
        "branch registered under the wrong company"
    );
    let owner = desk.lookup.resolve_user("Ana Souza <ana@acme.example>").await?;
    eyre::ensure!(owner == acme.user.id, "user label resolved elsewhere");
    let branch = desk.lookup.resolve_branch(ACME_BRANCH_LABEL).await?;
    let subcategory = desk.lookup.resolve_subcategory("Monthly filing").await?;
    eyre::ensure!(branch == acme.branch.id, "branch label resolved elsewhere");

    let task = desk
        .tasks
        .create_task(
            CreateTaskRequest::new("File ICMS", date(2024, 5, 10)?)
                .with_branch(branch)
                .with_subcategory(subcategory),
        )
        .await?;
    eyre::ensure!(task.status() == TaskStatus::Pending, "new task not pending");

    let pending_label = "File ICMS - 2024-05-10 (22.222.222/0001-22, Monthly filing)";
    let selected = desk.lookup.resolve_pending_task(pending_label).await?;
    eyre::ensure!(selected == task.id(), "pending label resolved elsewhere");

    let closed = desk.tasks.close_task(selected).await?;
    eyre::ensure!(closed.status() == TaskStatus::Done, "task not done");
    eyre::ensure!(closed.completed_at().is_some(), "completion not recorded");

    let pending = desk.tasks.list_pending().await?;
    eyre::ensure!(
        pending.iter().all(|candidate| candidate.id() != task.id()),
        "closed task still pending"
    );
    Ok(())
}
