//! Given steps for close-task BDD scenarios.

use super::world::{CloseTaskWorld, run_async};
use chrono::NaiveDate;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdesk::registry::domain::Periodicity;
use taskdesk::task::services::CreateTaskRequest;

#[given(r#"company "{legal_name}" with tax id "{tax_id}""#)]
fn company_registered(
    world: &mut CloseTaskWorld,
    legal_name: String,
    tax_id: String,
) -> Result<(), eyre::Report> {
    let company = run_async(world.registry.register_company(&legal_name, &tax_id))
        .wrap_err("register scenario company")?;
    world.company = Some(company);
    Ok(())
}

#[given(r#"branch "{tax_id}" in "{municipality}" "{state}" of that company"#)]
fn branch_registered(
    world: &mut CloseTaskWorld,
    tax_id: String,
    municipality: String,
    state: String,
) -> Result<(), eyre::Report> {
    let company_id = world
        .company
        .as_ref()
        .map(|company| company.id)
        .ok_or_else(|| eyre::eyre!("missing company in scenario world"))?;
    run_async(
        world
            .registry
            .register_branch(company_id, &tax_id, &municipality, &state),
    )
    .wrap_err("register scenario branch")?;
    Ok(())
}

#[given(r#"category "{category}" with monthly subcategory "{subcategory}""#)]
fn category_registered(
    world: &mut CloseTaskWorld,
    category: String,
    subcategory: String,
) -> Result<(), eyre::Report> {
    let registered = run_async(world.registry.register_category(&category))
        .wrap_err("register scenario category")?;
    run_async(world.registry.register_subcategory(
        registered.id,
        &subcategory,
        Periodicity::Monthly,
    ))
    .wrap_err("register scenario subcategory")?;
    world.category = Some(registered);
    Ok(())
}

#[given(
    r#"task "{title}" due "{due}" for branch "{branch}" and subcategory "{subcategory}""#
)]
fn task_filed(
    world: &mut CloseTaskWorld,
    title: String,
    due: String,
    branch: String,
    subcategory: String,
) -> Result<(), eyre::Report> {
    let due_date: NaiveDate = due.parse().wrap_err("parse scenario due date")?;
    let branch_id =
        run_async(world.lookup.resolve_branch(&branch)).wrap_err("resolve branch label")?;
    let subcategory_id = run_async(world.lookup.resolve_subcategory(&subcategory))
        .wrap_err("resolve subcategory label")?;

    let task = run_async(
        world.tasks.create_task(
            CreateTaskRequest::new(title, due_date)
                .with_branch(branch_id)
                .with_subcategory(subcategory_id),
        ),
    )
    .wrap_err("file scenario task")?;
    world.task = Some(task);
    Ok(())
}

#[given("the task has been closed")]
fn task_closed(world: &mut CloseTaskWorld) -> Result<(), eyre::Report> {
    let task_id = world.filed_task()?.id();
    let closed = run_async(world.tasks.close_task(task_id)).wrap_err("close scenario task")?;
    world.task = Some(closed);
    Ok(())
}
