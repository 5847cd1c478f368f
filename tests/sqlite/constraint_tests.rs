//! Table constraints reject rows the repositories would never write.

use super::helpers::memory_pool;
use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use rstest::rstest;

#[rstest]
#[case::unknown_status(
    "INSERT INTO tasks (title, due_date, status, created_at) \
     VALUES ('File ICMS', '2024-05-10', 'archived', '2024-05-01 08:00:00');"
)]
#[case::unknown_periodicity(
    "INSERT INTO categories (name) VALUES ('Tax'); \
     INSERT INTO subcategories (category_id, name, periodicity) VALUES (1, 'Filing', 'weekly');"
)]
#[case::dangling_branch_company(
    "INSERT INTO branches (company_id, tax_id, municipality, state) \
     VALUES (7, '22.222.222/0001-22', 'Recife', 'PE');"
)]
#[case::dangling_task_subcategory(
    "INSERT INTO tasks (title, due_date, subcategory_id, created_at) \
     VALUES ('File ICMS', '2024-05-10', 3, '2024-05-01 08:00:00');"
)]
#[case::duplicate_user_email(
    "INSERT INTO users (name, email) VALUES ('Ana', 'ana@acme.example'); \
     INSERT INTO users (name, email) VALUES ('Ana S.', 'ana@acme.example');"
)]
fn constraint_rejects_raw_insert(#[case] statements: &str) -> eyre::Result<()> {
    let pool = memory_pool()?;
    let mut connection = pool.get()?;

    let result = connection.batch_execute(statements);

    eyre::ensure!(result.is_err(), "statements were accepted: {statements}");
    Ok(())
}

#[rstest]
fn new_tasks_default_to_pending() -> eyre::Result<()> {
    let pool = memory_pool()?;
    let mut connection = pool.get()?;

    connection.batch_execute(
        "INSERT INTO tasks (title, due_date, created_at) \
         VALUES ('File ICMS', '2024-05-10', '2024-05-01 08:00:00');",
    )?;

    let counted: i64 = diesel::select(sql::<BigInt>(
        "(SELECT COUNT(*) FROM tasks WHERE status = 'pending')",
    ))
    .get_result(&mut *connection)?;
    eyre::ensure!(counted == 1, "default status was not pending");
    Ok(())
}
