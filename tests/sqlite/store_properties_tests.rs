//! Registry and task rules against the `SQLite` store.

use super::helpers::sqlite_desk;
use crate::test_helpers::properties;

#[tokio::test(flavor = "multi_thread")]
async fn distinct_tax_ids_get_distinct_ids() -> eyre::Result<()> {
    properties::distinct_tax_ids_get_distinct_ids(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_company_changes_nothing() -> eyre::Result<()> {
    properties::duplicate_company_changes_nothing(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn branch_of_unknown_company_is_dangling() -> eyre::Result<()> {
    properties::branch_of_unknown_company_is_dangling(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn records_are_found_by_id() -> eyre::Result<()> {
    properties::records_are_found_by_id(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn close_succeeds_once() -> eyre::Result<()> {
    properties::close_succeeds_once(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn pending_excludes_done_and_sorts_by_due() -> eyre::Result<()> {
    properties::pending_excludes_done_and_sorts_by_due(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn unmatched_label_is_not_found() -> eyre::Result<()> {
    properties::unmatched_label_is_not_found(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn shared_label_is_ambiguous() -> eyre::Result<()> {
    properties::shared_label_is_ambiguous(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn acme_end_to_end() -> eyre::Result<()> {
    properties::acme_end_to_end(&sqlite_desk()?).await
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_closes_complete_once() -> eyre::Result<()> {
    properties::concurrent_closes_complete_once(&sqlite_desk()?).await
}
