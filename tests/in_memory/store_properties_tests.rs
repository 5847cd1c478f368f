//! Registry and task rules against the in-memory store.

use super::helpers::{MemoryDesk, desk};
use crate::test_helpers::properties;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn distinct_tax_ids_get_distinct_ids(desk: MemoryDesk) -> eyre::Result<()> {
    properties::distinct_tax_ids_get_distinct_ids(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_company_changes_nothing(desk: MemoryDesk) -> eyre::Result<()> {
    properties::duplicate_company_changes_nothing(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn branch_of_unknown_company_is_dangling(desk: MemoryDesk) -> eyre::Result<()> {
    properties::branch_of_unknown_company_is_dangling(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn records_are_found_by_id(desk: MemoryDesk) -> eyre::Result<()> {
    properties::records_are_found_by_id(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn close_succeeds_once(desk: MemoryDesk) -> eyre::Result<()> {
    properties::close_succeeds_once(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_excludes_done_and_sorts_by_due(desk: MemoryDesk) -> eyre::Result<()> {
    properties::pending_excludes_done_and_sorts_by_due(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unmatched_label_is_not_found(desk: MemoryDesk) -> eyre::Result<()> {
    properties::unmatched_label_is_not_found(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn shared_label_is_ambiguous(desk: MemoryDesk) -> eyre::Result<()> {
    properties::shared_label_is_ambiguous(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn acme_end_to_end(desk: MemoryDesk) -> eyre::Result<()> {
    properties::acme_end_to_end(&desk).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_closes_complete_once(desk: MemoryDesk) -> eyre::Result<()> {
    properties::concurrent_closes_complete_once(&desk).await
}
