//! Notification service over stored tasks.

use std::sync::Arc;

use super::helpers::{MemoryDesk, desk};
use crate::test_helpers::{date, seed_acme};
use rstest::rstest;
use taskdesk::notification::{
    adapters::memory::RecordingNotifier,
    services::{NotificationError, NotificationService},
};
use taskdesk::task::services::CreateTaskRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn digest_lists_pending_tasks_in_one_email(desk: MemoryDesk) -> eyre::Result<()> {
    let acme = seed_acme(&desk).await?;
    for (title, day) in [("File ISS", 20), ("File ICMS", 10)] {
        desk.tasks
            .create_task(
                CreateTaskRequest::new(title, date(2024, 5, day)?)
                    .with_branch(acme.branch.id)
                    .with_subcategory(acme.subcategory.id),
            )
            .await?;
    }
    let notifier = Arc::new(RecordingNotifier::new());
    let service = NotificationService::new(Arc::clone(&notifier), desk.lookup.clone());

    let listed = service.send_pending_digest(&acme.user.email).await?;

    let sent = notifier.sent()?;
    eyre::ensure!(listed == 2, "digest listed {listed} tasks");
    let [email] = sent.as_slice() else {
        eyre::bail!("expected one email, found {}", sent.len());
    };
    eyre::ensure!(email.recipient == "ana@acme.example", "wrong recipient");
    eyre::ensure!(email.subject == "Pending tasks (2)", "subject was {}", email.subject);
    eyre::ensure!(
        email.body
            == "Pending tasks (2):\n\
                - File ICMS - 2024-05-10 (22.222.222/0001-22, Monthly filing)\n\
                - File ISS - 2024-05-20 (22.222.222/0001-22, Monthly filing)\n",
        "body was {:?}",
        email.body
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_delivery_is_reported(desk: MemoryDesk) -> eyre::Result<()> {
    let notifier = Arc::new(RecordingNotifier::failing("relay refused"));
    let service = NotificationService::new(Arc::clone(&notifier), desk.lookup.clone());

    let result = service
        .send_alert("ana@acme.example", "Deadline", "ICMS due Friday")
        .await;

    eyre::ensure!(
        matches!(&result, Err(NotificationError::Delivery(err)) if err.reason() == "relay refused"),
        "expected delivery failure, got {result:?}"
    );
    eyre::ensure!(notifier.sent()?.is_empty(), "failed email was recorded");
    Ok(())
}
