//! Fixtures for in-memory integration tests.

use crate::test_helpers::Desk;
use rstest::fixture;
use taskdesk::storage::memory::InMemoryStore;

/// Services over an in-memory store.
pub type MemoryDesk = Desk<InMemoryStore>;

/// Provides services over a fresh in-memory store.
#[fixture]
pub fn desk() -> MemoryDesk {
    Desk::new(InMemoryStore::new())
}
