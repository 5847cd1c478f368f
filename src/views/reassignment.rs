//! Planning status changes from a rearranged Kanban board.
//!
//! The board hands back its columns as lists of card titles or card ids.
//! Planning validates the whole arrangement before anything moves, so a
//! rejected arrangement leaves every card where it was.

use super::BoardCard;
use crate::task::domain::TaskStatus;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors returned while planning a board reassignment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The same title was dropped into more than one column.
    #[error("title '{title}' appears in both {first} and {second}")]
    ConflictingColumns {
        /// Title listed twice.
        title: String,
        /// First column listing it.
        first: TaskStatus,
        /// Second column listing it.
        second: TaskStatus,
    },
    /// The same card id was dropped into more than one column.
    #[error("task {id} appears in both {first} and {second}")]
    ConflictingIds {
        /// Card listed twice.
        id: i64,
        /// First column listing it.
        first: TaskStatus,
        /// Second column listing it.
        second: TaskStatus,
    },
    /// A column lists a card that is not on the board.
    #[error("task {0} is not on the board")]
    UnknownTask(i64),
}

/// One planned status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange<I> {
    /// Card to move.
    pub id: I,
    /// Column it moves to.
    pub status: TaskStatus,
}

/// Plans moves for every card whose title is listed in a column.
///
/// Titles are not unique, so every card sharing a listed title moves to
/// that column. Titles matching no card are ignored and cards whose title
/// is not listed stay put. Only cards whose column actually changes are
/// planned, in board order.
///
/// # Errors
///
/// Returns [`BoardError::ConflictingColumns`] when one title is listed
/// under two different columns.
pub fn plan_reassignment_by_title<T: BoardCard>(
    cards: &[T],
    columns: &BTreeMap<TaskStatus, Vec<String>>,
) -> Result<Vec<StatusChange<T::Id>>, BoardError> {
    let mut targets: BTreeMap<&str, TaskStatus> = BTreeMap::new();
    for (status, titles) in columns {
        for title in titles {
            match targets.insert(title.as_str(), *status) {
                Some(previous) if previous != *status => {
                    return Err(BoardError::ConflictingColumns {
                        title: title.clone(),
                        first: previous,
                        second: *status,
                    });
                }
                _ => {}
            }
        }
    }

    Ok(cards
        .iter()
        .filter_map(|card| {
            let status = *targets.get(card.title())?;
            (status != card.status()).then_some(StatusChange {
                id: card.card_id(),
                status,
            })
        })
        .collect())
}

/// Plans moves for the cards listed by id.
///
/// # Errors
///
/// Returns [`BoardError::UnknownTask`] for an id with no card and
/// [`BoardError::ConflictingIds`] for an id listed under two columns.
pub fn plan_reassignment_by_id<T: BoardCard>(
    cards: &[T],
    columns: &BTreeMap<TaskStatus, Vec<T::Id>>,
) -> Result<Vec<StatusChange<T::Id>>, BoardError> {
    let mut targets: BTreeMap<T::Id, TaskStatus> = BTreeMap::new();
    for (status, ids) in columns {
        for id in ids {
            if !cards.iter().any(|card| card.card_id() == *id) {
                return Err(BoardError::UnknownTask((*id).into()));
            }
            match targets.insert(*id, *status) {
                Some(previous) if previous != *status => {
                    return Err(BoardError::ConflictingIds {
                        id: (*id).into(),
                        first: previous,
                        second: *status,
                    });
                }
                _ => {}
            }
        }
    }

    Ok(cards
        .iter()
        .filter_map(|card| {
            let status = *targets.get(&card.card_id())?;
            (status != card.status()).then_some(StatusChange {
                id: card.card_id(),
                status,
            })
        })
        .collect())
}
