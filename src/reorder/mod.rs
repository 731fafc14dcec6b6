//! Drop handling: turns a finished drag into the next board and selection.
//!
//! [`reorder`] picks the reducer: a selection of zero or one task moves a
//! single card under the board's [`MoveRules`](crate::domain::MoveRules);
//! a larger selection moves the whole group as one block. Neither reducer
//! touches its inputs, and a refused move hands back the board and
//! selection it was given.

use crate::domain::board::{Board, Location};
use crate::domain::rules::{self, MoveRejection};
use crate::domain::selection::Selection;
use serde::{Deserialize, Serialize};

pub mod multi;
pub mod single;

pub use multi::reorder_multi;
pub use single::reorder_single;

/// What happened to a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The board changed
    Moved,
    /// Nothing to do: dropped where it started, outside any column, or
    /// from a location that holds no task
    Unchanged,
    /// A move rule refused the drop
    Rejected(MoveRejection),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }

    pub fn rejection(&self) -> Option<&MoveRejection> {
        match self {
            MoveOutcome::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Board and selection after a drop
#[derive(Debug, Clone, PartialEq)]
pub struct Reordered {
    pub board: Board,
    pub selection: Selection,
    pub outcome: MoveOutcome,
}

impl Reordered {
    pub(crate) fn moved(board: Board, selection: Selection) -> Self {
        Self {
            board,
            selection,
            outcome: MoveOutcome::Moved,
        }
    }

    pub(crate) fn unchanged(board: &Board, selection: &Selection) -> Self {
        Self {
            board: board.clone(),
            selection: selection.clone(),
            outcome: MoveOutcome::Unchanged,
        }
    }

    pub(crate) fn rejected(board: &Board, selection: &Selection, rejection: MoveRejection) -> Self {
        tracing::debug!(%rejection, "move rejected");
        Self {
            board: board.clone(),
            selection: selection.clone(),
            outcome: MoveOutcome::Rejected(rejection),
        }
    }
}

/// End of a drag as the shell reports it. `destination` is `None` when the
/// card was let go outside every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResult {
    pub source: Location,
    pub destination: Option<Location>,
}

/// Moves the dragged task, or the whole selection when more than one task
/// is selected.
///
/// # Panics
///
/// Group moves panic if a selected id is not placed on the board; see
/// [`reorder_multi`].
///
/// # Examples
/// ```
/// use tasklane_core::{reorder, Board, Location, Selection, TaskId};
///
/// let board = Board::default();
/// let result = reorder(
///     &board,
///     &Selection::new(),
///     &Location::new("backlog", 1),
///     &Location::new("todo", 0),
/// );
///
/// assert!(result.outcome.is_moved());
/// assert_eq!(
///     result.board.column(&"todo".into()).unwrap().task_ids,
///     vec![TaskId::new(1)]
/// );
/// ```
pub fn reorder(
    board: &Board,
    selection: &Selection,
    source: &Location,
    destination: &Location,
) -> Reordered {
    if selection.len() > 1 {
        reorder_multi(board, selection, source, destination)
    } else {
        reorder_single(board, selection, source, destination)
    }
}

/// [`reorder`] for a drop that may have missed every column
pub fn apply_drop(board: &Board, selection: &Selection, drop: &DropResult) -> Reordered {
    match &drop.destination {
        Some(destination) => reorder(board, selection, &drop.source, destination),
        None => Reordered::unchanged(board, selection),
    }
}

/// Would dropping here be accepted? For the live "invalid move" hint while
/// a drag is in progress. Group drags are not subject to the move rules,
/// so they always preview as allowed.
pub fn preview_drop(
    board: &Board,
    selection: &Selection,
    source: &Location,
    destination: &Location,
) -> bool {
    selection.len() > 1 || rules::is_move_allowed(board, source, destination)
}
