//! Move rules for single-task drags.
//!
//! Two rules decide whether a drag may land:
//!
//! * **Lane gates**: a gate from lane A to lane B forbids dropping a task
//!   that started in A straight into B, at any index.
//! * **Adjacency**: some pairs of tasks may not be reordered so that one
//!   overtakes the other. The stock rule forbids an even-numbered task from
//!   landing directly ahead of another even-numbered task.
//!
//! [`check_move`] is pure. The shell calls it (or [`is_move_allowed`]) on
//! every pointer update to preview a drop, and the single-task reducer
//! applies the same rules when the drop happens.

use crate::domain::board::{Board, ColumnId, Location};
use crate::domain::task::TaskId;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use thiserror::Error;

/// Why a move was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("Tasks cannot move directly from {from} to {to}")]
    LaneGate { from: ColumnId, to: ColumnId },

    #[error("{task} cannot be placed ahead of {occupant}")]
    Adjacency { task: TaskId, occupant: TaskId },
}

/// One-way block between two lanes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneGate {
    pub from: ColumnId,
    pub to: ColumnId,
}

impl LaneGate {
    pub fn new(from: impl Into<ColumnId>, to: impl Into<ColumnId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Gate between the lanes at positions `from` and `to` of `board`
    pub fn by_position(board: &Board, from: usize, to: usize) -> Option<Self> {
        let from = board.column_order().get(from)?.clone();
        let to = board.column_order().get(to)?.clone();
        Some(Self { from, to })
    }

    pub fn blocks(&self, source: &ColumnId, destination: &ColumnId) -> bool {
        &self.from == source && &self.to == destination
    }
}

/// Ordering constraint between a dragged task and the task it would land
/// directly ahead of.
pub trait AdjacencyRule: Send + Sync {
    /// True when `moving` may not be dropped directly ahead of `occupant`.
    fn blocks(&self, moving: &TaskId, occupant: &TaskId) -> bool;
}

/// Stock adjacency rule: keys come from the integer suffix of the id
/// (`task-12` has key 12), and an even-keyed task may not overtake
/// another even-keyed task. Ids without a numeric suffix never match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvenSuffix;

impl EvenSuffix {
    pub fn is_even(id: &TaskId) -> bool {
        id.numeric_suffix().is_some_and(|key| key % 2 == 0)
    }
}

impl AdjacencyRule for EvenSuffix {
    fn blocks(&self, moving: &TaskId, occupant: &TaskId) -> bool {
        Self::is_even(moving) && Self::is_even(occupant)
    }
}

/// Which adjacency rule a board enforces
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyPolicy {
    #[default]
    EvenSuffix,
    Disabled,
    /// Caller-supplied rule. Not part of the snapshot format, so a board
    /// using one cannot be serialized.
    #[serde(skip)]
    Custom(Arc<dyn AdjacencyRule>),
}

impl AdjacencyPolicy {
    pub fn custom(rule: impl AdjacencyRule + 'static) -> Self {
        Self::Custom(Arc::new(rule))
    }

    pub fn blocks(&self, moving: &TaskId, occupant: &TaskId) -> bool {
        match self {
            Self::EvenSuffix => EvenSuffix.blocks(moving, occupant),
            Self::Disabled => false,
            Self::Custom(rule) => rule.blocks(moving, occupant),
        }
    }
}

impl fmt::Debug for AdjacencyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvenSuffix => write!(f, "EvenSuffix"),
            Self::Disabled => write!(f, "Disabled"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl PartialEq for AdjacencyPolicy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EvenSuffix, Self::EvenSuffix) | (Self::Disabled, Self::Disabled) => true,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The rule set a board enforces on single-task moves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveRules {
    #[serde(default)]
    pub lane_gates: Vec<LaneGate>,
    #[serde(default)]
    pub adjacency: AdjacencyPolicy,
}

impl MoveRules {
    /// No gates, no adjacency rule: every move is allowed
    pub fn permissive() -> Self {
        Self {
            lane_gates: Vec::new(),
            adjacency: AdjacencyPolicy::Disabled,
        }
    }

    pub fn with_gate(mut self, from: impl Into<ColumnId>, to: impl Into<ColumnId>) -> Self {
        self.lane_gates.push(LaneGate::new(from, to));
        self
    }

    pub fn with_adjacency(mut self, adjacency: AdjacencyPolicy) -> Self {
        self.adjacency = adjacency;
        self
    }

    /// The gate, if any, that blocks `source` → `destination`
    pub fn gate_between(&self, source: &ColumnId, destination: &ColumnId) -> Option<&LaneGate> {
        self.lane_gates
            .iter()
            .find(|gate| gate.blocks(source, destination))
    }
}

/// Checks a single-task move against the board's rules
///
/// The moving task is the one at `source`. A source that names no task
/// has nothing to reject; the reducers deal with it separately.
///
/// # Examples
/// ```
/// use tasklane_core::{check_move, Board, Location, MoveRejection};
///
/// let board = Board::default();
///
/// // backlog → inProgress skips "To do"
/// let gated = check_move(&board, &Location::new("backlog", 3), &Location::new("inProgress", 0));
/// assert!(matches!(gated, Err(MoveRejection::LaneGate { .. })));
///
/// // task-4 may not jump ahead of task-2
/// let overtakes = check_move(&board, &Location::new("backlog", 4), &Location::new("backlog", 2));
/// assert!(matches!(overtakes, Err(MoveRejection::Adjacency { .. })));
///
/// assert!(check_move(&board, &Location::new("backlog", 3), &Location::new("todo", 0)).is_ok());
/// ```
pub fn check_move(
    board: &Board,
    source: &Location,
    destination: &Location,
) -> Result<(), MoveRejection> {
    let rules = board.rules();

    if source.column_id != destination.column_id {
        check_lane_gate(rules, &source.column_id, &destination.column_id)?;
    }

    let Some(home) = board.column(&source.column_id) else {
        return Ok(());
    };
    let Some(moving) = home.task_at(source.index) else {
        return Ok(());
    };

    if source.column_id == destination.column_id {
        // Ahead of the lifted slot the lane is the same before and after
        // removal, and only those slots count as overtaking.
        return check_adjacency(rules, moving, &home.task_ids[..source.index], destination.index);
    }

    match board.column(&destination.column_id) {
        Some(target) => check_adjacency(rules, moving, &target.task_ids, destination.index),
        None => Ok(()),
    }
}

/// True when [`check_move`] finds nothing to object to
pub fn is_move_allowed(board: &Board, source: &Location, destination: &Location) -> bool {
    check_move(board, source, destination).is_ok()
}

pub(crate) fn check_lane_gate(
    rules: &MoveRules,
    source: &ColumnId,
    destination: &ColumnId,
) -> Result<(), MoveRejection> {
    match rules.gate_between(source, destination) {
        Some(gate) => Err(MoveRejection::LaneGate {
            from: gate.from.clone(),
            to: gate.to.clone(),
        }),
        None => Ok(()),
    }
}

/// `lane` holds the slots `moving` could overtake by landing at `index`.
/// Landing past the end overtakes nothing.
pub(crate) fn check_adjacency(
    rules: &MoveRules,
    moving: &TaskId,
    lane: &[TaskId],
    index: usize,
) -> Result<(), MoveRejection> {
    match lane.get(index) {
        Some(occupant) if rules.adjacency.blocks(moving, occupant) => Err(MoveRejection::Adjacency {
            task: moving.clone(),
            occupant: occupant.clone(),
        }),
        _ => Ok(()),
    }
}
