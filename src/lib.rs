//! # Tasklane Core
//!
//! Reorder engine for kanban boards.
//!
//! This crate takes a board, the user's current selection and a drag's
//! source and destination, and works out the next board and selection.
//! It covers single-card moves guarded by move rules (lane gates and an
//! adjacency rule), group moves of a multi-card selection, and the
//! click/ctrl-click/shift-click selection model that feeds them. Rendering,
//! input handling and storage stay with the caller.

pub mod domain;
pub mod error;
pub mod reorder;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, Column, ColumnConfig, ColumnId, Location},
    rules::{check_move, is_move_allowed, AdjacencyPolicy, AdjacencyRule, MoveRejection, MoveRules},
    selection::Selection,
    task::{Task, TaskId},
};
pub use error::{Result, TasklaneError};
pub use reorder::{apply_drop, preview_drop, reorder, DropResult, MoveOutcome, Reordered};
