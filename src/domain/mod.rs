pub mod board;
pub mod rules;
pub mod selection;
pub mod sorting;
pub mod task;

pub use board::{Board, BoardConfig, Column, ColumnConfig, ColumnId, Location};
pub use rules::{
    check_move, is_move_allowed, AdjacencyPolicy, AdjacencyRule, EvenSuffix, LaneGate,
    MoveRejection, MoveRules,
};
pub use selection::Selection;
pub use sorting::{canonical_order, sort_by_board_position, BoardPosition, SortOrder};
pub use task::{Task, TaskId};
