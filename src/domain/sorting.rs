use crate::domain::board::Board;
use crate::domain::task::TaskId;
use std::cmp::Ordering;

/// Where a task sits on the board: lane position first, then index
/// within the lane. Ordering follows reading order, left to right and
/// top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardPosition {
    pub lane: usize,
    pub index: usize,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Direction of travel from index `from` to index `to`
    pub fn between(from: usize, to: usize) -> Self {
        if to >= from {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    fn apply(self, cmp: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    }
}

/// Sorts task ids by where they sit on `board`
///
/// # Panics
///
/// Panics if any id is not placed on the board.
///
/// # Examples
/// ```
/// use tasklane_core::domain::sorting::{sort_by_board_position, SortOrder};
/// use tasklane_core::{Board, TaskId};
///
/// let board = Board::default();
/// let mut ids = vec![TaskId::new(7), TaskId::new(2), TaskId::new(11)];
///
/// sort_by_board_position(&board, &mut ids, SortOrder::Ascending);
/// assert_eq!(ids, vec![TaskId::new(2), TaskId::new(7), TaskId::new(11)]);
/// ```
pub fn sort_by_board_position(board: &Board, ids: &mut [TaskId], order: SortOrder) {
    ids.sort_by(|a, b| compare_positions(board.position_of(a), board.position_of(b), order));
}

/// Order in which a dragged group lands: `lead` first, everything else in
/// board reading order. The sort is stable.
///
/// # Panics
///
/// Panics if any id is not placed on the board.
pub fn canonical_order(board: &Board, ids: &[TaskId], lead: &TaskId) -> Vec<TaskId> {
    let mut ordered = ids.to_vec();
    ordered.sort_by_cached_key(|id| (id != lead, board.position_of(id)));
    ordered
}

/// Compare two positions under `order`
pub fn compare_positions(a: BoardPosition, b: BoardPosition, order: SortOrder) -> Ordering {
    order.apply(a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::{BoardConfig, ColumnConfig};
    use crate::domain::rules::MoveRules;
    use crate::domain::task::Task;

    fn two_lane_board() -> Board {
        Board::from_config(BoardConfig {
            name: "Two lanes".to_string(),
            columns: vec![
                ColumnConfig::new("a", "A").with_tasks([TaskId::new(4), TaskId::new(1)]),
                ColumnConfig::new("b", "B").with_tasks([TaskId::new(0), TaskId::new(3)]),
            ],
            tasks: (0..5).map(Task::numbered).collect(),
            rules: MoveRules::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_sort_order_between() {
        assert_eq!(SortOrder::between(1, 4), SortOrder::Ascending);
        assert_eq!(SortOrder::between(4, 1), SortOrder::Descending);
        assert_eq!(SortOrder::between(2, 2), SortOrder::Ascending);
    }

    #[test]
    fn test_compare_positions() {
        let top_right = BoardPosition { lane: 1, index: 0 };
        let bottom_left = BoardPosition { lane: 0, index: 9 };

        assert_eq!(
            compare_positions(bottom_left, top_right, SortOrder::Ascending),
            Ordering::Less
        );
        assert_eq!(
            compare_positions(bottom_left, top_right, SortOrder::Descending),
            Ordering::Greater
        );
        assert_eq!(
            compare_positions(top_right, top_right, SortOrder::Ascending),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sort_by_board_position_uses_lane_then_index() {
        let board = two_lane_board();
        let mut ids = vec![TaskId::new(3), TaskId::new(1), TaskId::new(0), TaskId::new(4)];

        sort_by_board_position(&board, &mut ids, SortOrder::Ascending);
        assert_eq!(
            ids,
            vec![TaskId::new(4), TaskId::new(1), TaskId::new(0), TaskId::new(3)]
        );

        sort_by_board_position(&board, &mut ids, SortOrder::Descending);
        assert_eq!(
            ids,
            vec![TaskId::new(3), TaskId::new(0), TaskId::new(1), TaskId::new(4)]
        );
    }

    #[test]
    fn test_canonical_order_puts_lead_first() {
        let board = two_lane_board();
        let ids = vec![TaskId::new(3), TaskId::new(0), TaskId::new(1)];

        let ordered = canonical_order(&board, &ids, &TaskId::new(3));
        assert_eq!(ordered, vec![TaskId::new(3), TaskId::new(1), TaskId::new(0)]);
    }

    #[test]
    fn test_canonical_order_without_lead_in_ids() {
        let board = two_lane_board();
        let ids = vec![TaskId::new(0), TaskId::new(4)];

        let ordered = canonical_order(&board, &ids, &TaskId::new(3));
        assert_eq!(ordered, vec![TaskId::new(4), TaskId::new(0)]);
    }
}
