use crate::domain::board::{Board, Location};
use crate::domain::rules;
use crate::domain::selection::Selection;
use crate::reorder::Reordered;

/// Moves the one task at `source` to `destination`
///
/// Within a column the task is lifted out first and the adjacency rule is
/// checked against what remains. Across columns the lane gates are checked
/// first, then adjacency against the destination as it stands. A refused
/// move returns the inputs unchanged. Only the columns that change are
/// rebuilt; the selection passes through as is.
///
/// Callers are expected to pass locations read off this board. If they do
/// not, the move is dropped with a warning: an unknown column or an empty
/// source slot leaves everything unchanged, and a destination index past
/// the end appends.
pub fn reorder_single(
    board: &Board,
    selection: &Selection,
    source: &Location,
    destination: &Location,
) -> Reordered {
    let (Some(home), Some(target)) = (
        board.column(&source.column_id),
        board.column(&destination.column_id),
    ) else {
        tracing::warn!(
            source = %source.column_id,
            destination = %destination.column_id,
            "drop references an unknown column"
        );
        return Reordered::unchanged(board, selection);
    };

    let Some(moving) = home.task_at(source.index).cloned() else {
        tracing::warn!(
            column = %source.column_id,
            index = source.index,
            len = home.len(),
            "drag source holds no task"
        );
        return Reordered::unchanged(board, selection);
    };

    if source.column_id == destination.column_id {
        if source.index == destination.index {
            return Reordered::unchanged(board, selection);
        }

        let mut task_ids = home.task_ids.clone();
        task_ids.remove(source.index);

        // Only the slots above the lifted one can be overtaken.
        if let Err(rejection) = rules::check_adjacency(
            board.rules(),
            &moving,
            &task_ids[..source.index],
            destination.index,
        ) {
            return Reordered::rejected(board, selection, rejection);
        }

        let at = destination.index.min(task_ids.len());
        task_ids.insert(at, moving.clone());
        tracing::trace!(task = %moving, column = %home.id, from = source.index, to = at, "task reordered");

        let next = board.with_columns([home.with_task_ids(task_ids)]);
        return Reordered::moved(next, selection.clone());
    }

    if let Err(rejection) = rules::check_lane_gate(board.rules(), &home.id, &target.id) {
        return Reordered::rejected(board, selection, rejection);
    }
    if let Err(rejection) =
        rules::check_adjacency(board.rules(), &moving, &target.task_ids, destination.index)
    {
        return Reordered::rejected(board, selection, rejection);
    }

    let mut home_ids = home.task_ids.clone();
    home_ids.remove(source.index);

    let mut target_ids = target.task_ids.clone();
    let at = destination.index.min(target_ids.len());
    target_ids.insert(at, moving.clone());
    tracing::trace!(task = %moving, from = %home.id, to = %target.id, index = at, "task moved");

    let next = board.with_columns([
        home.with_task_ids(home_ids),
        target.with_task_ids(target_ids),
    ]);
    Reordered::moved(next, selection.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::{is_move_allowed, MoveRejection, MoveRules};
    use crate::domain::task::TaskId;
    use crate::reorder::test_support::{board, lane, placements};
    use crate::reorder::MoveOutcome;
    use proptest::prelude::*;

    fn apply(board: &Board, from: (&str, usize), to: (&str, usize)) -> Reordered {
        reorder_single(
            board,
            &Selection::new(),
            &Location::new(from.0, from.1),
            &Location::new(to.0, to.1),
        )
    }

    #[test]
    fn test_reorder_within_column() {
        let board = board([&[1, 3, 5, 7], &[], &[], &[]]);

        let down = apply(&board, ("backlog", 0), ("backlog", 2));
        assert_eq!(down.outcome, MoveOutcome::Moved);
        assert_eq!(lane(&down.board, "backlog"), vec![3, 5, 1, 7]);

        let up = apply(&board, ("backlog", 3), ("backlog", 1));
        assert_eq!(lane(&up.board, "backlog"), vec![1, 7, 3, 5]);

        // input untouched
        assert_eq!(lane(&board, "backlog"), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_reorder_within_column_shares_other_columns() {
        let board = board([&[1, 3], &[5], &[], &[]]);
        let result = apply(&board, ("backlog", 0), ("backlog", 1));

        assert!(result.board.shares_column(&board, &"todo".into()));
        assert!(!result.board.shares_column(&board, &"backlog".into()));
    }

    #[test]
    fn test_move_between_columns() {
        let board = board([&[1, 3], &[5, 7], &[], &[]]);
        let result = apply(&board, ("backlog", 1), ("todo", 1));

        assert_eq!(result.outcome, MoveOutcome::Moved);
        assert_eq!(lane(&result.board, "backlog"), vec![1]);
        assert_eq!(lane(&result.board, "todo"), vec![5, 3, 7]);
        assert!(result.board.shares_column(&board, &"inProgress".into()));
        assert!(result.board.shares_column(&board, &"done".into()));
    }

    #[test]
    fn test_selection_passes_through() {
        let board = board([&[1, 3], &[], &[], &[]]);
        let selection = Selection::single(TaskId::new(3));
        let result = reorder_single(
            &board,
            &selection,
            &Location::new("backlog", 1),
            &Location::new("todo", 0),
        );
        assert_eq!(result.selection, selection);
    }

    #[test]
    fn test_lane_gate_rejects_at_every_index() {
        let board = board([&[1, 2, 3], &[], &[4, 5], &[]]);
        for from in 0..3 {
            for to in 0..=2 {
                let result = apply(&board, ("backlog", from), ("inProgress", to));
                assert_eq!(
                    result.outcome,
                    MoveOutcome::Rejected(MoveRejection::LaneGate {
                        from: "backlog".into(),
                        to: "inProgress".into(),
                    })
                );
                assert_eq!(result.board, board);
            }
        }
    }

    #[test]
    fn test_same_column_parity() {
        let board = board([&[0, 1, 2], &[], &[], &[]]);

        // task-2 ahead of task-0
        let rejected = apply(&board, ("backlog", 2), ("backlog", 0));
        assert!(matches!(rejected.outcome, MoveOutcome::Rejected(MoveRejection::Adjacency { .. })));
        assert_eq!(rejected.board, board);

        // task-1 ahead of task-0
        let odd = apply(&board, ("backlog", 1), ("backlog", 0));
        assert_eq!(lane(&odd.board, "backlog"), vec![1, 0, 2]);

        // task-2 ahead of task-1 (odd occupant once task-2 is lifted)
        let over_odd = apply(&board, ("backlog", 2), ("backlog", 1));
        assert_eq!(lane(&over_odd.board, "backlog"), vec![0, 2, 1]);
    }

    #[test]
    fn test_even_moving_down_is_allowed() {
        let board = board([&[0, 2, 4], &[], &[], &[]]);
        let result = apply(&board, ("backlog", 0), ("backlog", 1));
        assert_eq!(lane(&result.board, "backlog"), vec![2, 0, 4]);
    }

    #[test]
    fn test_cross_column_parity() {
        let board = board([&[], &[2, 3], &[4, 6], &[]]);

        let rejected = apply(&board, ("todo", 0), ("inProgress", 1));
        assert_eq!(
            rejected.outcome,
            MoveOutcome::Rejected(MoveRejection::Adjacency {
                task: TaskId::new(2),
                occupant: TaskId::new(6),
            })
        );

        let appended = apply(&board, ("todo", 0), ("inProgress", 2));
        assert_eq!(lane(&appended.board, "inProgress"), vec![4, 6, 2]);
        assert_eq!(lane(&appended.board, "todo"), vec![3]);
    }

    #[test]
    fn test_append_to_even_tail_is_allowed() {
        let board = board([&[0, 2], &[], &[], &[8]]);
        let result = apply(&board, ("backlog", 0), ("done", 1));
        assert_eq!(lane(&result.board, "done"), vec![8, 0]);
    }

    #[test]
    fn test_same_index_is_unchanged() {
        let board = board([&[0, 1, 2], &[], &[], &[]]);
        for index in 0..3 {
            let result = apply(&board, ("backlog", index), ("backlog", index));
            assert_eq!(result.outcome, MoveOutcome::Unchanged);
            assert_eq!(result.board, board);
        }
    }

    #[test]
    fn test_contract_violations_are_noops() {
        let board = board([&[0, 1], &[], &[], &[]]);

        let empty_slot = apply(&board, ("backlog", 5), ("todo", 0));
        assert_eq!(empty_slot.outcome, MoveOutcome::Unchanged);
        assert_eq!(empty_slot.board, board);

        let unknown = apply(&board, ("backlog", 0), ("archive", 0));
        assert_eq!(unknown.outcome, MoveOutcome::Unchanged);
        assert_eq!(unknown.board, board);
    }

    #[test]
    fn test_destination_past_end_appends() {
        let board = board([&[1, 3], &[5], &[], &[]]);
        let result = apply(&board, ("backlog", 0), ("todo", 9));
        assert_eq!(lane(&result.board, "todo"), vec![5, 1]);

        let within = apply(&board, ("backlog", 0), ("backlog", 9));
        assert_eq!(lane(&within.board, "backlog"), vec![3, 1]);
    }

    #[test]
    fn test_permissive_rules_allow_everything() {
        let board = board([&[0, 2], &[], &[4], &[]]).with_rules(MoveRules::permissive());

        let gated = apply(&board, ("backlog", 0), ("inProgress", 0));
        assert_eq!(lane(&gated.board, "inProgress"), vec![0, 4]);

        let overtake = apply(&board, ("backlog", 1), ("backlog", 0));
        assert_eq!(lane(&overtake.board, "backlog"), vec![2, 0]);
    }

    fn lanes_strategy() -> impl Strategy<Value = Vec<Vec<u32>>> {
        // 12 tasks shuffled and dealt into 4 lanes
        Just((0u32..12).collect::<Vec<_>>())
            .prop_shuffle()
            .prop_flat_map(|tasks| {
                proptest::collection::vec(0usize..4, tasks.len()).prop_map(move |lanes| {
                    let mut dealt = vec![Vec::new(); 4];
                    for (task, lane) in tasks.iter().zip(lanes) {
                        dealt[lane].push(*task);
                    }
                    dealt
                })
            })
    }

    fn to_board(lanes: &[Vec<u32>]) -> Board {
        board([&lanes[0], &lanes[1], &lanes[2], &lanes[3]])
    }

    const LANES: [&str; 4] = ["backlog", "todo", "inProgress", "done"];

    proptest! {
        #[test]
        fn rejection_leaves_state_unchanged(
            lanes in lanes_strategy(),
            from_lane in 0usize..4,
            to_lane in 0usize..4,
            from in 0usize..12,
            to in 0usize..13,
        ) {
            let board = to_board(&lanes);
            prop_assume!(!lanes[from_lane].is_empty());
            let from = from % lanes[from_lane].len();
            let source = Location::new(LANES[from_lane], from);
            let destination = Location::new(LANES[to_lane], to.min(lanes[to_lane].len()));

            let selection = Selection::single(TaskId::new(lanes[from_lane][from]));
            let result = reorder_single(&board, &selection, &source, &destination);

            if !is_move_allowed(&board, &source, &destination) {
                prop_assert!(matches!(result.outcome, MoveOutcome::Rejected(_)));
                prop_assert_eq!(&result.board, &board);
                prop_assert_eq!(&result.selection, &selection);
            } else {
                prop_assert!(!matches!(result.outcome, MoveOutcome::Rejected(_)));
            }
        }

        #[test]
        fn moves_conserve_tasks(
            lanes in lanes_strategy(),
            moves in proptest::collection::vec((0usize..4, 0usize..12, 0usize..4, 0usize..13), 1..20),
        ) {
            let mut board = to_board(&lanes);
            let before = placements(&board);

            for (from_lane, from, to_lane, to) in moves {
                let len = board.column(&LANES[from_lane].into()).unwrap().len();
                if len == 0 {
                    continue;
                }
                let source = Location::new(LANES[from_lane], from % len);
                let destination = Location::new(LANES[to_lane], to);
                board = reorder_single(&board, &Selection::new(), &source, &destination).board;
            }

            let after = placements(&board);
            prop_assert_eq!(&after, &before);
            prop_assert!(after.values().all(|count| *count == 1));
        }
    }
}
