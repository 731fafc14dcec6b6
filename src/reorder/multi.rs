use crate::domain::board::{Board, Location};
use crate::domain::selection::Selection;
use crate::domain::sorting::canonical_order;
use crate::domain::task::TaskId;
use crate::reorder::Reordered;
use std::collections::HashSet;

/// Moves every selected task to `destination` as one contiguous block
///
/// The task under the pointer (the one at `source`) leads the block and
/// the rest follow in board reading order. The returned selection is that
/// same order. Lane gates and the adjacency rule are not applied to group
/// moves.
///
/// Selected tasks that already sit above `destination.index` in the
/// destination column are lifted out along with the rest, so the insertion
/// point shifts up by one for each of them.
///
/// # Panics
///
/// Panics if a selected id is not placed on the board. Selections are
/// built from the board, so this only happens when one of the two is stale.
pub fn reorder_multi(
    board: &Board,
    selection: &Selection,
    source: &Location,
    destination: &Location,
) -> Reordered {
    let Some(dragged) = board
        .column(&source.column_id)
        .and_then(|start| start.task_at(source.index))
        .cloned()
    else {
        tracing::warn!(
            column = %source.column_id,
            index = source.index,
            "drag source holds no task"
        );
        return Reordered::unchanged(board, selection);
    };
    if board.column(&destination.column_id).is_none() {
        tracing::warn!(destination = %destination.column_id, "drop references an unknown column");
        return Reordered::unchanged(board, selection);
    }

    let offset = selection
        .iter()
        .filter(|id| **id != dragged)
        .filter(|id| {
            let home = board.home_column(id);
            home.id == destination.column_id
                && home.position(id).is_some_and(|index| index < destination.index)
        })
        .count();
    let insert_at = destination.index.saturating_sub(offset);

    let ordered = canonical_order(board, selection.as_slice(), &dragged);
    let selected: HashSet<&TaskId> = selection.iter().collect();

    let mut replaced = Vec::new();
    for column in board.columns() {
        let holds_selected = column.task_ids.iter().any(|id| selected.contains(id));
        let is_destination = column.id == destination.column_id;
        if !holds_selected && !is_destination {
            continue;
        }

        let mut task_ids: Vec<TaskId> = column
            .task_ids
            .iter()
            .filter(|id| !selected.contains(id))
            .cloned()
            .collect();
        if is_destination {
            let at = insert_at.min(task_ids.len());
            task_ids.splice(at..at, ordered.iter().cloned());
        }
        replaced.push(column.with_task_ids(task_ids));
    }

    tracing::trace!(
        dragged = %dragged,
        count = ordered.len(),
        destination = %destination.column_id,
        index = insert_at,
        "group moved"
    );
    let next = board.with_columns(replaced);
    Reordered::moved(next, Selection::from_ids(ordered))
}
