use crate::domain::board::Board;
use crate::domain::sorting::SortOrder;
use crate::domain::task::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Selected task ids in the order the user picked them
///
/// Every operation returns a new selection and leaves `self` untouched, so
/// the shell decides when (and whether) to publish the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TaskId>", into = "Vec<TaskId>")]
pub struct Selection(Vec<TaskId>);

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection of exactly one task
    pub fn single(task_id: TaskId) -> Self {
        Self(vec![task_id])
    }

    /// Builds a selection from ids, dropping repeats after the first
    pub fn from_ids(ids: impl IntoIterator<Item = TaskId>) -> Self {
        let mut seen = HashSet::new();
        Self(
            ids.into_iter()
                .filter(|id| seen.insert(id.clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.0.contains(task_id)
    }

    /// Most recently added id: the anchor for range selection
    pub fn last(&self) -> Option<&TaskId> {
        self.0.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskId> + '_ {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TaskId] {
        &self.0
    }

    /// Membership set, for marking selected cards while rendering
    pub fn to_set(&self) -> HashSet<&TaskId> {
        self.0.iter().collect()
    }

    /// Whether `task_id` should be drawn as a follower of the group being
    /// dragged: it is selected, a drag is active, and it is not the card
    /// under the pointer.
    pub fn is_ghosting(&self, task_id: &TaskId, dragging: Option<&TaskId>) -> bool {
        match dragging {
            Some(dragged) => dragged != task_id && self.contains(task_id),
            None => false,
        }
    }

    /// Empty selection. The shell calls this on escape or on a click/tap
    /// outside any task.
    pub fn clear(&self) -> Self {
        Self::default()
    }

    /// Plain click on a task
    ///
    /// * not selected → it becomes the only selection
    /// * selected along with others → collapse to just it
    /// * the only selected task → deselect it
    pub fn toggle_single(&self, task_id: &TaskId) -> Self {
        if self.0.len() == 1 && self.contains(task_id) {
            return Self::default();
        }
        Self::single(task_id.clone())
    }

    /// Ctrl/Cmd-click on a task: add it, or remove it if already there.
    pub fn toggle_in_group(&self, task_id: &TaskId) -> Self {
        if self.contains(task_id) {
            return Self(self.0.iter().filter(|id| *id != task_id).cloned().collect());
        }
        let mut ids = self.0.clone();
        ids.push(task_id.clone());
        Self(ids)
    }

    /// Shift-click on a task: select everything between the last selected
    /// task and `task_id`.
    ///
    /// Returns `None` when `task_id` is the anchor itself; the shell should
    /// leave its state alone in that case.
    ///
    /// Crossing into another column restarts the selection from the top of
    /// that column down to `task_id`.
    ///
    /// # Panics
    ///
    /// Panics if `task_id` or the anchor is not placed on `board`.
    pub fn extend_range_to(&self, board: &Board, task_id: &TaskId) -> Option<Self> {
        let Some(last) = self.last() else {
            return Some(Self::single(task_id.clone()));
        };

        let new_at = board.position_of(task_id);
        let last_at = board.position_of(last);
        let column = board.home_column(task_id);

        if new_at.lane != last_at.lane {
            return Some(Self(column.task_ids[..=new_at.index].to_vec()));
        }

        if new_at.index == last_at.index {
            return None;
        }

        let order = SortOrder::between(last_at.index, new_at.index);
        let (start, end) = match order {
            SortOrder::Ascending => (last_at.index, new_at.index),
            SortOrder::Descending => (new_at.index, last_at.index),
        };

        let mut added: Vec<TaskId> = column.task_ids[start..=end]
            .iter()
            .filter(|id| !self.contains(id))
            .cloned()
            .collect();
        if order == SortOrder::Descending {
            added.reverse();
        }

        let mut ids = self.0.clone();
        ids.extend(added);
        Some(Self(ids))
    }

    /// Selection to drag with when a drag starts on `task_id`. Dragging a
    /// selected task carries the whole group; dragging anything else drops
    /// the old selection and drags just that task.
    pub fn for_drag_start(&self, task_id: &TaskId) -> Self {
        if self.contains(task_id) {
            return self.clone();
        }
        Self::single(task_id.clone())
    }
}

impl From<Vec<TaskId>> for Selection {
    fn from(ids: Vec<TaskId>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<Selection> for Vec<TaskId> {
    fn from(selection: Selection) -> Self {
        selection.0
    }
}

impl FromIterator<TaskId> for Selection {
    fn from_iter<I: IntoIterator<Item = TaskId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a TaskId;
    type IntoIter = std::slice::Iter<'a, TaskId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
