use crate::domain::rules::{LaneGate, MoveRules};
use crate::domain::sorting::BoardPosition;
use crate::domain::task::{Task, TaskId};
use crate::error::{Result, TasklaneError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::{fmt, sync::Arc};

/// Unique identifier for a column (e.g., backlog, inProgress)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position inside a column: the column and a zero-based slot.
///
/// As a drag source the index names an existing task (`0..len`); as a
/// destination it is an insertion point (`0..=len`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub column_id: ColumnId,
    pub index: usize,
}

impl Location {
    pub fn new(column_id: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column_id: column_id.into(),
            index,
        }
    }
}

/// A kanban column holding an ordered run of task ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub task_ids: Vec<TaskId>,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Same column (id and title) holding `task_ids` instead.
    pub fn with_task_ids(&self, task_ids: Vec<TaskId>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            task_ids,
        }
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }

    /// Index of `task_id` in this column, if it lives here
    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    pub fn task_at(&self, index: usize) -> Option<&TaskId> {
        self.task_ids.get(index)
    }
}

/// Column entry of a [`BoardConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl ColumnConfig {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    pub fn with_tasks(mut self, task_ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.task_ids = task_ids.into_iter().collect();
        self
    }
}

/// Board configuration
///
/// This is also the snapshot format a [`Board`] serializes to, so a board
/// read back from JSON goes through the same validation as a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub rules: MoveRules,
}

impl BoardConfig {
    pub const BACKLOG: &'static str = "backlog";
    pub const TODO: &'static str = "todo";
    pub const IN_PROGRESS: &'static str = "inProgress";
    pub const DONE: &'static str = "done";

    const STOCK_TASKS: u32 = 20;

    /// Parses a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        let tasks: Vec<Task> = (0..Self::STOCK_TASKS).map(Task::numbered).collect();
        let backlog = ColumnConfig::new(Self::BACKLOG, "Backlog")
            .with_tasks(tasks.iter().map(|task| task.id.clone()));

        Self {
            name: "Default Board".to_string(),
            columns: vec![
                backlog,
                ColumnConfig::new(Self::TODO, "To do"),
                ColumnConfig::new(Self::IN_PROGRESS, "In Progress"),
                ColumnConfig::new(Self::DONE, "Done"),
            ],
            tasks,
            // Work has to pass through "To do" before it is picked up.
            rules: MoveRules::default().with_gate(Self::BACKLOG, Self::IN_PROGRESS),
        }
    }
}

/// Kanban board state
///
/// A `Board` is a value. Moves never mutate one in place: they build a new
/// board that shares every untouched column, and the task map, with the old
/// one. Cloning is cheap for the same reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardConfig", into = "BoardConfig")]
pub struct Board {
    name: String,
    column_order: Vec<ColumnId>,
    columns: HashMap<ColumnId, Arc<Column>>,
    tasks: Arc<HashMap<TaskId, Task>>,
    rules: Arc<MoveRules>,
}

impl Board {
    /// Builds a board, checking that every placed task exists, that no
    /// task sits in two places and that ids are unique.
    pub fn from_config(config: BoardConfig) -> Result<Self> {
        validate(&config)?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: BoardConfig) -> Self {
        let column_order = config.columns.iter().map(|c| c.id.clone()).collect();
        let columns = config
            .columns
            .into_iter()
            .map(|c| {
                let column = Column {
                    id: c.id.clone(),
                    title: c.title,
                    task_ids: c.task_ids,
                };
                (c.id, Arc::new(column))
            })
            .collect();
        let tasks = config
            .tasks
            .into_iter()
            .map(|task| (task.id.clone(), task))
            .collect();

        Self {
            name: config.name,
            column_order,
            columns,
            tasks: Arc::new(tasks),
            rules: Arc::new(config.rules),
        }
    }

    /// Parses and validates a board snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_config(BoardConfig::from_json(json)?)
    }

    /// Serializes the board to its snapshot form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &MoveRules {
        &self.rules
    }

    /// Same board under different move rules
    pub fn with_rules(mut self, rules: MoveRules) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    /// Column ids, left to right
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id).map(Arc::as_ref)
    }

    /// Column at lane position `lane` (0 is leftmost)
    pub fn column_at(&self, lane: usize) -> Option<&Column> {
        self.column_order.get(lane).and_then(|id| self.column(id))
    }

    /// Lane position of a column
    pub fn lane_index(&self, id: &ColumnId) -> Option<usize> {
        self.column_order.iter().position(|c| c == id)
    }

    /// Columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.column_order.iter().filter_map(|id| self.column(id))
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Tasks of a column, in column order
    pub fn tasks_in(&self, column_id: &ColumnId) -> Vec<&Task> {
        self.column(column_id)
            .map(|column| {
                column
                    .task_ids
                    .iter()
                    .filter_map(|id| self.task(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every placed task id, column by column, top to bottom
    pub fn placed_task_ids(&self) -> impl Iterator<Item = &TaskId> + '_ {
        self.columns().flat_map(|column| column.task_ids.iter())
    }

    /// The column holding `task_id`, if any
    pub fn find_home_column(&self, task_id: &TaskId) -> Option<&Column> {
        self.columns().find(|column| column.contains(task_id))
    }

    /// The column holding `task_id`.
    ///
    /// # Panics
    ///
    /// Panics when no column holds `task_id`. Callers only ask about ids
    /// they read off this board, so a miss means the board or the
    /// selection has been corrupted.
    pub fn home_column(&self, task_id: &TaskId) -> &Column {
        match self.find_home_column(task_id) {
            Some(column) => column,
            None => panic!("task {} is not placed in any column", task_id),
        }
    }

    /// Where `task_id` sits: lane position, then index within the lane
    pub fn find_position(&self, task_id: &TaskId) -> Option<BoardPosition> {
        self.columns().enumerate().find_map(|(lane, column)| {
            column
                .position(task_id)
                .map(|index| BoardPosition { lane, index })
        })
    }

    /// Where `task_id` sits.
    ///
    /// # Panics
    ///
    /// Panics when no column holds `task_id`, like [`Board::home_column`].
    pub fn position_of(&self, task_id: &TaskId) -> BoardPosition {
        match self.find_position(task_id) {
            Some(position) => position,
            None => panic!("task {} is not placed in any column", task_id),
        }
    }

    /// New board with `replaced` swapped in by id; all other columns are
    /// shared with `self`.
    pub(crate) fn with_columns(&self, replaced: impl IntoIterator<Item = Column>) -> Self {
        let mut next = self.clone();
        for column in replaced {
            next.columns.insert(column.id.clone(), Arc::new(column));
        }
        next
    }

    #[cfg(test)]
    pub(crate) fn shares_column(&self, other: &Board, id: &ColumnId) -> bool {
        match (self.columns.get(id), other.columns.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        // The stock configuration is valid; see test_default_config_is_valid.
        Self::assemble(BoardConfig::default())
    }
}

impl TryFrom<BoardConfig> for Board {
    type Error = TasklaneError;

    fn try_from(config: BoardConfig) -> Result<Self> {
        Self::from_config(config)
    }
}

impl From<Board> for BoardConfig {
    fn from(board: Board) -> Self {
        let columns: Vec<ColumnConfig> = board
            .columns()
            .map(|column| ColumnConfig {
                id: column.id.clone(),
                title: column.title.clone(),
                task_ids: column.task_ids.clone(),
            })
            .collect();

        // Placed tasks in board order, then anything unplaced by id.
        let mut tasks: Vec<Task> = board
            .placed_task_ids()
            .filter_map(|id| board.task(id).cloned())
            .collect();
        let placed: HashSet<&TaskId> = board.placed_task_ids().collect();
        let mut unplaced: Vec<Task> = board
            .tasks
            .values()
            .filter(|task| !placed.contains(&task.id))
            .cloned()
            .collect();
        unplaced.sort_by(|a, b| a.id.cmp(&b.id));
        tasks.extend(unplaced);

        Self {
            name: board.name.clone(),
            columns,
            tasks,
            rules: (*board.rules).clone(),
        }
    }
}

fn validate(config: &BoardConfig) -> Result<()> {
    let mut column_ids = HashSet::new();
    for column in &config.columns {
        if !column_ids.insert(&column.id) {
            return Err(TasklaneError::DuplicateColumn(column.id.to_string()));
        }
    }

    let mut task_ids = HashSet::new();
    for task in &config.tasks {
        if !task_ids.insert(&task.id) {
            return Err(TasklaneError::DuplicateTask(task.id.to_string()));
        }
    }

    let mut placements: HashMap<&TaskId, &ColumnId> = HashMap::new();
    for column in &config.columns {
        for task_id in &column.task_ids {
            if !task_ids.contains(task_id) {
                return Err(TasklaneError::UnknownTask {
                    column: column.id.to_string(),
                    task: task_id.to_string(),
                });
            }
            if let Some(first) = placements.insert(task_id, &column.id) {
                return Err(TasklaneError::DuplicatePlacement {
                    task: task_id.to_string(),
                    first: first.to_string(),
                    second: column.id.to_string(),
                });
            }
        }
    }

    for LaneGate { from, to } in &config.rules.lane_gates {
        for id in [from, to] {
            if !column_ids.contains(id) {
                return Err(TasklaneError::UnknownGateColumn(id.to_string()));
            }
        }
    }

    Ok(())
}
