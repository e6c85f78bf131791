//! Kanban board and task persistence.
//!
//! Boards and tasks live in `<data dir>/kanban.json`, keyed by integer id:
//!
//! ```json
//! { "boards": { "1": "To do" },
//!   "tasks":  { "1": { "name": "Stand-up", "board": 1,
//!                      "remind_on": "every monday 09:00", "remind_for": 900 } } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{Result, StoreError};
use crate::task::{Task, TaskId, TaskStore};

fn default_remind_for() -> u64 {
    30 * 60
}

fn default_boards() -> BTreeMap<u32, String> {
    BTreeMap::from([
        (1, "To do".to_string()),
        (2, "Doing".to_string()),
        (3, "Done".to_string()),
        (4, "Scheduled".to_string()),
    ])
}

/// A task as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub name: String,
    #[serde(default)]
    pub board: Option<u32>,
    #[serde(default)]
    pub remind_on: String,
    #[serde(default = "default_remind_for")]
    pub remind_for: u64,
}

/// Fields supplied when adding or editing a task. `None` keeps the current
/// value (or the default, when adding).
#[derive(Debug, Clone, Default)]
pub struct TaskFields {
    pub name: Option<String>,
    /// Board id or board name.
    pub board: Option<String>,
    pub remind_on: Option<String>,
    pub remind_for: Option<u64>,
}

/// One board and its tasks, for board-grouped listings.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub id: u32,
    pub name: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kanban {
    #[serde(default = "default_boards")]
    pub boards: BTreeMap<u32, String>,
    #[serde(default)]
    pub tasks: BTreeMap<TaskId, TaskRecord>,
}

impl Default for Kanban {
    fn default() -> Self {
        Self {
            boards: default_boards(),
            tasks: BTreeMap::new(),
        }
    }
}

/// Max id + 1, or 1 when empty.
fn next_id<V>(map: &BTreeMap<u32, V>) -> Result<u32, StoreError> {
    match map.keys().next_back() {
        None => Ok(1),
        Some(id) => id.checked_add(1).ok_or(StoreError::IdSpaceExhausted),
    }
}

fn non_empty(name: String, what: &'static str) -> Result<String, StoreError> {
    if name.trim().is_empty() {
        Err(StoreError::EmptyName(what))
    } else {
        Ok(name)
    }
}

impl Kanban {
    /// Resolve a board given by id or by exact name.
    pub fn board_id(&self, key: &str) -> Option<u32> {
        let key = key.trim();
        key.parse::<u32>()
            .ok()
            .filter(|id| self.boards.contains_key(id))
            .or_else(|| {
                self.boards
                    .iter()
                    .find(|(_, name)| name.as_str() == key)
                    .map(|(id, _)| *id)
            })
    }

    fn require_board(&self, key: &str) -> Result<u32, StoreError> {
        self.board_id(key)
            .ok_or_else(|| StoreError::BoardNotFound(key.to_string()))
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.tasks.get(&id).map(|record| to_task(id, record))
    }

    /// Add a task under `id`, or the next free id. A name is required.
    pub fn add_task(&mut self, id: Option<TaskId>, fields: TaskFields) -> Result<TaskId, StoreError> {
        let id = match id {
            Some(id) => id,
            None => next_id(&self.tasks)?,
        };
        if self.tasks.contains_key(&id) {
            return Err(StoreError::TaskExists(id));
        }
        let name = non_empty(fields.name.unwrap_or_default(), "Task")?;
        let board = fields
            .board
            .as_deref()
            .map(|key| self.require_board(key))
            .transpose()?;

        self.tasks.insert(
            id,
            TaskRecord {
                name,
                board,
                remind_on: fields.remind_on.unwrap_or_default(),
                remind_for: fields.remind_for.unwrap_or_else(default_remind_for),
            },
        );
        Ok(id)
    }

    pub fn edit_task(&mut self, id: TaskId, fields: TaskFields) -> Result<(), StoreError> {
        let board = fields
            .board
            .as_deref()
            .map(|key| self.require_board(key))
            .transpose()?;
        let name = fields.name.map(|n| non_empty(n, "Task")).transpose()?;

        let record = self.tasks.get_mut(&id).ok_or(StoreError::TaskNotFound(id))?;
        if let Some(name) = name {
            record.name = name;
        }
        if board.is_some() {
            record.board = board;
        }
        if let Some(remind_on) = fields.remind_on {
            record.remind_on = remind_on;
        }
        if let Some(remind_for) = fields.remind_for {
            record.remind_for = remind_for;
        }
        Ok(())
    }

    pub fn delete_task(&mut self, id: TaskId) -> Result<TaskRecord, StoreError> {
        self.tasks.remove(&id).ok_or(StoreError::TaskNotFound(id))
    }

    pub fn add_board(&mut self, id: Option<u32>, name: String) -> Result<u32, StoreError> {
        let id = match id {
            Some(id) => id,
            None => next_id(&self.boards)?,
        };
        if self.boards.contains_key(&id) {
            return Err(StoreError::BoardExists(id));
        }
        let name = non_empty(name, "Board")?;
        self.boards.insert(id, name);
        Ok(id)
    }

    pub fn rename_board(&mut self, id: u32, name: String) -> Result<(), StoreError> {
        let name = non_empty(name, "Board")?;
        let slot = self
            .boards
            .get_mut(&id)
            .ok_or_else(|| StoreError::BoardNotFound(id.to_string()))?;
        *slot = name;
        Ok(())
    }

    /// Remove a board. Its tasks keep the dangling board id and drop out of
    /// board-grouped listings.
    pub fn delete_board(&mut self, id: u32) -> Result<String, StoreError> {
        self.boards
            .remove(&id)
            .ok_or_else(|| StoreError::BoardNotFound(id.to_string()))
    }

    /// All tasks, ordered by id.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .map(|(id, record)| to_task(*id, record))
            .collect()
    }

    /// Boards that hold at least one task, ordered by board id.
    pub fn columns(&self) -> Vec<BoardColumn> {
        self.boards
            .iter()
            .map(|(id, name)| BoardColumn {
                id: *id,
                name: name.clone(),
                tasks: self
                    .tasks()
                    .into_iter()
                    .filter(|t| t.board_id == Some(*id))
                    .collect(),
            })
            .filter(|column| !column.tasks.is_empty())
            .collect()
    }
}

fn to_task(id: TaskId, record: &TaskRecord) -> Task {
    Task {
        id,
        name: record.name.clone(),
        board_id: record.board,
        remind_on: record.remind_on.clone(),
        remind_for: record.remind_for,
    }
}

/// JSON file holding the kanban.
#[derive(Debug, Clone)]
pub struct KanbanStore {
    path: PathBuf,
}

impl KanbanStore {
    /// Open the store at `<data dir>/kanban.json`.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::DataDir(e.to_string()))?;
        Ok(Self::with_path(dir.join("kanban.json")))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the kanban; a missing file yields the default boards.
    pub fn load(&self) -> Result<Kanban, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Kanban::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, kanban: &Kanban) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(kanban)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Load, apply `f`, and save only if `f` succeeds.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut Kanban) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut kanban = self.load()?;
        let out = f(&mut kanban)?;
        self.save(&kanban)?;
        tracing::info!(path = %self.path.display(), "kanban saved");
        Ok(out)
    }
}

impl TaskStore for KanbanStore {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.load()?.tasks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> TaskFields {
        TaskFields {
            name: Some(name.to_string()),
            ..TaskFields::default()
        }
    }

    #[test]
    fn default_boards_present() {
        let k = Kanban::default();
        assert_eq!(k.boards.len(), 4);
        assert_eq!(k.board_id("Scheduled"), Some(4));
        assert_eq!(k.board_id("2"), Some(2));
        assert_eq!(k.board_id("9"), None);
        assert_eq!(k.board_id("Nope"), None);
    }

    #[test]
    fn ids_are_max_plus_one() {
        let mut k = Kanban::default();
        assert_eq!(k.add_task(None, fields("a")).unwrap(), 1);
        assert_eq!(k.add_task(Some(10), fields("b")).unwrap(), 10);
        assert_eq!(k.add_task(None, fields("c")).unwrap(), 11);
        assert!(matches!(k.add_task(Some(10), fields("d")), Err(StoreError::TaskExists(10))));
        assert_eq!(k.add_board(None, "Later".into()).unwrap(), 5);
    }

    #[test]
    fn next_id_after_max_is_an_error() {
        let mut k = Kanban::default();
        assert_eq!(k.add_task(Some(u32::MAX), fields("last")).unwrap(), u32::MAX);
        assert!(matches!(
            k.add_task(None, fields("overflow")),
            Err(StoreError::IdSpaceExhausted)
        ));
        assert_eq!(k.tasks.len(), 1);

        k.add_board(Some(u32::MAX), "Last".into()).unwrap();
        assert!(matches!(
            k.add_board(None, "Overflow".into()),
            Err(StoreError::IdSpaceExhausted)
        ));
    }

    #[test]
    fn board_lookup_ignores_surrounding_whitespace() {
        let k = Kanban::default();
        assert_eq!(k.board_id(" 2"), Some(2));
        assert_eq!(k.board_id(" Doing "), Some(2));
    }

    #[test]
    fn add_task_defaults_and_validation() {
        let mut k = Kanban::default();
        assert!(matches!(
            k.add_task(None, TaskFields::default()),
            Err(StoreError::EmptyName("Task"))
        ));
        let id = k
            .add_task(
                None,
                TaskFields {
                    board: Some("Doing".into()),
                    ..fields("write report")
                },
            )
            .unwrap();
        let t = k.task(id).unwrap();
        assert_eq!(t.board_id, Some(2));
        assert_eq!(t.remind_on, "");
        assert_eq!(t.remind_for, 1800);

        assert!(matches!(
            k.add_task(None, TaskFields { board: Some("Nowhere".into()), ..fields("x") }),
            Err(StoreError::BoardNotFound(_))
        ));
    }

    #[test]
    fn edit_only_touches_given_fields() {
        let mut k = Kanban::default();
        let id = k.add_task(None, fields("standup")).unwrap();
        k.edit_task(
            id,
            TaskFields {
                remind_on: Some("every monday 09:00".into()),
                remind_for: Some(900),
                ..TaskFields::default()
            },
        )
        .unwrap();
        let t = k.task(id).unwrap();
        assert_eq!(t.name, "standup");
        assert_eq!(t.remind_on, "every monday 09:00");
        assert_eq!(t.remind_for, 900);
        assert!(matches!(k.edit_task(99, fields("x")), Err(StoreError::TaskNotFound(99))));
    }

    #[test]
    fn columns_group_tasks_and_skip_empty_boards() {
        let mut k = Kanban::default();
        k.add_task(None, TaskFields { board: Some("1".into()), ..fields("a") }).unwrap();
        k.add_task(None, TaskFields { board: Some("3".into()), ..fields("b") }).unwrap();
        k.add_task(None, TaskFields { board: Some("1".into()), ..fields("c") }).unwrap();
        k.add_task(None, fields("loose")).unwrap();

        let cols = k.columns();
        assert_eq!(cols.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(cols[0].tasks.len(), 2);

        k.delete_board(3).unwrap();
        assert_eq!(k.columns().len(), 1);
        assert_eq!(k.tasks().len(), 4);
    }

    #[test]
    fn store_roundtrip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = KanbanStore::with_path(dir.path().join("kanban.json"));
        assert_eq!(store.load().unwrap(), Kanban::default());

        let id = store
            .update(|k| {
                k.add_task(
                    None,
                    TaskFields {
                        remind_on: Some("daily 10:00".into()),
                        ..fields("water plants")
                    },
                )
            })
            .unwrap();

        let tasks = store.load_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, id);
        assert_eq!(tasks[0].remind_on, "daily 10:00");
    }

    #[test]
    fn failed_update_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = KanbanStore::with_path(dir.path().join("kanban.json"));
        let res = store.update(|k| k.delete_task(1));
        assert!(res.is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = KanbanStore::with_path(dir.path().join("kanban.json"));
        std::fs::write(store.path(), r#"{"tasks": {"1": {"name": 5}}}"#).unwrap();
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
        assert!(store.load_tasks().is_err());
    }

    #[test]
    fn negative_remind_for_is_rejected() {
        let json = r#"{"tasks": {"1": {"name": "x", "remind_for": -5}}}"#;
        assert!(serde_json::from_str::<Kanban>(json).is_err());
    }
}
