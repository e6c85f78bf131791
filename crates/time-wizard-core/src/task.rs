//! Task records as seen by the reminder machinery.
//!
//! The engine never writes tasks; it only reads them through [`TaskStore`]
//! at session start and on explicit reload.

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub type TaskId = u32;

/// A kanban task with an optional recurring reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub board_id: Option<u32>,
    /// Recurrence expression, e.g. `every monday 09:00`. Empty means no reminder.
    pub remind_on: String,
    /// Reminder window length in seconds.
    pub remind_for: u64,
}

/// Read-only source of tasks for a pomodoro session.
pub trait TaskStore {
    fn load_tasks(&self) -> Result<Vec<Task>>;
}

/// Task store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tasks: Vec<Task>,
}

impl MemoryStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Replace the contents; visible to the next `load_tasks`.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}

impl TaskStore for MemoryStore {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }
}
